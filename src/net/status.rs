//! Status code to reason phrase lookup.
//!
//! Phrases come from the `http` crate's canonical table, so a response never
//! stores a reason phrase of its own.

/// Shown wherever a phrase must be displayed for an unmapped code.
pub const UNKNOWN_REASON_PHRASE: &str = "unknown";

/// Canonical reason phrase for `code`, `None` if the code is not in the table.
pub fn reason_phrase(code: u16) -> Option<&'static str> {
    http::StatusCode::from_u16(code).ok()?.canonical_reason()
}

/// Like [`reason_phrase`], but falls back to [`UNKNOWN_REASON_PHRASE`].
pub fn reason_phrase_or_unknown(code: u16) -> &'static str {
    reason_phrase(code).unwrap_or(UNKNOWN_REASON_PHRASE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(reason_phrase(200), Some("OK"));
        assert_eq!(reason_phrase(204), Some("No Content"));
        assert_eq!(reason_phrase(303), Some("See Other"));
        assert_eq!(reason_phrase(404), Some("Not Found"));
        assert_eq!(reason_phrase(418), Some("I'm a teapot"));
    }

    #[test]
    fn unmapped_codes() {
        assert_eq!(reason_phrase(0), None);
        assert_eq!(reason_phrase(599), None);
        assert_eq!(reason_phrase(1000), None);
        assert_eq!(reason_phrase_or_unknown(0), "unknown");
        assert_eq!(reason_phrase_or_unknown(404), "Not Found");
    }
}
