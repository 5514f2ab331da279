//! URI references as used for redirect targets.
//!
//! Redirect targets are often relative (`./`, `/somewhere/`), which
//! [`url::Url`] cannot represent, so [`Uri`] keeps the reference as text and
//! only knows how to find its query and fragment.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Uri {
    raw: String,
}

impl Uri {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Everything before the query and fragment.
    pub fn path(&self) -> &str {
        let end = self.raw.find(['?', '#']).unwrap_or(self.raw.len());
        &self.raw[..end]
    }

    /// Query without the leading `?`, `None` if there is no query.
    pub fn query(&self) -> Option<&str> {
        let (before_fragment, _) = self.split_fragment();
        before_fragment.split_once('?').map(|(_, q)| q)
    }

    /// Fragment without the leading `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.split_fragment().1
    }

    /// Copy of this URI with its query replaced. An empty `query` removes the
    /// query component entirely; the fragment is kept.
    pub fn with_query(&self, query: &str) -> Uri {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut raw = self.path().to_string();
        if !query.is_empty() {
            raw.push('?');
            raw.push_str(query);
        }
        if let Some(fragment) = self.fragment() {
            raw.push('#');
            raw.push_str(fragment);
        }
        Uri { raw }
    }

    fn split_fragment(&self) -> (&str, Option<&str>) {
        match self.raw.split_once('#') {
            Some((before, fragment)) => (before, Some(fragment)),
            None => (&self.raw, None),
        }
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Uri {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Uri::new(s))
    }
}

impl From<&str> for Uri {
    fn from(raw: &str) -> Self {
        Uri::new(raw)
    }
}

impl From<String> for Uri {
    fn from(raw: String) -> Self {
        Uri { raw }
    }
}

impl From<&Uri> for Uri {
    fn from(uri: &Uri) -> Self {
        uri.clone()
    }
}

impl From<url::Url> for Uri {
    fn from(url: url::Url) -> Self {
        Uri { raw: url.into() }
    }
}

impl From<&url::Url> for Uri {
    fn from(url: &url::Url) -> Self {
        Uri::new(url.as_str())
    }
}

impl From<http::Uri> for Uri {
    fn from(uri: http::Uri) -> Self {
        Uri { raw: uri.to_string() }
    }
}

impl From<&http::Uri> for Uri {
    fn from(uri: &http::Uri) -> Self {
        Uri { raw: uri.to_string() }
    }
}
