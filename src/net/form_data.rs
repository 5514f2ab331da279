//! Ordered form data built from `application/x-www-form-urlencoded` bodies.
//!
//! Keys written as `key[]` or `key[index]` are collected into one list under
//! `key`. Lists are then flattened into a single comma-joined string, so
//! `tag[]=a&tag[]=b` reads back as `tag = "a,b"`. This is lossy: a value that
//! itself contains a comma cannot be told apart from two list entries.
//! Repeated plain keys keep the last value.

use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

enum Parsed {
    Scalar(String),
    List(Vec<String>),
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a URL-encoded body. Never fails; malformed escapes are kept as-is.
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let mut parsed: Vec<(String, Parsed)> = Vec::new();

        for (key, value) in form_urlencoded::parse(body) {
            if key.is_empty() {
                continue;
            }

            let (name, is_list) = split_list_key(&key);
            let idx = match parsed.iter().position(|(k, _)| k == name) {
                Some(idx) => idx,
                None => {
                    parsed.push((name.to_string(), Parsed::List(Vec::new())));
                    parsed.len() - 1
                }
            };

            match (is_list, &mut parsed[idx].1) {
                (true, Parsed::List(values)) => values.push(value.into_owned()),
                (true, slot) => *slot = Parsed::List(vec![value.into_owned()]),
                (false, slot) => *slot = Parsed::Scalar(value.into_owned()),
            }
        }

        let mut form = FormData::new();
        for (name, value) in parsed {
            let value = match value {
                Parsed::Scalar(value) => value,
                Parsed::List(values) => values.join(","),
            };
            form.set(name, value);
        }
        form
    }

    /// Sets `name` to `value`, replacing every existing entry with that name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.entries.iter().position(|(k, _)| *k == name) {
            Some(idx) => {
                self.entries[idx].1 = value;
                let mut seen = 0;
                self.entries.retain(|(k, _)| {
                    if *k != name {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.entries.push((name, value)),
        }
    }

    /// Adds an entry without touching existing ones.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value for `name`.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All values for `name`, in insertion order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    pub fn delete(&mut self, name: &str) {
        self.entries.retain(|(k, _)| k != name);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `tag[]` and `tag[1]` are list keys named `tag`.
fn split_list_key(key: &str) -> (&str, bool) {
    match key.find('[') {
        Some(open) if open > 0 && key.ends_with(']') => (&key[..open], true),
        _ => (key, false),
    }
}
