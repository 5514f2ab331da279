//! JSON body parsing.
//!
//! Bodies are parsed with `serde_json` into a [`JsonObject`], a small typed
//! accessor over [`serde_json::Value`]. Nesting is bounded by
//! [`JsonOptions::depth`]: a document parses only when its deepest
//! array/object nesting is strictly below the limit, so a depth of `1` only
//! admits scalars.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

pub const DEFAULT_DEPTH: usize = 512;

#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error(transparent)]
    Syntax(#[from] serde_json::Error),

    #[error("Maximum nesting depth of {0} exceeded")]
    DepthExceeded(usize),
}

/// Parser options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonOptions {
    /// Nesting limit, see the module docs
    pub depth: usize,
    /// Replace invalid UTF-8 with U+FFFD instead of failing
    pub substitute_invalid_utf8: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            substitute_invalid_utf8: false,
        }
    }
}

impl JsonOptions {
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn substitute_invalid_utf8(mut self, on: bool) -> Self {
        self.substitute_invalid_utf8 = on;
        self
    }
}

/// Parses `body` into a [`JsonObject`].
pub fn parse(body: &[u8], options: JsonOptions) -> Result<JsonObject, JsonError> {
    let lossy;
    let body = if options.substitute_invalid_utf8 {
        lossy = String::from_utf8_lossy(body);
        lossy.as_bytes()
    } else {
        body
    };

    if nesting_depth(body) >= options.depth {
        return Err(JsonError::DepthExceeded(options.depth));
    }

    // The depth check above bounds recursion, serde_json's own limit of 128
    // would otherwise cap us below the default depth.
    let mut de = serde_json::Deserializer::from_slice(body);
    de.disable_recursion_limit();
    let value = Value::deserialize(&mut de)?;
    de.end()?;

    Ok(JsonObject { value })
}

/// Deepest array/object nesting, ignoring brackets inside strings.
fn nesting_depth(body: &[u8]) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for &b in body {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                max = max.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    max
}

/// Parsed JSON document with typed accessors for the top-level object.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonObject {
    value: Value,
}

impl JsonObject {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.value.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key)?.as_i64()
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key)?.as_f64()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }

    pub fn get_array(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key)?.as_array()
    }

    /// Nested object under `key`, wrapped for further typed access.
    pub fn get_object(&self, key: &str) -> Option<JsonObject> {
        self.get(key)
            .filter(|v| v.is_object())
            .map(|v| JsonObject { value: v.clone() })
    }

    /// Top-level members when the document is an object.
    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        self.value.as_object()
    }

    pub fn as_value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Deserializes the whole document into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, JsonError> {
        Ok(T::deserialize(&self.value)?)
    }
}

impl fmt::Display for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
