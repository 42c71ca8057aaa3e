use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "json")]
use serde::de::DeserializeOwned;

/// A map of parsed entries keyed by the value of their key header.
///
/// Only entries carrying the key header (`Content-Location` unless configured
/// otherwise through [`LoadOptions::key_header`](crate::LoadOptions::key_header))
/// end up in this map. Entries without it are still parsed and reported via
/// [`Progress`](crate::Progress) but can't be addressed here.
pub type Entries = HashMap<String, Entry>;

/// The status line of an entry, e.g. `HTTP/1.1 404 Not Found`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub code: u16,
    pub text: String,
}

impl Status {
    /// Converts the code into a [`StatusCode`](http::StatusCode), if it's a valid one.
    pub fn status_code(&self) -> Option<http::StatusCode> {
        http::StatusCode::from_u16(self.code).ok()
    }
}

/// A header value of an entry.
///
/// Values which look like a number are kept as numbers, everything else as
/// trimmed text. The whole value has to be a number, a numeric prefix isn't
/// enough: `2023-01-01` and `12 items` stay text rather than becoming `2023`
/// and `12`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    pub(crate) fn parse(raw: &str) -> Value {
        let raw = raw.trim_end_matches(|c: char| c == ' ' || c == '\t');

        match raw.trim().parse::<f64>() {
            Ok(num) if num.is_finite() => Value::Number(num),
            _ => Value::Text(raw.to_owned()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text.as_str()),
            Value::Number(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(num) => Some(*num),
            Value::Text(_) => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(num) => Display::fmt(num, f),
            Value::Text(text) => f.write_str(text),
        }
    }
}

/// A single sub-response of a multipart body.
///
/// # Examples
///
/// ```
/// let body = "--B\r\nHTTP/1.1 200 Ok\r\nContent-Type: text/plain\r\n\r\nhello\r\n--B--";
/// let entries = multer_mixed::parse_entries(body, "B", 0);
///
/// let entry = &entries[0];
/// assert_eq!(entry.status().map(|s| s.code), Some(200));
/// assert_eq!(entry.header("Content-Type").and_then(|v| v.as_str()), Some("text/plain"));
/// assert_eq!(entry.body(), "hello");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entry {
    pub(crate) status: Option<Status>,
    pub(crate) headers: HashMap<String, Value>,
    pub(crate) body: String,
}

impl Entry {
    /// The status line of the entry, `None` when the section didn't start with one.
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// All headers, keyed by their name exactly as written.
    pub fn headers(&self) -> &HashMap<String, Value> {
        &self.headers
    }

    /// Get a header value by its case-sensitive name.
    pub fn header(&self, name: &str) -> Option<&Value> {
        self.headers.get(name)
    }

    /// The body lines joined with `\r\n`, empty if there were none.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Get the `Content-Type` header parsed as [`Mime`](mime::Mime).
    pub fn content_type(&self) -> Option<mime::Mime> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(http::header::CONTENT_TYPE.as_str()))
            .and_then(|(_, val)| val.as_str())
            .and_then(|val| val.parse::<mime::Mime>().ok())
    }

    /// Try to deserialize the entry body as JSON.
    ///
    /// # Optional
    ///
    /// This requires the optional `json` feature to be enabled.
    #[cfg(feature = "json")]
    pub fn json<T: DeserializeOwned>(&self) -> crate::Result<T> {
        serde_json::from_str(&self.body).map_err(crate::Error::DecodeJson)
    }

    pub(crate) fn key(&self, key_header: &str) -> Option<String> {
        self.header(key_header).map(Value::to_string)
    }
}
