//! An incremental parser and loader for `multipart/mixed` HTTP batch responses.
//!
//! A batch response packs several sub-responses into one body, each in its own
//! boundary-delimited section:
//!
//! ```text
//! --B
//! HTTP/1.1 200 Ok
//! Content-Location: /ok
//!
//! OK
//! --B--
//! ```
//!
//! [`parse_entries`] turns such a body into [`Entry`] values, and [`Load`]
//! drives a request over a [`Transport`] and yields the entries as soon as
//! they're complete.
//!
//! # Examples
//!
//! ```
//! use multer_mixed::{parse_boundary, parse_entries};
//!
//! let boundary = parse_boundary("multipart/mixed; boundary=\"B\"");
//! let body = "--B\r\nHTTP/1.1 200 Ok\r\nContent-Location: /ok\r\n\r\nOK\r\n--B--";
//!
//! let entries = parse_entries(body, &boundary, 0);
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].body(), "OK");
//! ```
//!
//! ## Optional features
//!
//! | Feature    | Description |
//! | ---------- | ----------- |
//! | `json`     | Enables [`Entry::json`] |
//! | `tokio-io` | Enables [`Load::with_reader`] |
//! | `log`      | Emits diagnostics through the `log` crate |

#[macro_use]
mod macros;

pub use entry::{Entries, Entry, Status, Value};
pub use error::Error;
pub use load::{Load, LoadEvent, Progress};
pub use options::LoadOptions;
pub use parser::parse_entries;
pub use transport::{Transport, TransportEvent};

mod buffer;
mod constants;
mod entry;
mod error;
mod helpers;
mod load;
mod options;
mod parser;
mod state;
mod transport;

/// A Result type often returned from methods that can have `multer-mixed` errors.
pub type Result<T> = std::result::Result<T, Error>;

/// Parses the `Content-Type` header to extract the boundary value.
///
/// Both `boundary="token"` and `boundary=token` are accepted, the quoted form
/// first. Surrounding spaces, tabs and quotes are stripped. Returns an empty
/// string when there's no boundary.
pub fn parse_boundary<T: AsRef<str>>(content_type: T) -> String {
    let content_type = content_type.as_ref();

    let token = constants::BOUNDARY_QUOTED_RE
        .captures(content_type.as_bytes())
        .or_else(|| constants::BOUNDARY_RE.captures(content_type.as_bytes()))
        .and_then(|caps| caps.get(1))
        .and_then(|m| content_type.get(m.start()..m.end()))
        .unwrap_or_default();

    token
        .trim_matches(|c: char| c == ' ' || c == '\t' || c == '"')
        .to_owned()
}
