use std::collections::HashMap;

use memchr::memmem::Finder;

use crate::constants;
use crate::entry::{Entry, Status, Value};
use crate::helpers;
use crate::state::ScanState;

struct EntryBuilder<'a> {
    status: Option<Status>,
    headers: HashMap<String, Value>,
    body: Vec<&'a str>,
}

impl<'a> EntryBuilder<'a> {
    fn new() -> Self {
        EntryBuilder {
            status: None,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    fn header(&mut self, name: &str, value: Value) {
        self.headers.insert(name.to_owned(), value);
    }

    fn finish(self) -> Entry {
        Entry {
            status: self.status,
            headers: self.headers,
            body: self.body.join(constants::CRLF),
        }
    }
}

/// Parses a `multipart/*` body into its entries.
///
/// The body is split on `\r\n` only. Every line containing `--boundary` closes
/// the entry before it, and the first line containing `--boundary--` ends the
/// scan. The first `skip` sections are left out of the result which lets a
/// caller re-parse a growing body and only get what's new since the last call.
///
/// An entry is only returned once the boundary after it was seen, so a
/// truncated body yields all the complete entries and nothing else.
///
/// # Examples
///
/// ```
/// use multer_mixed::parse_entries;
///
/// let body = "--B\r\nHTTP/1.1 404 Not Found\r\nContent-Location: /notfound\r\n\r\nNOT FOUND\r\n--B--";
///
/// let entries = parse_entries(body, "B", 0);
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].status().map(|s| s.code), Some(404));
/// assert_eq!(entries[0].body(), "NOT FOUND");
///
/// assert!(parse_entries(body, "B", 1).is_empty());
/// ```
pub fn parse_entries(body: &str, boundary: &str, skip: usize) -> Vec<Entry> {
    let mut entries = Vec::new();

    if boundary.is_empty() {
        return entries;
    }

    let delimiter = format!("{}{}", constants::BOUNDARY_EXT, boundary);
    let close_delimiter = format!("{}{}", delimiter, constants::BOUNDARY_EXT);
    let delimiter = Finder::new(delimiter.as_bytes());
    let close_delimiter = Finder::new(close_delimiter.as_bytes());

    let mut skipped = 0;
    let mut state = ScanState::AwaitingEntryStart;
    let mut entry: Option<EntryBuilder<'_>> = None;

    for line in body.split(constants::CRLF) {
        if delimiter.find(line.as_bytes()).is_some() {
            if let Some(entry) = entry.take() {
                entries.push(entry.finish());
            }

            if close_delimiter.find(line.as_bytes()).is_some() {
                return entries;
            }

            if skipped < skip {
                skipped += 1;
            } else {
                entry = Some(EntryBuilder::new());
                state = ScanState::AwaitingEntryStart;
            }

            continue;
        }

        let entry = match entry.as_mut() {
            Some(entry) => entry,
            None => continue,
        };

        state = match state {
            ScanState::AwaitingEntryStart => {
                if let Some(status) = helpers::parse_status_line(line) {
                    entry.status = Some(status);
                    ScanState::StatusOrHeaderExpected
                } else if let Some((name, value)) = helpers::parse_header_line(line) {
                    entry.header(name, value);
                    ScanState::StatusOrHeaderExpected
                } else {
                    entry.body.push(line);
                    ScanState::BodyCollecting
                }
            }
            ScanState::StatusOrHeaderExpected => {
                if let Some((name, value)) = helpers::parse_header_line(line) {
                    entry.header(name, value);
                    ScanState::StatusOrHeaderExpected
                } else {
                    // Any other line ends the header block, just like a blank one.
                    ScanState::BodyCollecting
                }
            }
            ScanState::BodyCollecting => {
                entry.body.push(line);
                ScanState::BodyCollecting
            }
        };
    }

    entries
}
