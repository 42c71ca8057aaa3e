use encoding_rs::{Encoding, UTF_8};
use http::header::{self, HeaderMap};

use crate::constants;
use crate::entry::{Status, Value};

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Parses a line like `HTTP/1.1 200 Ok`.
///
/// Only `HTTP/1.0` and `HTTP/1.1` are accepted and the reason phrase may only
/// contain word characters, spaces and tabs.
pub(crate) fn parse_status_line(line: &str) -> Option<Status> {
    let prefix_len = constants::HTTP_VERSION_PREFIX.len();

    if !line
        .get(..prefix_len)?
        .eq_ignore_ascii_case(constants::HTTP_VERSION_PREFIX)
    {
        return None;
    }

    if line.contains(|c: char| c == '\r' || c == '\n') {
        return None;
    }

    let mut raw = Vec::with_capacity(line.len() + constants::CRLF_CRLF.len());
    raw.extend_from_slice(constants::HTTP_VERSION_PREFIX.as_bytes());
    raw.extend_from_slice(line[prefix_len..].as_bytes());
    raw.extend_from_slice(constants::CRLF_CRLF.as_bytes());

    let mut headers = [httparse::EMPTY_HEADER; 0];
    let mut res = httparse::Response::new(&mut headers);

    match res.parse(&raw) {
        Ok(httparse::Status::Complete(_)) => {}
        _ => return None,
    }

    let code = res.code?;
    let reason = res.reason?;

    let valid_reason = !reason.is_empty()
        && reason
            .bytes()
            .all(|b| is_word_byte(b) || b == b' ' || b == b'\t');

    if !valid_reason {
        return None;
    }

    Some(Status {
        code,
        text: reason.to_owned(),
    })
}

/// Parses a `Name: value` line.
///
/// The name is a run of non-whitespace characters directly followed by a
/// colon, the value is whatever non-empty text follows the optional spaces.
pub(crate) fn parse_header_line(line: &str) -> Option<(&str, Value)> {
    let caps = constants::HEADER_LINE_RE.captures(line.as_bytes())?;

    let name = caps.get(1).and_then(|m| line.get(m.start()..m.end()))?;
    let value = caps.get(2).and_then(|m| line.get(m.start()..m.end()))?;

    Some((name, Value::parse(value)))
}

pub(crate) fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::CONTENT_TYPE).and_then(|val| val.to_str().ok())
}

/// Picks the text encoding from the `charset` parameter, falling back to the given label.
pub(crate) fn encoding_for(content_type: Option<&str>, default_charset: &str) -> &'static Encoding {
    let parsed = content_type.and_then(|val| val.parse::<mime::Mime>().ok());

    let label = parsed
        .as_ref()
        .and_then(|m| m.get_param(mime::CHARSET))
        .map(|charset| charset.as_str())
        .unwrap_or(default_charset);

    Encoding::for_label(label.as_bytes()).unwrap_or(UTF_8)
}

pub(crate) fn append_query_param(uri: &str, param: &str) -> String {
    let separator = if !uri.contains('?') {
        "?"
    } else if uri.ends_with('?') || uri.ends_with('&') {
        ""
    } else {
        "&"
    };

    format!("{}{}{}", uri, separator, param)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_line() {
        let status = parse_status_line("HTTP/1.1 200 Ok").unwrap();
        assert_eq!(status.code, 200);
        assert_eq!(status.text, "Ok");

        let status = parse_status_line("HTTP/1.0 304 Not Modified").unwrap();
        assert_eq!(status.code, 304);
        assert_eq!(status.text, "Not Modified");

        let status = parse_status_line("http/1.1 404 Not Found").unwrap();
        assert_eq!(status.code, 404);

        assert!(parse_status_line("HTTP/2.0 200 Ok").is_none());
        assert!(parse_status_line("HTTP/1.1 20 Ok").is_none());
        assert!(parse_status_line("HTTP/1.1 200").is_none());
        assert!(parse_status_line("HTTP/1.1 200 Ok!").is_none());
        assert!(parse_status_line("Content-Type: text/plain").is_none());
        assert!(parse_status_line("").is_none());
    }

    #[test]
    fn test_parse_header_line() {
        let (name, value) = parse_header_line("Content-Type: application/json").unwrap();
        assert_eq!(name, "Content-Type");
        assert_eq!(value, Value::Text("application/json".to_owned()));

        let (name, value) = parse_header_line("Content-Length:\t42 ").unwrap();
        assert_eq!(name, "Content-Length");
        assert_eq!(value, Value::Number(42.0));

        let (name, value) = parse_header_line("Content-Location: /a b c  ").unwrap();
        assert_eq!(name, "Content-Location");
        assert_eq!(value, Value::Text("/a b c".to_owned()));

        assert!(parse_header_line("NOT FOUND").is_none());
        assert!(parse_header_line(" Indented: value").is_none());
        let (name, value) = parse_header_line("X-Time:12:30").unwrap();
        assert_eq!(name, "X-Time:12");
        assert_eq!(value, Value::Number(30.0));

        let (name, value) = parse_header_line("A: ").unwrap();
        assert_eq!(name, "A");
        assert_eq!(value, Value::Text(String::new()));

        assert!(parse_header_line("Empty:").is_none());
        assert!(parse_header_line(": value").is_none());
        assert!(parse_header_line("").is_none());
    }

    #[test]
    fn test_encoding_for() {
        assert_eq!(encoding_for(None, "utf-8"), UTF_8);
        assert_eq!(
            encoding_for(Some("multipart/mixed; boundary=b; charset=windows-1252"), "utf-8"),
            encoding_rs::WINDOWS_1252
        );
        assert_eq!(encoding_for(Some("multipart/mixed"), "iso-8859-2"), encoding_rs::ISO_8859_2);
    }

    #[test]
    fn test_append_query_param() {
        assert_eq!(append_query_param("/data", "debug=true"), "/data?debug=true");
        assert_eq!(append_query_param("/data?a=1", "debug=true"), "/data?a=1&debug=true");
        assert_eq!(append_query_param("/data?", "debug=true"), "/data?debug=true");
    }
}
