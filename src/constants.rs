use lazy_static::lazy_static;
use regex::bytes::Regex;

pub(crate) const DEFAULT_WHOLE_STREAM_SIZE_LIMIT: u64 = u64::MAX;
pub(crate) const DEFAULT_KEY_HEADER: &str = "Content-Location";
pub(crate) const DEFAULT_CHARSET: &str = "utf-8";
pub(crate) const DEBUG_QUERY_PARAM: &str = "debug=true";

pub(crate) const BOUNDARY_EXT: &str = "--";
pub(crate) const CRLF: &str = "\r\n";
pub(crate) const CRLF_CRLF: &str = "\r\n\r\n";
pub(crate) const HTTP_VERSION_PREFIX: &str = "HTTP/";

lazy_static! {
    pub(crate) static ref BOUNDARY_QUOTED_RE: Regex = Regex::new(r#"(?i-u)\bboundary="([^"]+)""#).unwrap();
    pub(crate) static ref BOUNDARY_RE: Regex = Regex::new(r#"(?i-u)\bboundary=([^;]*)"#).unwrap();
    pub(crate) static ref HEADER_LINE_RE: Regex = Regex::new(r#"(?-u)^(\S+):[ \t]*([^\r\n]+)$"#).unwrap();
}
