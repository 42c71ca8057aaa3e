use http::Method;

use crate::constants;

/// Configures a [`Load`](crate::Load).
///
/// # Examples
///
/// ```
/// use multer_mixed::LoadOptions;
///
/// let options = LoadOptions::new()
///     .method(http::Method::POST)
///     .debug(true)
///     .key_header("X-Request-Id")
///     .size_limit(10 * 1024 * 1024);
/// ```
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub(crate) method: Method,
    pub(crate) debug: bool,
    pub(crate) key_header: String,
    pub(crate) default_charset: String,
    pub(crate) size_limit: u64,
}

impl LoadOptions {
    /// Creates the default options: a `GET` request without the debug
    /// parameter, entries keyed by `Content-Location`, `utf-8` text and no
    /// size limit.
    pub fn new() -> LoadOptions {
        LoadOptions::default()
    }

    /// Sets the HTTP method of the request.
    pub fn method(mut self, method: Method) -> LoadOptions {
        self.method = method;
        self
    }

    /// Adds `debug=true` to the request's query string.
    pub fn debug(mut self, debug: bool) -> LoadOptions {
        self.debug = debug;
        self
    }

    /// Sets the entry header whose value keys the final [`Entries`](crate::Entries).
    ///
    /// Entries lacking this header are left out of the final map.
    pub fn key_header<N: Into<String>>(mut self, name: N) -> LoadOptions {
        self.key_header = name.into();
        self
    }

    /// Sets the charset used when the response `Content-Type` doesn't declare one.
    pub fn default_charset<C: Into<String>>(mut self, charset: C) -> LoadOptions {
        self.default_charset = charset.into();
        self
    }

    /// Sets the size limit in bytes for the whole response body.
    pub fn size_limit(mut self, limit: u64) -> LoadOptions {
        self.size_limit = limit;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            method: Method::GET,
            debug: false,
            key_header: constants::DEFAULT_KEY_HEADER.to_owned(),
            default_charset: constants::DEFAULT_CHARSET.to_owned(),
            size_limit: constants::DEFAULT_WHOLE_STREAM_SIZE_LIMIT,
        }
    }
}
