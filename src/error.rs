use std::fmt::{self, Debug, Display, Formatter};

use derive_more::Display;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A set of errors that can occur while loading a multipart response.
///
/// Malformed multipart content is never reported here: the parser degrades
/// silently and yields whatever entries it could recognize.
#[derive(Display)]
#[non_exhaustive]
pub enum Error {
    /// The transport reported a failure, e.g. a network error or a
    /// non-success status according to its own policy. The original error is
    /// kept untouched.
    #[display(fmt = "transport failed: {}", _0)]
    TransportFailed(BoxError),

    /// Failed to build the HTTP request from the given uri and method.
    #[display(fmt = "failed to build request: {}", _0)]
    BuildRequest(http::Error),

    /// The accumulated response body exceeded the configured limit.
    #[display(fmt = "response size exceeded the maximum limit: {} bytes", limit)]
    StreamSizeExceeded { limit: u64 },

    /// The transport stopped before signaling completion or failure.
    #[display(fmt = "incomplete multipart response")]
    IncompleteStream,

    /// Failed to decode an entry body as `JSON` in
    /// [`entry.json()`](crate::Entry::json) method.
    #[cfg(feature = "json")]
    #[display(fmt = "failed to decode entry body as JSON: {}", _0)]
    DecodeJson(serde_json::Error),
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::TransportFailed(cause) => Some(cause.as_ref()),
            Error::BuildRequest(cause) => Some(cause),
            #[cfg(feature = "json")]
            Error::DecodeJson(cause) => Some(cause),
            _ => None,
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string().eq(&other.to_string())
    }
}

impl Eq for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_failure_keeps_source() {
        let cause: BoxError = "Not Found".into();
        let err = Error::TransportFailed(cause);

        assert_eq!(err.to_string(), "transport failed: Not Found");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "Not Found");
    }

    #[test]
    fn test_size_exceeded_display() {
        let err = Error::StreamSizeExceeded { limit: 16 };
        assert_eq!(err.to_string(), "response size exceeded the maximum limit: 16 bytes");
        assert_eq!(err, Error::StreamSizeExceeded { limit: 16 });
    }

    #[test]
    fn test_incomplete_stream_display() {
        let err = Error::IncompleteStream;
        assert_eq!(err.to_string(), "incomplete multipart response");
        assert_eq!(format!("{:?}", err), "incomplete multipart response");
        assert!(std::error::Error::source(&err).is_none());
    }
}
