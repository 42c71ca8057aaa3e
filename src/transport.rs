use bytes::Bytes;
use futures_util::stream::Stream;
use http::{HeaderMap, Request, StatusCode};

/// A readiness transition of an in-flight HTTP exchange.
///
/// A transport must send `Headers` before any `Body` chunk. `Complete`, or an
/// error item on the stream, is the last thing it sends.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// The response status and headers are available.
    Headers { status: StatusCode, headers: HeaderMap },

    /// Another piece of the response body arrived.
    Body(Bytes),

    /// The exchange finished successfully.
    Complete,
}

/// The HTTP client used by [`Load`](crate::Load) to issue its request.
///
/// Implementations decide on their own what counts as a failure, e.g. a
/// connection error or a `404` response, and report it as an error item on
/// the event stream. The loader forwards that error as-is.
pub trait Transport {
    /// The error reported when the exchange fails.
    type Error: Into<Box<dyn std::error::Error + Send + Sync>>;

    /// The ordered readiness transitions of one exchange.
    type Events: Stream<Item = Result<TransportEvent, Self::Error>> + Send;

    /// Issues the request and returns its events.
    fn send(&self, request: Request<()>) -> Self::Events;
}
