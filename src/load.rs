use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::stream::{Stream, TryStreamExt};
use http::{HeaderMap, StatusCode};
#[cfg(feature = "tokio-io")]
use tokio::io::AsyncRead;
#[cfg(feature = "tokio-io")]
use tokio_util::io::ReaderStream;

use crate::buffer::ResponseBuffer;
use crate::entry::{Entries, Entry};
use crate::options::LoadOptions;
use crate::state::LoadStage;
use crate::transport::{Transport, TransportEvent};
use crate::{constants, helpers};

/// Entries which got complete since the previous event.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// How many entries were delivered before this event.
    pub delivered: usize,
    /// The newly parsed entries, possibly none.
    pub entries: Vec<Entry>,
}

/// An event yielded by [`Load`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    /// More of the body arrived, with the entries it completed.
    Progress(Progress),
    /// The exchange finished, with all the entries carrying the key header.
    Complete(Entries),
}

/// Loads a `multipart/*` response and parses its entries while it arrives.
///
/// It yields a [`LoadEvent::Progress`] for every body chunk the transport
/// receives and a single [`LoadEvent::Complete`] at the end. A transport failure
/// is yielded as [`Error::TransportFailed`](crate::Error::TransportFailed) and
/// also ends the stream. When the transport stops without reporting either, the
/// stream ends without a final event.
///
/// Each step re-parses the whole body received so far and skips the entries
/// already delivered, so the work per step grows with the body size.
///
/// Dropping a `Load` drops the transport's event stream, which cancels the
/// request for transports that support it.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use futures_util::stream;
/// use http::{header, HeaderMap, HeaderValue, StatusCode};
/// use multer_mixed::{Load, LoadEvent, LoadOptions, TransportEvent};
///
/// # async fn run() {
/// let mut headers = HeaderMap::new();
/// headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("multipart/mixed; boundary=B"));
///
/// let body = "--B\r\nHTTP/1.1 200 Ok\r\nContent-Location: /ok\r\n\r\nOK\r\n--B--";
/// let events = stream::iter(vec![
///     Ok::<_, std::io::Error>(TransportEvent::Headers { status: StatusCode::OK, headers }),
///     Ok(TransportEvent::Body(Bytes::from(body))),
///     Ok(TransportEvent::Complete),
/// ]);
///
/// let mut load = Load::from_events(events, LoadOptions::new());
///
/// while let Some(event) = load.next_event().await.unwrap() {
///     match event {
///         LoadEvent::Progress(progress) => println!("{} new entries", progress.entries.len()),
///         LoadEvent::Complete(entries) => assert_eq!(entries["/ok"].body(), "OK"),
///     }
/// }
/// # }
/// # tokio::runtime::Runtime::new().unwrap().block_on(run());
/// ```
pub struct Load<'r> {
    events: Pin<Box<dyn Stream<Item = crate::Result<TransportEvent>> + Send + 'r>>,
    buffer: ResponseBuffer,
    boundary: Option<String>,
    stage: LoadStage,
    delivered: usize,
    entries: Entries,
    options: LoadOptions,
}

impl<'r> Load<'r> {
    /// Issues a request to `uri` over the given transport.
    ///
    /// Fails only if the request can't be built from the uri and method.
    pub fn new<T>(transport: &T, uri: &str, options: LoadOptions) -> crate::Result<Load<'r>>
    where
        T: Transport,
        T::Events: 'r,
        T::Error: 'r,
    {
        let uri = if options.debug {
            helpers::append_query_param(uri, constants::DEBUG_QUERY_PARAM)
        } else {
            uri.to_owned()
        };

        let request = http::Request::builder()
            .method(options.method.clone())
            .uri(uri)
            .body(())
            .map_err(crate::Error::BuildRequest)?;

        debug!("issuing {} {}", request.method(), request.uri());

        Ok(Load::from_events(transport.send(request), options))
    }

    /// Construct a new `Load` from the events of an already issued exchange.
    pub fn from_events<S, E>(events: S, options: LoadOptions) -> Load<'r>
    where
        S: Stream<Item = Result<TransportEvent, E>> + Send + 'r,
        E: Into<Box<dyn std::error::Error + Send + Sync>> + 'r,
    {
        let events = events.map_err(|err| crate::Error::TransportFailed(err.into()));

        Load {
            events: Box::pin(events),
            buffer: ResponseBuffer::new(options.size_limit),
            boundary: None,
            stage: LoadStage::AwaitingHeaders,
            delivered: 0,
            entries: Entries::new(),
            options,
        }
    }

    /// Construct a new `Load` from an [`AsyncRead`](tokio::io::AsyncRead)
    /// body and its `Content-Type` value.
    ///
    /// # Optional
    ///
    /// This requires the optional `tokio-io` feature to be enabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use multer_mixed::{Load, LoadOptions};
    ///
    /// # async fn run() {
    /// let data = "--X-BOUNDARY\r\nHTTP/1.1 200 Ok\r\nContent-Location: /ok\r\n\r\nOK\r\n--X-BOUNDARY--\r\n";
    /// let load = Load::with_reader(data.as_bytes(), "multipart/mixed; boundary=X-BOUNDARY", LoadOptions::new());
    ///
    /// let entries = load.entries().await.unwrap();
    /// assert_eq!(entries["/ok"].body(), "OK");
    /// # }
    /// # tokio::runtime::Runtime::new().unwrap().block_on(run());
    /// ```
    #[cfg(feature = "tokio-io")]
    pub fn with_reader<R, C>(reader: R, content_type: C, options: LoadOptions) -> Load<'r>
    where
        R: AsyncRead + Send + 'r,
        C: AsRef<str>,
    {
        use futures_util::future;
        use futures_util::stream::{self, StreamExt};
        use http::header::{self, HeaderValue};

        let mut headers = HeaderMap::new();
        if let Ok(val) = HeaderValue::from_str(content_type.as_ref()) {
            headers.insert(header::CONTENT_TYPE, val);
        }

        let head = stream::once(future::ready(Ok::<_, std::io::Error>(TransportEvent::Headers {
            status: StatusCode::OK,
            headers,
        })));
        let body = ReaderStream::new(reader).map_ok(TransportEvent::Body);
        let tail = stream::once(future::ready(Ok(TransportEvent::Complete)));

        Load::from_events(head.chain(body).chain(tail), options)
    }

    /// Yields the next [`LoadEvent`], or `None` once the load is over.
    pub async fn next_event(&mut self) -> crate::Result<Option<LoadEvent>> {
        self.try_next().await
    }

    /// Drives the load to its end, skipping progress events, and returns the
    /// keyed entries.
    ///
    /// Returns [`Error::IncompleteStream`](crate::Error::IncompleteStream) if
    /// the transport stopped without completing.
    pub async fn entries(mut self) -> crate::Result<Entries> {
        while let Some(event) = self.try_next().await? {
            if let LoadEvent::Complete(entries) = event {
                return Ok(entries);
            }
        }

        Err(crate::Error::IncompleteStream)
    }

    /// How many entries were delivered so far.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// The boundary taken from the response headers, once they arrived.
    pub fn boundary(&self) -> Option<&str> {
        self.boundary.as_deref()
    }

    fn on_headers(&mut self, status: StatusCode, headers: &HeaderMap) {
        if self.boundary.is_some() {
            return;
        }

        let content_type = helpers::content_type(headers);
        let boundary = content_type.map(crate::parse_boundary).unwrap_or_default();

        if boundary.is_empty() {
            warn!("no multipart boundary in response ({}), content type: {:?}", status, content_type);
        } else {
            debug!("response {} with multipart boundary {:?}", status, boundary);
        }

        self.buffer.encoding = helpers::encoding_for(content_type, &self.options.default_charset);
        self.boundary = Some(boundary);
    }

    fn parse_new_entries(&mut self) -> Vec<Entry> {
        let boundary = self.boundary.as_deref().unwrap_or_default();
        let text = self.buffer.text();
        let entries = crate::parse_entries(&text, boundary, self.delivered);

        for entry in &entries {
            if let Some(key) = entry.key(&self.options.key_header) {
                self.entries.insert(key, entry.clone());
            }
        }

        trace!(
            "parsed {} new entries from {} bytes, {} delivered before",
            entries.len(),
            self.buffer.buf.len(),
            self.delivered
        );

        entries
    }
}

impl<'r> Stream for Load<'r> {
    type Item = crate::Result<LoadEvent>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if this.stage == LoadStage::Eof {
                return Poll::Ready(None);
            }

            let event = match this.events.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(event))) => event,
                Poll::Ready(Some(Err(err))) => {
                    warn!("multipart load failed: {}", err);
                    this.stage = LoadStage::Eof;
                    return Poll::Ready(Some(Err(err)));
                }
                Poll::Ready(None) => {
                    debug!("transport stopped before completing the exchange");
                    this.stage = LoadStage::Eof;
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            };

            match event {
                TransportEvent::Headers { status, headers } => {
                    this.on_headers(status, &headers);
                    this.stage = LoadStage::ReceivingBody;
                }
                TransportEvent::Body(chunk) => {
                    if this.stage == LoadStage::AwaitingHeaders {
                        warn!("response body arrived before its headers");
                        this.stage = LoadStage::ReceivingBody;
                    }

                    if let Err(err) = this.buffer.extend(&chunk) {
                        this.stage = LoadStage::Eof;
                        return Poll::Ready(Some(Err(err)));
                    }

                    let entries = this.parse_new_entries();
                    let progress = Progress {
                        delivered: this.delivered,
                        entries,
                    };
                    this.delivered += progress.entries.len();

                    return Poll::Ready(Some(Ok(LoadEvent::Progress(progress))));
                }
                TransportEvent::Complete => {
                    let entries = this.parse_new_entries();
                    this.delivered += entries.len();
                    this.stage = LoadStage::Eof;

                    debug!("multipart load complete with {} entries", this.delivered);

                    let entries = std::mem::take(&mut this.entries);
                    return Poll::Ready(Some(Ok(LoadEvent::Complete(entries))));
                }
            }
        }
    }
}
