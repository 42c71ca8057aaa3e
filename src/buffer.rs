use std::borrow::Cow;

use bytes::BytesMut;
use encoding_rs::{Encoding, UTF_8};

/// Accumulates the raw response body as it arrives.
#[derive(Debug)]
pub(crate) struct ResponseBuffer {
    pub(crate) buf: BytesMut,
    pub(crate) encoding: &'static Encoding,
    pub(crate) whole_stream_size_limit: u64,
    pub(crate) stream_size_counter: u64,
}

impl ResponseBuffer {
    pub fn new(whole_stream_size_limit: u64) -> Self {
        ResponseBuffer {
            buf: BytesMut::new(),
            encoding: UTF_8,
            whole_stream_size_limit,
            stream_size_counter: 0,
        }
    }

    pub fn extend(&mut self, chunk: &[u8]) -> crate::Result<()> {
        self.stream_size_counter += chunk.len() as u64;

        if self.stream_size_counter > self.whole_stream_size_limit {
            return Err(crate::Error::StreamSizeExceeded {
                limit: self.whole_stream_size_limit,
            });
        }

        self.buf.extend_from_slice(chunk);
        Ok(())
    }

    /// Decodes everything received so far.
    ///
    /// A multi-byte character cut at the end of the buffer decodes to a
    /// replacement character, which only ever lands in a section that isn't
    /// finished yet.
    pub fn text(&self) -> Cow<'_, str> {
        let (text, _, _) = self.encoding.decode(&self.buf);
        text
    }
}
