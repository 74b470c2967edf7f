//! Consumer for the server-sent progress event stream.

use std::pin::Pin;

use futures_util::{Stream, StreamExt};
use reqwest::Response;
use tracing::warn;

use grade_core::ProgressEvent;

use crate::error::StreamError;

type ByteStream = Pin<Box<dyn Stream<Item = reqwest::Result<bytes::Bytes>> + Send>>;

/// One open event-stream connection for one session.
///
/// The stream delivers `data: <json>` frames; each decoded frame is one
/// [`ProgressEvent`]. The connection is owned here and closed exactly once:
/// `close` is idempotent, so calling it again from a terminal event handler
/// after a reset already dropped the connection is safe.
pub struct ProgressStream {
    inner: Option<ByteStream>,
    buffer: Vec<u8>,
}

impl ProgressStream {
    pub(crate) fn new(response: Response) -> Self {
        Self {
            inner: Some(Box::pin(response.bytes_stream())),
            buffer: Vec::new(),
        }
    }

    #[cfg(test)]
    fn from_chunks(
        chunks: impl Stream<Item = reqwest::Result<bytes::Bytes>> + Send + 'static,
    ) -> Self {
        Self {
            inner: Some(Box::pin(chunks)),
            buffer: Vec::new(),
        }
    }

    /// Next decoded event, in arrival order.
    ///
    /// Returns `Ok(None)` once the connection is closed or the server ends
    /// the stream. Malformed or unrecognized payloads are logged and skipped
    /// rather than ending the session.
    ///
    /// # Errors
    ///
    /// Returns `StreamError::Transport` when the connection fails before a
    /// terminal event arrives; the stream is closed first.
    pub async fn next_event(&mut self) -> Result<Option<ProgressEvent>, StreamError> {
        loop {
            while let Some(newline_index) = self.buffer.iter().position(|byte| *byte == b'\n') {
                let line = self.buffer.drain(..=newline_index).collect::<Vec<_>>();
                if let Some(event) = decode_event_line(&line) {
                    return Ok(Some(event));
                }
            }

            let Some(stream) = self.inner.as_mut() else {
                return Ok(None);
            };

            match stream.next().await {
                Some(Ok(chunk)) => self.buffer.extend_from_slice(&chunk),
                Some(Err(error)) => {
                    self.close();
                    return Err(StreamError::Transport(error));
                }
                None => {
                    let remainder = std::mem::take(&mut self.buffer);
                    self.close();
                    if let Some(event) = decode_event_line(&remainder) {
                        return Ok(Some(event));
                    }
                    return Ok(None);
                }
            }
        }
    }

    /// Drop the connection. Idempotent.
    pub fn close(&mut self) {
        self.inner = None;
        self.buffer.clear();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }
}

fn decode_event_line(line: &[u8]) -> Option<ProgressEvent> {
    let Ok(line) = std::str::from_utf8(line) else {
        warn!("ignoring non-utf8 stream line");
        return None;
    };
    let line = line.trim();
    // Blank lines separate frames; lines starting with ':' are SSE comments.
    if line.is_empty() || line.starts_with(':') {
        return None;
    }
    let payload = line
        .strip_prefix("data:")
        .map_or(line, str::trim_start);

    match serde_json::from_str(payload) {
        Ok(event) => Some(event),
        Err(error) => {
            warn!(%error, payload, "ignoring malformed stream payload");
            None
        }
    }
}
