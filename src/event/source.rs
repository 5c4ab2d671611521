//! Input sources feeding the input loop.
//!
//! The input loop only knows [`InputSource`]: wait for the next event, and
//! flush whatever a decoder is holding back once the input timeout elapses.
//! Three sources are provided:
//!
//! - [`ByteSource`]: raw terminal bytes from any `AsyncRead` (stdin in raw
//!   mode, a pipe, a mock reader), decoded with [`InputDecoder`].
//! - [`CrosstermSource`]: crossterm's structured event stream.
//! - [`ChannelSource`]: events pushed through a channel, for headless runs.

use std::collections::VecDeque;
use std::future::Future;
use std::io;

use crossterm::event::EventStream;
use futures::StreamExt;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tracing::trace;

use super::decoder::InputDecoder;
use super::input::{from_crossterm, InputEvent};

/// Something the input loop can wait on.
///
/// `next_event` must be cancel-safe: the input loop races it against its
/// timeout and the shutdown signal, and drops it when either wins.
pub trait InputSource: Send {
    /// The next event, or `None` once the source is exhausted.
    fn next_event(&mut self) -> impl Future<Output = io::Result<Option<InputEvent>>> + Send;

    /// Events held back for disambiguation (a lone ESC), released after
    /// the input timeout passes with nothing new.
    fn flush_pending(&mut self) -> Vec<InputEvent> {
        Vec::new()
    }
}

// ---------------------------------------------------------------------------
// ByteSource
// ---------------------------------------------------------------------------

const READ_CHUNK: usize = 1024;

/// Decodes raw terminal bytes from a reader.
#[derive(Debug)]
pub struct ByteSource<R> {
    reader: R,
    decoder: InputDecoder,
    ready: VecDeque<InputEvent>,
    eof: bool,
}

impl<R: AsyncRead + Unpin + Send> ByteSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, decoder: InputDecoder::new(), ready: VecDeque::new(), eof: false }
    }
}

impl ByteSource<tokio::io::Stdin> {
    /// Read the process's standard input.
    pub fn stdin() -> Self {
        Self::new(tokio::io::stdin())
    }
}

impl<R: AsyncRead + Unpin + Send> InputSource for ByteSource<R> {
    async fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            if let Some(event) = self.ready.pop_front() {
                return Ok(Some(event));
            }
            if self.eof {
                return Ok(None);
            }
            let n = self.reader.read(&mut buf).await?;
            if n == 0 {
                self.eof = true;
                self.ready.extend(self.decoder.flush());
                continue;
            }
            trace!(bytes = n, "input read");
            self.ready.extend(self.decoder.feed(&buf[..n]));
        }
    }

    fn flush_pending(&mut self) -> Vec<InputEvent> {
        let mut events: Vec<InputEvent> = self.ready.drain(..).collect();
        events.extend(self.decoder.flush());
        events
    }
}

// ---------------------------------------------------------------------------
// CrosstermSource
// ---------------------------------------------------------------------------

/// Crossterm's async event stream. Crossterm resolves escape timing itself.
pub struct CrosstermSource {
    stream: EventStream,
}

impl CrosstermSource {
    pub fn new() -> Self {
        Self { stream: EventStream::new() }
    }
}

impl Default for CrosstermSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for CrosstermSource {
    async fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        loop {
            match self.stream.next().await {
                Some(Ok(event)) => {
                    if let Some(event) = from_crossterm(event) {
                        return Ok(Some(event));
                    }
                }
                Some(Err(err)) => return Err(err),
                None => return Ok(None),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ChannelSource
// ---------------------------------------------------------------------------

/// Events sent through an unbounded channel.
#[derive(Debug)]
pub struct ChannelSource {
    rx: mpsc::UnboundedReceiver<InputEvent>,
}

impl ChannelSource {
    /// A sender/source pair. The source ends when every sender is dropped.
    pub fn channel() -> (mpsc::UnboundedSender<InputEvent>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }
}

impl InputSource for ChannelSource {
    async fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        Ok(self.rx.recv().await)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
