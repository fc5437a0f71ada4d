//! Scripted chunk source for driving stream sessions in tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;

use crate::traits::{ChunkSource, HttpError};

/// How a [`ScriptedSource`] behaves once its chunks run out.
#[derive(Debug, Clone)]
enum Ending {
    Close,
    Fail(HttpError),
    Hang,
}

/// Replays a fixed list of chunks, then closes, fails or hangs.
///
/// # Example
///
/// ```ignore
/// use shopbot::adapters::mock::ScriptedSource;
///
/// let mut source = ScriptedSource::new(["data: {\"response\": \"Hel", "lo\"}\n"]);
/// let summary = session.run(&mut source, &CancellationToken::new()).await;
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    chunks: VecDeque<Bytes>,
    ending: Ending,
    reads: usize,
}

impl ScriptedSource {
    /// Yield `chunks`, then report a normal close.
    pub fn new<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Bytes>,
    {
        Self {
            chunks: chunks.into_iter().map(Into::into).collect(),
            ending: Ending::Close,
            reads: 0,
        }
    }

    /// Fail with `error` after the chunks instead of closing.
    pub fn then_fail(mut self, error: HttpError) -> Self {
        self.ending = Ending::Fail(error);
        self
    }

    /// Never return after the chunks, like a server that stopped sending.
    pub fn then_hang(mut self) -> Self {
        self.ending = Ending::Hang;
        self
    }

    /// Number of `read` calls made so far.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

#[async_trait]
impl ChunkSource for ScriptedSource {
    async fn read(&mut self) -> Result<Option<Bytes>, HttpError> {
        self.reads += 1;
        if let Some(chunk) = self.chunks.pop_front() {
            return Ok(Some(chunk));
        }
        match &self.ending {
            Ending::Close => Ok(None),
            Ending::Fail(err) => Err(err.clone()),
            Ending::Hang => std::future::pending().await,
        }
    }
}
