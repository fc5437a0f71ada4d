//! [`ChunkSource`] over a streamed HTTP body.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;

use crate::traits::{ByteStream, ChunkSource, HttpError};

/// Adapts the [`ByteStream`] returned by
/// [`HttpClient::post_stream`](crate::traits::HttpClient::post_stream).
pub struct ByteStreamSource {
    stream: ByteStream,
}

impl ByteStreamSource {
    pub fn new(stream: ByteStream) -> Self {
        Self { stream }
    }
}

#[async_trait]
impl ChunkSource for ByteStreamSource {
    async fn read(&mut self) -> Result<Option<Bytes>, HttpError> {
        self.stream.next().await.transpose()
    }
}

impl std::fmt::Debug for ByteStreamSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteStreamSource").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_chunks_then_none() {
        let chunks: Vec<Result<Bytes, HttpError>> =
            vec![Ok(Bytes::from("data: a\n")), Ok(Bytes::from("data: b\n"))];
        let mut source = ByteStreamSource::new(Box::pin(futures::stream::iter(chunks)));

        assert_eq!(source.read().await.unwrap(), Some(Bytes::from("data: a\n")));
        assert_eq!(source.read().await.unwrap(), Some(Bytes::from("data: b\n")));
        assert_eq!(source.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_surfaces_stream_error() {
        let chunks = vec![
            Ok(Bytes::from("data: a\n")),
            Err(HttpError::Io("connection reset".to_string())),
        ];
        let mut source = ByteStreamSource::new(Box::pin(futures::stream::iter(chunks)));

        assert!(source.read().await.is_ok());
        assert!(matches!(source.read().await, Err(HttpError::Io(_))));
    }
}
