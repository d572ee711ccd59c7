//! Draining attachment streams into memory.

use crate::{Error, Result};
use futures::{Stream, StreamExt};
use std::fmt::Display;
use std::path::Path;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::{debug, warn};

/// Reads `stream` to the end and returns every chunk concatenated in order.
///
/// When `persist_to` is given the bytes are also written there as they
/// arrive. A persistence failure is logged and abandons the copy on disk,
/// but the returned bytes are still complete. A stream error fails the whole
/// fetch: partial content is never returned.
pub async fn drain<S, B, E>(stream: S, persist_to: Option<&Path>) -> Result<Vec<u8>>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut stream = std::pin::pin!(stream);
    let mut file = match persist_to {
        Some(path) => open_copy(path).await,
        None => None,
    };

    let mut data = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::retrieval(format!("content stream failed: {}", e)))?;
        let bytes = chunk.as_ref();

        let write_error = match file.as_mut() {
            Some(f) => f.write_all(bytes).await.err(),
            None => None,
        };
        if let Some(e) = write_error {
            warn!("Failed to persist downloaded content, continuing in memory: {}", e);
            file = None;
        }

        data.extend_from_slice(bytes);
    }

    if let Some(mut f) = file {
        if let Err(e) = f.flush().await {
            warn!("Failed to flush downloaded content: {}", e);
        }
    }

    debug!("Drained {} bytes of content", data.len());
    Ok(data)
}

async fn open_copy(path: &Path) -> Option<File> {
    match File::create(path).await {
        Ok(file) => Some(file),
        Err(e) => {
            warn!("Cannot persist content to {}: {}", path.display(), e);
            None
        }
    }
}
