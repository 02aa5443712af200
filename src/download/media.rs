//! Media file downloading.

use std::path::PathBuf;

use futures::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::api::client::describe;
use crate::api::PostClient;
use crate::download::pool::ConnectionPool;
use crate::download::task::DownloadTask;
use crate::error::{Error, Result};

/// Download one media file to its destination.
///
/// Holds a pool slot for the URL's scheme for the duration of the request.
/// The destination is created or overwritten; a partially written file is
/// removed when the transfer fails.
pub async fn download_media_item(
    client: &PostClient,
    pool: &ConnectionPool,
    task: &DownloadTask,
) -> Result<PathBuf> {
    let _permit = pool.acquire(&task.source_url).await?;

    tracing::info!(
        "Downloading {} -> {}",
        task.source_url,
        task.destination.display()
    );

    let response = client.download_file(&task.source_url).await?;

    if let Err(e) = write_body(response, task).await {
        if tokio::fs::remove_file(&task.destination).await.is_ok() {
            tracing::debug!("Removed partial file {}", task.destination.display());
        }
        return Err(e);
    }

    Ok(task.destination.clone())
}

/// Stream the response body to the destination file.
async fn write_body(response: reqwest::Response, task: &DownloadTask) -> Result<()> {
    let url = task.source_url.as_str();
    let write_error = |e: std::io::Error| {
        Error::download(
            url,
            format!("could not write {}: {}", task.destination.display(), e),
        )
    };

    let mut file = File::create(&task.destination).await.map_err(write_error)?;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::download(url, describe(&e)))?;
        file.write_all(&chunk).await.map_err(write_error)?;
    }

    file.flush().await.map_err(write_error)?;

    Ok(())
}
