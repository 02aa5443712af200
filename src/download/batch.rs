//! Concurrent download of a whole post.

use futures::future::join_all;

use crate::api::PostClient;
use crate::download::media::download_media_item;
use crate::download::pool::ConnectionPool;
use crate::download::state::{BatchReport, FailedDownload};
use crate::download::task::DownloadTask;
use crate::error::Error;

/// Download every task concurrently and wait for all of them.
///
/// Concurrency is bounded only by the pool. A failed task is logged and
/// recorded in the report; it never cancels or fails its siblings.
pub async fn download_batch(
    client: &PostClient,
    pool: &ConnectionPool,
    tasks: &[DownloadTask],
    show_downloads: bool,
) -> BatchReport {
    let downloads = tasks.iter().map(|task| async move {
        let result = download_media_item(client, pool, task).await;

        match &result {
            Ok(path) if show_downloads => {
                tracing::info!("Downloaded {} -> {}", task.source_url, path.display())
            }
            Ok(path) => tracing::debug!("Downloaded {} -> {}", task.source_url, path.display()),
            Err(e) => tracing::warn!(
                "Failed to download {} -> {}: {}",
                task.source_url,
                task.destination.display(),
                e
            ),
        }

        (task, result)
    });

    let mut report = BatchReport::default();

    for (task, result) in join_all(downloads).await {
        match result {
            Ok(path) => report.record_success(path),
            Err(e) => report.record_failure(FailedDownload {
                url: task.source_url.to_string(),
                destination: Some(task.destination.clone()),
                reason: failure_reason(e),
            }),
        }
    }

    report
}

/// The cause of a per-item failure, without repeating the URL.
pub(crate) fn failure_reason(err: Error) -> String {
    match err {
        Error::Download { reason, .. } => reason,
        other => other.to_string(),
    }
}
