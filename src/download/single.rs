//! Single post download pipeline.
//!
//! Fetch the page, locate the embedded post data, extract the media URLs and
//! download them. Each of the first three stages ends the run with its own
//! error; the download stage always completes and reports per-item results.

use std::collections::HashSet;
use std::path::Path;

use crate::api::{locate_post_media, PostClient};
use crate::config::Config;
use crate::download::batch::{download_batch, failure_reason};
use crate::download::pool::ConnectionPool;
use crate::download::state::{BatchReport, FailedDownload};
use crate::download::task::DownloadTask;
use crate::error::{Error, Result};
use crate::media::extract_media_urls;

/// Fetch a post page and return the direct URLs of its media.
///
/// Fails with [`Error::Fetch`], one of the payload errors, or
/// [`Error::NoMedia`] when the post yields no downloadable URL.
pub async fn fetch_media_urls(client: &PostClient, post_url: &str) -> Result<Vec<String>> {
    let document = client.fetch_page(post_url).await?;

    let node = locate_post_media(&document).map_err(|e| {
        tracing::error!("Could not extract post data from {}: {}", post_url, e);
        e
    })?;
    drop(document);

    let urls = extract_media_urls(&node);
    if urls.is_empty() {
        return Err(Error::NoMedia(post_url.to_string()));
    }

    tracing::info!("Found {} media items in post", urls.len());

    Ok(urls)
}

/// Turn media URLs into download tasks.
///
/// URLs that cannot be mapped to a file in `save_dir` are returned as
/// failures instead of tasks. So is every URL whose file name was already
/// claimed by an earlier URL of the batch; the first one keeps the path.
pub fn plan_downloads(urls: &[String], save_dir: &Path) -> (Vec<DownloadTask>, Vec<FailedDownload>) {
    let mut tasks = Vec::with_capacity(urls.len());
    let mut rejected = Vec::new();
    let mut claimed = HashSet::new();

    for url in urls {
        match DownloadTask::new(url, save_dir) {
            Ok(task) if !claimed.insert(task.destination.clone()) => {
                tracing::warn!(
                    "Skipping {}: {} is already the destination of an earlier item",
                    url,
                    task.destination.display()
                );
                rejected.push(FailedDownload {
                    url: url.clone(),
                    destination: Some(task.destination),
                    reason: "same file name as an earlier item of the post".to_string(),
                });
            }
            Ok(task) => tasks.push(task),
            Err(e) => {
                let reason = failure_reason(e);
                tracing::warn!("Skipping {}: {}", url, reason);
                rejected.push(FailedDownload {
                    url: url.clone(),
                    destination: None,
                    reason,
                });
            }
        }
    }

    (tasks, rejected)
}

/// Download every media item of a single post into the configured directory.
pub async fn download_post(
    client: &PostClient,
    pool: &ConnectionPool,
    config: &Config,
    post_url: &str,
) -> Result<BatchReport> {
    let save_dir = config.download_directory()?;

    let urls = fetch_media_urls(client, post_url).await?;
    let (tasks, rejected) = plan_downloads(&urls, save_dir);

    let mut report = download_batch(client, pool, &tasks, config.options.show_downloads).await;
    for failure in rejected {
        report.record_failure(failure);
    }

    tracing::info!(
        "Done: {} downloaded, {} failed",
        report.downloaded_count(),
        report.failed_count()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use mockito::{Server, ServerGuard};

    fn page(media_json: &str) -> String {
        format!(
            r#"<!DOCTYPE html><html><head><title>post</title></head><body>
<script type="text/javascript">window.__bufferedData = [];</script>
<script type="text/javascript">window._sharedData = {{"config":{{"viewer":null}},"entry_data":{{"PostPage":[{{"graphql":{{"shortcode_media":{}}}}}]}}}};</script>
</body></html>"#,
            media_json
        )
    }

    async fn serve_page(server: &mut ServerGuard, body: String) -> mockito::Mock {
        server
            .mock("GET", "/p/ABC123/")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(body)
            .create_async()
            .await
    }

    fn config_for(dir: &Path) -> Config {
        let mut config = Config::default();
        config.options.download_directory = Some(dir.to_path_buf());
        config
    }

    fn client() -> PostClient {
        PostClient::new(&HttpConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_single_image_post_downloads_widest_variant() {
        let mut server = Server::new_async().await;
        let base = server.url();
        let media = format!(
            r#"{{"__typename":"GraphImage","is_video":false,"display_resources":[
                {{"src":"{base}/media/a.jpg?x=1","config_width":480}},
                {{"src":"{base}/media/b.jpg?x=1","config_width":1080}},
                {{"src":"{base}/media/c.jpg?x=1","config_width":1080}}]}}"#
        );
        let _page = serve_page(&mut server, page(&media)).await;
        let image = server
            .mock("GET", "/media/c.jpg")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("jpeg bytes")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let report = download_post(
            &client(),
            &ConnectionPool::new(5),
            &config_for(dir.path()),
            &format!("{}/p/ABC123/", base),
        )
        .await
        .unwrap();

        image.assert_async().await;
        assert_eq!(report.downloaded, vec![dir.path().join("c.jpg")]);
        assert!(!report.has_failures());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("c.jpg")).unwrap(),
            "jpeg bytes"
        );
    }

    #[tokio::test]
    async fn test_carousel_skips_unresolvable_child() {
        let mut server = Server::new_async().await;
        let base = server.url();
        let media = format!(
            r#"{{"__typename":"GraphSidecar","edge_sidecar_to_children":{{"edges":[
                {{"node":{{"__typename":"GraphImage","is_video":false,"display_resources":[{{"src":"{base}/media/0.jpg"}}]}}}},
                {{"node":{{"__typename":"GraphVideo","is_video":true,"video_url":"{base}/media/1.mp4"}}}},
                {{"node":{{"__typename":"GraphImage","is_video":false,"display_resources":[
                    {{"src":"{base}/media/2_small.jpg","config_width":320}},
                    {{"src":"{base}/media/2.jpg","config_width":1080}}]}}}}]}}}}"#
        );
        let _page = serve_page(&mut server, page(&media)).await;

        let urls = fetch_media_urls(&client(), &format!("{}/p/ABC123/", base))
            .await
            .unwrap();

        assert_eq!(
            urls,
            vec![format!("{}/media/1.mp4", base), format!("{}/media/2.jpg", base)]
        );
    }

    #[tokio::test]
    async fn test_item_failure_still_completes() {
        let mut server = Server::new_async().await;
        let base = server.url();
        let media = format!(
            r#"{{"__typename":"GraphSidecar","edge_sidecar_to_children":{{"edges":[
                {{"node":{{"is_video":true,"video_url":"{base}/media/1.mp4"}}}},
                {{"node":{{"is_video":true,"video_url":"{base}/media/2.mp4"}}}}]}}}}"#
        );
        let _page = serve_page(&mut server, page(&media)).await;
        let _ok = server
            .mock("GET", "/media/1.mp4")
            .with_status(200)
            .with_body("video one")
            .create_async()
            .await;
        let _broken = server
            .mock("GET", "/media/2.mp4")
            .with_status(503)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let report = download_post(
            &client(),
            &ConnectionPool::new(5),
            &config_for(dir.path()),
            &format!("{}/p/ABC123/", base),
        )
        .await
        .unwrap();

        assert_eq!(report.downloaded_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(dir.path().join("1.mp4").exists());
    }

    #[tokio::test]
    async fn test_fetch_failure() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/p/ABC123/")
            .with_status(404)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let err = download_post(
            &client(),
            &ConnectionPool::new(5),
            &config_for(dir.path()),
            &format!("{}/p/ABC123/", server.url()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_login_wall_is_extraction_error() {
        let mut server = Server::new_async().await;
        let body = r#"<html><body><script>window._sharedData = {"entry_data":{"LoginAndSignupPage":[{}]}};</script></body></html>"#;
        let _page = serve_page(&mut server, body.to_string()).await;

        let err = fetch_media_urls(&client(), &format!("{}/p/ABC123/", server.url()))
            .await
            .unwrap_err();

        assert!(err.is_extraction_error());
        assert!(matches!(err, Error::PayloadShape(_)));
    }

    #[tokio::test]
    async fn test_no_media() {
        let mut server = Server::new_async().await;
        let media = r#"{"__typename":"GraphImage","is_video":false,"display_resources":[]}"#;
        let _page = serve_page(&mut server, page(media)).await;

        let dir = tempfile::tempdir().unwrap();
        let err = download_post(
            &client(),
            &ConnectionPool::new(5),
            &config_for(dir.path()),
            &format!("{}/p/ABC123/", server.url()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::NoMedia(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_plan_downloads_rejects_unnamed_urls() {
        let urls = vec![
            "https://cdn.example.com/v/one.jpg?a=b".to_string(),
            "https://cdn.example.com/".to_string(),
        ];
        let (tasks, rejected) = plan_downloads(&urls, Path::new("/media"));

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].destination, Path::new("/media/one.jpg"));
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].url, "https://cdn.example.com/");
        assert_eq!(rejected[0].destination, None);
    }

    #[test]
    fn test_plan_downloads_rejects_duplicate_names() {
        let urls = vec![
            "https://cdn-a.example.com/v/photo.jpg?sig=1".to_string(),
            "https://cdn-b.example.com/w/photo.jpg?sig=2".to_string(),
            "https://cdn-a.example.com/v/other.jpg".to_string(),
        ];
        let (tasks, rejected) = plan_downloads(&urls, Path::new("/media"));

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].source_url.as_str(), urls[0]);
        assert_eq!(tasks[1].destination, Path::new("/media/other.jpg"));
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].url, urls[1]);
        assert_eq!(
            rejected[0].destination.as_deref(),
            Some(Path::new("/media/photo.jpg"))
        );
    }

    #[tokio::test]
    async fn test_duplicate_name_keeps_first_download() {
        let mut server = Server::new_async().await;
        let base = server.url();
        let media = format!(
            r#"{{"__typename":"GraphSidecar","edge_sidecar_to_children":{{"edges":[
                {{"node":{{"is_video":true,"video_url":"{base}/a/clip.mp4"}}}},
                {{"node":{{"is_video":true,"video_url":"{base}/b/clip.mp4"}}}}]}}}}"#
        );
        let _page = serve_page(&mut server, page(&media)).await;
        let _first = server
            .mock("GET", "/a/clip.mp4")
            .with_status(200)
            .with_body("first clip")
            .create_async()
            .await;
        let second = server
            .mock("GET", "/b/clip.mp4")
            .with_status(500)
            .expect(0)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let report = download_post(
            &client(),
            &ConnectionPool::new(5),
            &config_for(dir.path()),
            &format!("{}/p/ABC123/", base),
        )
        .await
        .unwrap();

        second.assert_async().await;
        assert_eq!(report.downloaded, vec![dir.path().join("clip.mp4")]);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("clip.mp4")).unwrap(),
            "first clip"
        );
    }
}
