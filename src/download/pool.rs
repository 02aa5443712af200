//! Per-scheme connection admission.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use url::Url;

use crate::error::{Error, Result};

/// URL scheme class a download is admitted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// `https`
    Secure,
    /// `http`
    Insecure,
}

impl Scheme {
    /// Classify a URL, `None` for anything but http(s).
    pub fn of(url: &Url) -> Option<Self> {
        match url.scheme() {
            "https" => Some(Scheme::Secure),
            "http" => Some(Scheme::Insecure),
            _ => None,
        }
    }
}

/// Caps the number of in-flight downloads per scheme.
///
/// Constructed once per run and shared by every download of the batch;
/// a permit is held for the whole request and released on drop.
#[derive(Debug, Clone)]
pub struct ConnectionPool {
    secure: Arc<Semaphore>,
    insecure: Arc<Semaphore>,
    max_per_scheme: usize,
}

impl ConnectionPool {
    /// Create a pool admitting at most `max_per_scheme` requests per scheme.
    pub fn new(max_per_scheme: usize) -> Self {
        let max_per_scheme = max_per_scheme.max(1);
        Self {
            secure: Arc::new(Semaphore::new(max_per_scheme)),
            insecure: Arc::new(Semaphore::new(max_per_scheme)),
            max_per_scheme,
        }
    }

    /// The per-scheme cap.
    pub fn max_per_scheme(&self) -> usize {
        self.max_per_scheme
    }

    /// Free slots for a scheme.
    pub fn available(&self, scheme: Scheme) -> usize {
        self.semaphore(scheme).available_permits()
    }

    /// Wait for a slot matching the URL's scheme.
    pub async fn acquire(&self, url: &Url) -> Result<OwnedSemaphorePermit> {
        let scheme = Scheme::of(url).ok_or_else(|| {
            Error::download(
                url.as_str(),
                format!("unsupported URL scheme '{}'", url.scheme()),
            )
        })?;

        self.semaphore(scheme)
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| Error::download(url.as_str(), "connection pool closed"))
    }

    fn semaphore(&self, scheme: Scheme) -> &Arc<Semaphore> {
        match scheme {
            Scheme::Secure => &self.secure,
            Scheme::Insecure => &self.insecure,
        }
    }
}
