//! Test utilities for physique-client
//!
//! [`TestServer`] runs a router on an ephemeral port against a scratch
//! directory inside its own temporary directory, so each test can inspect
//! what the server left behind.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use physique_core::ScratchDir;
use tempfile::TempDir;
use tokio::net::TcpListener;

use crate::{ClientError, PhysiqueClient, Result};

/// Name of the scratch directory below the server's temporary root
const SCRATCH_SUBDIR: &str = "uploads";

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: PhysiqueClient,
    root: TempDir,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Start a server whose router is built around a fresh scratch directory
    ///
    /// # Example
    ///
    /// ```ignore
    /// use physique_client::testing::TestServer;
    /// use physique_api::{create_router, AppState};
    ///
    /// let server = TestServer::start(|scratch| create_router(AppState::new(scratch))).await?;
    /// let result = server.client.analyze_bytes("face.jpg", bytes).await?;
    /// assert!(server.scratch_entries().is_empty());
    /// ```
    pub async fn start<F>(build: F) -> Result<Self>
    where
        F: FnOnce(ScratchDir) -> axum::Router,
    {
        let root = tempfile::tempdir()?;
        let scratch = ScratchDir::open(root.path().join(SCRATCH_SUBDIR))
            .map_err(|e| ClientError::IoError(std::io::Error::other(e)))?;
        let router = build(scratch);

        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        let client = PhysiqueClient::with_config(
            &format!("http://{}", addr),
            Duration::from_secs(5),
            Duration::from_secs(2),
        )?;

        Ok(Self {
            addr,
            client,
            root,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// URL of the analysis endpoint
    pub fn analyze_url(&self) -> String {
        format!("{}/analyze", self.base_url())
    }

    /// Temporary directory holding the scratch directory
    ///
    /// Files written here sit outside the scratch directory.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Scratch directory the server stages uploads in
    pub fn scratch_path(&self) -> PathBuf {
        self.root.path().join(SCRATCH_SUBDIR)
    }

    /// Current entries of the scratch directory
    pub fn scratch_entries(&self) -> Vec<PathBuf> {
        match std::fs::read_dir(self.scratch_path()) {
            Ok(dir) => dir.filter_map(|e| e.ok().map(|e| e.path())).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Wait until the scratch directory is empty
    ///
    /// Cancelled requests release their staged file when the handler future
    /// is dropped, which can trail the response slightly. Returns `false` if
    /// entries remain after `timeout`.
    pub async fn wait_for_empty_scratch(&self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if self.scratch_entries().is_empty() {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[tokio::test]
    async fn test_server_owns_scratch_dir() {
        let server = TestServer::start(|scratch| {
            let staged_in = scratch.path().display().to_string();
            axum::Router::new().route("/where", get(move || async move { staged_in }))
        })
        .await
        .unwrap();

        let body = server
            .client
            .http_client()
            .get(format!("{}/where", server.base_url()))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert_eq!(PathBuf::from(body), server.scratch_path());
        assert!(server.scratch_path().starts_with(server.root()));
        assert!(server.scratch_entries().is_empty());

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_wait_for_empty_scratch_reports_leftovers() {
        let server = TestServer::start(|_| axum::Router::new()).await.unwrap();
        std::fs::write(server.scratch_path().join("left.upload"), b"x").unwrap();

        assert!(
            !server
                .wait_for_empty_scratch(Duration::from_millis(50))
                .await
        );

        std::fs::remove_file(server.scratch_path().join("left.upload")).unwrap();
        assert!(
            server
                .wait_for_empty_scratch(Duration::from_millis(50))
                .await
        );
    }
}
