//! Worry submission on the entry screen.

use std::sync::Arc;
use std::time::Duration;

use cosmos_core::audio::{AudioAsset, AudioPreloader};
use cosmos_core::timing::{PRELOAD_TIMEOUT_UNITS, units};
use cosmos_core::{CosmosError, Result, Route, Session};

/// How audio preloading ended. Every outcome lets the run start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadOutcome {
    Loaded,
    Failed,
    TimedOut,
}

/// Result of a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub route: Route,
    pub preload: PreloadOutcome,
}

/// Turns the entry form into a started session.
pub struct EntryUseCase {
    preloader: Arc<dyn AudioPreloader>,
    asset: AudioAsset,
    preload_timeout: Duration,
}

impl EntryUseCase {
    pub fn new(preloader: Arc<dyn AudioPreloader>, asset: AudioAsset) -> Self {
        Self {
            preloader,
            asset,
            preload_timeout: units(PRELOAD_TIMEOUT_UNITS),
        }
    }

    pub fn with_preload_timeout(mut self, timeout: Duration) -> Self {
        self.preload_timeout = timeout;
        self
    }

    /// Validates the worry, starts a fresh session and waits for the audio.
    ///
    /// Only empty input is rejected. On success the session holds the worry
    /// exactly as typed and is active, and the caller should navigate to the
    /// returned route.
    pub async fn submit(&self, session: &mut Session, worry: &str) -> Result<Submission> {
        if worry.is_empty() {
            tracing::debug!("[Entry] Rejected empty worry");
            return Err(CosmosError::EmptyWorry);
        }

        session.reset();
        session.set_worry(worry);
        session.start();
        tracing::info!("[Entry] Worry submitted ({} chars)", worry.chars().count());

        let preload = self.preload().await;
        Ok(Submission {
            route: Route::Meditation,
            preload,
        })
    }

    /// Preloads the asset, giving up after the timeout.
    pub async fn preload(&self) -> PreloadOutcome {
        match tokio::time::timeout(self.preload_timeout, self.preloader.preload(&self.asset)).await
        {
            Ok(Ok(())) => {
                tracing::debug!("[Entry] Audio preloaded");
                PreloadOutcome::Loaded
            }
            Ok(Err(e)) => {
                tracing::warn!("[Entry] Audio preload failed, continuing: {}", e);
                PreloadOutcome::Failed
            }
            Err(_) => {
                tracing::warn!(
                    "[Entry] Audio preload timed out after {:?}, continuing",
                    self.preload_timeout
                );
                PreloadOutcome::TimedOut
            }
        }
    }
}
