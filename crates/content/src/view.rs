//! Load lifecycle seen by the page: Idle -> Loading -> Ready | Failed.
//!
//! There is no retry transition. A new cycle needs a new [`ContentView`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use watchtonight_core::transform::TransformOptions;

use crate::aggregate::{ContentFeed, load_all_content};
use crate::source::ContentSource;

/// The only failure text users see, whatever went wrong.
pub const LOAD_FAILED_MESSAGE: &str = "Could not load content data.";

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready(ContentFeed),
    Failed(String),
}

impl LoadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

/// Shared load state plus a liveness flag.
///
/// Tearing the view down only stops the result from being stored; the
/// requests themselves run to completion.
#[derive(Clone)]
pub struct ContentView {
    state: Arc<RwLock<LoadState>>,
    alive: Arc<AtomicBool>,
}

impl Default for ContentView {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentView {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(LoadState::Idle)),
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub async fn state(&self) -> LoadState {
        self.state.read().await.clone()
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Start the aggregate load. Returns `None` if this view already left
    /// Idle or was torn down.
    pub async fn mount<S>(&self, source: Arc<S>, opts: TransformOptions) -> Option<JoinHandle<()>>
    where
        S: ContentSource + ?Sized + 'static,
    {
        {
            let mut state = self.state.write().await;
            if *state != LoadState::Idle || !self.is_alive() {
                return None;
            }
            *state = LoadState::Loading;
        }

        let view = self.clone();
        Some(tokio::spawn(async move {
            let result = load_all_content(source.as_ref(), &opts).await;
            let next = match result {
                Ok(feed) => LoadState::Ready(feed),
                Err(e) => {
                    warn!(error = %e, "content load failed");
                    LoadState::Failed(LOAD_FAILED_MESSAGE.to_string())
                }
            };

            let mut state = view.state.write().await;
            if view.is_alive() {
                *state = next;
            } else {
                debug!("view torn down, discarding load result");
            }
        }))
    }

    pub fn teardown(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
