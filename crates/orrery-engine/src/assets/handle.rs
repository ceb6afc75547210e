use std::fmt;
use std::sync::{Arc, Mutex};

/// Resolution state of an asynchronously loading asset.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AssetStatus {
    /// Load in progress; owners render from their placeholder state.
    Pending,
    Ready,
    /// Load failed. A failure is a value, never a crash; the owning node
    /// simply keeps its placeholder.
    Failed(String),
}

#[derive(Debug)]
struct HandleState {
    uri: String,
    status: AssetStatus,
}

/// Shared handle to an asset owned by the resource-loader collaborator.
///
/// This core never interprets asset bytes; it only tracks resolution so
/// renderers know when a placeholder is still needed. Clones share one
/// state.
///
/// Settlement is expected to be marshalled onto the frame thread, never
/// interleaved with a resolve pass.
#[derive(Debug, Clone)]
pub struct AssetHandle {
    inner: Arc<Mutex<HandleState>>,
}

impl AssetHandle {
    /// Creates a handle in the `Pending` state.
    pub fn pending(uri: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HandleState {
                uri: uri.into(),
                status: AssetStatus::Pending,
            })),
        }
    }

    pub fn uri(&self) -> String {
        self.lock().uri.clone()
    }

    pub fn status(&self) -> AssetStatus {
        self.lock().status.clone()
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.status() == AssetStatus::Ready
    }

    /// Marks the asset loaded. A handle settles at most once; later calls
    /// are ignored.
    pub fn fulfill(&self) {
        let mut state = self.lock();
        if state.status != AssetStatus::Pending {
            log::warn!("asset {} already settled; fulfill ignored", state.uri);
            return;
        }
        state.status = AssetStatus::Ready;
    }

    /// Marks the load failed. A handle settles at most once; later calls
    /// are ignored.
    pub fn fail(&self, reason: impl Into<String>) {
        let mut state = self.lock();
        if state.status != AssetStatus::Pending {
            log::warn!("asset {} already settled; fail ignored", state.uri);
            return;
        }
        let reason = reason.into();
        log::warn!("asset {} failed to load: {reason}", state.uri);
        state.status = AssetStatus::Failed(reason);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HandleState> {
        self.inner
            .lock()
            .expect("asset handle state is never poisoned: settlement does not panic")
    }
}

impl fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        write!(f, "{} ({:?})", state.uri, state.status)
    }
}
