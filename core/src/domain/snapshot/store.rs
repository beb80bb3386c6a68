use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwap;

use crate::domain::snapshot::entities::{DirectoryView, Snapshot};

/// Identifies one `load_snapshot` run. Tokens are issued in strictly
/// increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunToken(u64);

impl RunToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct StoreState {
    run: u64,
    snapshot: Option<Arc<Snapshot>>,
    last_error: Option<String>,
}

/// Holds the published snapshot.
///
/// State is swapped as a unit, so readers never observe a snapshot from one
/// run paired with an error from another. Results from runs that were
/// superseded by a later `begin_run` are dropped.
#[derive(Debug)]
pub struct SnapshotStore {
    latest_run: AtomicU64,
    state: ArcSwap<StoreState>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            latest_run: AtomicU64::new(0),
            state: ArcSwap::from_pointee(StoreState::default()),
        }
    }

    pub fn begin_run(&self) -> RunToken {
        RunToken(self.latest_run.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, token: RunToken) -> bool {
        self.latest_run.load(Ordering::SeqCst) == token.0
    }

    /// Returns `false` when the run was superseded and nothing was stored.
    pub fn publish(&self, token: RunToken, snapshot: Arc<Snapshot>) -> bool {
        if !self.is_latest(token) {
            return false;
        }

        let mut published = false;
        self.state.rcu(|current| {
            if current.run > token.0 {
                published = false;
                return Arc::clone(current);
            }

            published = true;
            Arc::new(StoreState {
                run: token.0,
                snapshot: Some(Arc::clone(&snapshot)),
                last_error: None,
            })
        });

        published
    }

    /// Records a failed run. The previously published snapshot, if any, stays
    /// visible.
    pub fn record_failure(&self, token: RunToken, message: String) -> bool {
        if !self.is_latest(token) {
            return false;
        }

        let mut recorded = false;
        self.state.rcu(|current| {
            if current.run > token.0 {
                recorded = false;
                return Arc::clone(current);
            }

            recorded = true;
            Arc::new(StoreState {
                run: token.0,
                snapshot: current.snapshot.clone(),
                last_error: Some(message.clone()),
            })
        });

        recorded
    }

    pub fn view(&self) -> DirectoryView {
        let state = self.state.load();
        match (&state.snapshot, &state.last_error) {
            (Some(snapshot), _) => DirectoryView::Ready(Arc::clone(snapshot)),
            (None, Some(message)) => DirectoryView::Failed {
                message: message.clone(),
            },
            (None, None) => DirectoryView::Loading,
        }
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.load().last_error.clone()
    }
}
