//! # Listing
//!
//! Holds the authoritative snapshot of one fetched collection plus the busy
//! flag for its in-flight load.
//!
//! ```text
//! begin_load() ──► epoch N, loading = true
//!       │
//!       ▼
//! finish_load(N, Ok(items))  ──► items replaced, loading = false
//! finish_load(N, Err(e))     ──► items kept,     loading = false, last_error set
//! finish_load(M < N, _)      ──► discarded (stale), nothing changes
//! ```
//!
//! There is no cancellation. A reload issued while another is outstanding
//! bumps the epoch, so whichever response belongs to the latest request is the
//! only one applied, and that same response clears the busy flag.

use log::{debug, info, warn};

use crate::api::ApiError;

/// Identifies one load request.
pub type Epoch = u64;

/// What `finish_load` did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Items replaced with this many entries.
    Applied(usize),
    /// Request failed; previous items kept.
    Failed,
    /// Response belonged to a superseded request and was dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct Listing<T> {
    items: Vec<T>,
    loading: bool,
    epoch: Epoch,
    revision: u64,
    last_error: Option<String>,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Listing<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            epoch: 0,
            revision: 0,
            last_error: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Bumped every time a load replaces the items.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Message from the most recent failed load, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start a new request. The returned epoch must be handed back to `finish_load`.
    pub fn begin_load(&mut self) -> Epoch {
        self.epoch += 1;
        self.loading = true;
        debug!("Listing load started (epoch={})", self.epoch);
        self.epoch
    }

    pub fn finish_load(&mut self, epoch: Epoch, result: Result<Vec<T>, ApiError>) -> LoadOutcome {
        if epoch != self.epoch {
            debug!(
                "Discarding stale listing response (epoch={}, current={})",
                epoch, self.epoch
            );
            return LoadOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(items) => {
                let count = items.len();
                info!("Listing loaded {} items (epoch={})", count, epoch);
                self.items = items;
                self.revision += 1;
                self.last_error = None;
                LoadOutcome::Applied(count)
            }
            Err(e) => {
                warn!("Listing load failed (epoch={}): {}", epoch, e);
                self.last_error = Some(e.to_string());
                LoadOutcome::Failed
            }
        }
    }
}
