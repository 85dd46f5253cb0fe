//! Stale-view signals.
//!
//! After a mutation commits, the engine tells an [`Invalidation`] sink which
//! collections of which user changed, so cached views of them can be
//! refreshed. The sink knows nothing about how those views are rendered.

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Transactions,
    Budgets,
    Goals,
    Alerts,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::Budgets => "budgets",
            Self::Goals => "goals",
            Self::Alerts => "alerts",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Invalidation: Send + Sync + fmt::Debug {
    fn invalidate(&self, user_id: &str, collections: &[Collection]);
}

/// Default sink: records the signal in the trace log.
#[derive(Debug, Default)]
pub struct LogInvalidation;

impl Invalidation for LogInvalidation {
    fn invalidate(&self, user_id: &str, collections: &[Collection]) {
        for collection in collections {
            tracing::debug!(user = user_id, %collection, "view invalidated");
        }
    }
}

/// Sink that keeps every signal it receives.
#[derive(Clone, Debug, Default)]
pub struct RecordingInvalidation {
    events: Arc<Mutex<Vec<(String, Collection)>>>,
}

impl RecordingInvalidation {
    pub fn events(&self) -> Vec<(String, Collection)> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Invalidation for RecordingInvalidation {
    fn invalidate(&self, user_id: &str, collections: &[Collection]) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.extend(collections.iter().map(|c| (user_id.to_string(), *c)));
    }
}
