//! Per-panel fetch lifecycle and presentation models
//!
//! Each panel moves `Idle -> Loading -> {Success | NoData | Fallback}` and
//! re-enters `Loading` whenever the filter revision it depends on changes.
//! Responses issued for an older revision are discarded on arrival.

pub mod dashboard;
pub mod panels;

pub use dashboard::{Dashboard, DashboardView};
pub use panels::{
    DailyDigest, RegionBadge, RegionBoard, SummaryCards, TransactionRow, TrendChart, TrendPoint,
};

use crate::models::market::{
    DailyIntelligence, MarketSummary, RegionPriceList, Snapshot, TimeSeriesPoint, TopTransaction,
};
use serde::Serialize;
use tracing::debug;

/// Whether a successful payload has rows worth rendering
pub trait PanelData {
    fn has_data(&self) -> bool;
}

impl PanelData for MarketSummary {
    fn has_data(&self) -> bool {
        !self.is_empty()
    }
}

impl PanelData for Vec<TimeSeriesPoint> {
    fn has_data(&self) -> bool {
        !self.is_empty()
    }
}

impl PanelData for Vec<TopTransaction> {
    fn has_data(&self) -> bool {
        !self.is_empty()
    }
}

impl PanelData for RegionPriceList {
    fn has_data(&self) -> bool {
        self.entries.iter().any(|entry| entry.available)
    }
}

impl PanelData for DailyIntelligence {
    fn has_data(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchState<T> {
    Idle,
    Loading { revision: u64 },
    Success(Snapshot<T>),
    /// Live response with zero rows for the current filters
    NoData { revision: u64 },
    Fallback(Snapshot<T>),
}

impl<T> FetchState<T> {
    pub fn status(&self) -> &'static str {
        match self {
            FetchState::Idle => "idle",
            FetchState::Loading { .. } => "loading",
            FetchState::Success(_) => "success",
            FetchState::NoData { .. } => "no_data",
            FetchState::Fallback(_) => "fallback",
        }
    }

    pub fn revision(&self) -> Option<u64> {
        match self {
            FetchState::Idle => None,
            FetchState::Loading { revision } | FetchState::NoData { revision } => Some(*revision),
            FetchState::Success(snapshot) | FetchState::Fallback(snapshot) => {
                Some(snapshot.revision)
            }
        }
    }

    /// Payload to render, live or fallback
    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success(snapshot) | FetchState::Fallback(snapshot) => Some(&snapshot.data),
            _ => None,
        }
    }
}

/// One dashboard panel and the revision it is currently waiting on
#[derive(Debug, Clone)]
pub struct ViewPanel<T> {
    name: &'static str,
    state: FetchState<T>,
}

impl<T: PanelData> ViewPanel<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: FetchState::Idle,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Start loading `revision`. Refused when the panel already holds or is
    /// waiting on a newer revision.
    pub fn begin(&mut self, revision: u64) -> bool {
        if let Some(current) = self.state.revision() {
            if revision < current {
                debug!(panel = self.name, current, requested = revision, "Refused refresh for older revision");
                return false;
            }
        }
        self.state = FetchState::Loading { revision };
        true
    }

    /// Apply a response. Returns false and leaves the panel untouched when the
    /// snapshot was issued for a revision other than the one being loaded.
    pub fn resolve(&mut self, snapshot: Snapshot<T>) -> bool {
        let expected = match self.state {
            FetchState::Loading { revision } => revision,
            _ => {
                debug!(panel = self.name, revision = snapshot.revision, "Dropped response for panel that is not loading");
                return false;
            }
        };
        if snapshot.revision != expected {
            debug!(
                panel = self.name,
                expected,
                received = snapshot.revision,
                "Dropped stale response"
            );
            return false;
        }

        self.state = if snapshot.is_fallback() {
            FetchState::Fallback(snapshot)
        } else if snapshot.data.has_data() {
            FetchState::Success(snapshot)
        } else {
            FetchState::NoData {
                revision: snapshot.revision,
            }
        };
        true
    }
}
