//! Session-scoped filter store
//!
//! Every mutation goes through a named operation, produces a new immutable
//! [`FilterSnapshot`] and synchronously notifies subscribers. The zone/region
//! consistency rule lives here and nowhere else.

use crate::catalog;
use crate::models::filter::{
    AdvancedFilterKind, AdvancedFilters, AdvancedFiltersPatch, FilterState, RangeFilter,
    Timeframe, AREA_RANGE_LIMITS, PRICE_RANGE_LIMITS,
};
use chrono::{Duration, NaiveDate};
use std::ops::Deref;
use std::sync::Arc;
use tracing::debug;

/// Source of "today" in the caller's local calendar
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Clock pinned to one date
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("date range start {from} is after end {to}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },
    #[error("{field} minimum {min} exceeds maximum {max}")]
    InvalidRange {
        field: &'static str,
        min: u64,
        max: u64,
    },
}

/// Immutable view of the filter state at one revision
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSnapshot {
    pub revision: u64,
    pub state: Arc<FilterState>,
}

impl Deref for FilterSnapshot {
    type Target = FilterState;

    fn deref(&self) -> &FilterState {
        &self.state
    }
}

pub type SubscriptionId = u64;

type Listener = Box<dyn Fn(&FilterSnapshot) + Send + Sync>;

pub struct FilterStore {
    current: FilterSnapshot,
    default_timeframe: Timeframe,
    clock: Arc<dyn Clock>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl FilterStore {
    /// Store with the 30-day default window
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_default_timeframe(clock, Timeframe::Days30)
    }

    pub fn with_default_timeframe(clock: Arc<dyn Clock>, default_timeframe: Timeframe) -> Self {
        let state = FilterState::initial(clock.today(), default_timeframe);
        Self {
            current: FilterSnapshot {
                revision: 0,
                state: Arc::new(state),
            },
            default_timeframe,
            clock,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    pub fn get_state(&self) -> FilterSnapshot {
        self.current.clone()
    }

    pub fn revision(&self) -> u64 {
        self.current.revision
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&FilterSnapshot) + Send + Sync + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Flip membership of a zone. Removing a zone drops its regions; with a
    /// non-empty zone set, regions outside the selected zones are dropped too.
    pub fn toggle_zone(&mut self, zone_id: &str) -> FilterSnapshot {
        self.update(|state| {
            if state.selected_zones.remove(zone_id) {
                state
                    .selected_regions
                    .retain(|region| catalog::zone_of(region) != Some(zone_id));
            } else {
                state.selected_zones.insert(zone_id.to_string());
            }
            if !state.selected_zones.is_empty() {
                let zones = &state.selected_zones;
                state.selected_regions.retain(|region| {
                    catalog::zone_of(region).is_some_and(|zone| zones.contains(zone))
                });
            }
        })
    }

    /// Flip membership of a region without validating it against the zone set
    pub fn toggle_region(&mut self, region_id: &str) -> FilterSnapshot {
        self.update(|state| {
            if !state.selected_regions.remove(region_id) {
                state.selected_regions.insert(region_id.to_string());
            }
        })
    }

    pub fn set_selected_regions<I, S>(&mut self, regions: I) -> FilterSnapshot
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let regions = regions.into_iter().map(Into::into).collect();
        self.update(|state| state.selected_regions = regions)
    }

    /// Rolling windows end today; `Custom` keeps the current dates
    pub fn set_timeframe(&mut self, timeframe: Timeframe) -> FilterSnapshot {
        let today = self.clock.today();
        self.update(|state| {
            state.timeframe = timeframe;
            if let Some(days) = timeframe.days() {
                state.date_from = today - Duration::days(days);
                state.date_to = today;
            }
        })
    }

    /// Does not touch the timeframe; pair with `set_timeframe(Custom)` when needed
    pub fn set_date_range(
        &mut self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<FilterSnapshot, StoreError> {
        if from > to {
            debug!(%from, %to, "Rejected inverted date range");
            return Err(StoreError::InvalidDateRange { from, to });
        }
        Ok(self.update(|state| {
            state.date_from = from;
            state.date_to = to;
        }))
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) -> FilterSnapshot {
        let query = query.into();
        self.update(|state| state.search_query = query)
    }

    pub fn clear_search(&mut self) -> FilterSnapshot {
        self.update(|state| state.search_query.clear())
    }

    /// Merge a partial update; the whole patch is rejected if any range is inverted
    pub fn set_advanced_filters(
        &mut self,
        patch: AdvancedFiltersPatch,
    ) -> Result<FilterSnapshot, StoreError> {
        if let Some(range) = patch.price_range {
            validate_range("priceRange", range)?;
        }
        if let Some(range) = patch.area_range {
            validate_range("areaRange", range)?;
        }
        Ok(self.update(|state| {
            let filters = &mut state.advanced_filters;
            if let Some(range) = patch.price_range {
                filters.price_range = range;
            }
            if let Some(range) = patch.area_range {
                filters.area_range = range;
            }
            if let Some(types) = patch.property_types {
                filters.property_types = types;
            }
            if let Some(types) = patch.transaction_types {
                filters.transaction_types = types;
            }
            if let Some(amenities) = patch.amenities {
                filters.amenities = amenities;
            }
            if let Some(sort_by) = patch.sort_by {
                filters.sort_by = sort_by;
            }
            if let Some(sort_order) = patch.sort_order {
                filters.sort_order = sort_order;
            }
        }))
    }

    /// Reset a range to its limits, or drop one categorical value (all when `value` is `None`)
    pub fn remove_advanced_filter(
        &mut self,
        kind: AdvancedFilterKind,
        value: Option<&str>,
    ) -> FilterSnapshot {
        self.update(|state| {
            let filters = &mut state.advanced_filters;
            let set = match kind {
                AdvancedFilterKind::PriceRange => {
                    filters.price_range = PRICE_RANGE_LIMITS;
                    return;
                }
                AdvancedFilterKind::AreaRange => {
                    filters.area_range = AREA_RANGE_LIMITS;
                    return;
                }
                AdvancedFilterKind::PropertyTypes => &mut filters.property_types,
                AdvancedFilterKind::TransactionTypes => &mut filters.transaction_types,
                AdvancedFilterKind::Amenities => &mut filters.amenities,
            };
            match value {
                Some(value) => {
                    set.remove(value);
                }
                None => set.clear(),
            }
        })
    }

    pub fn clear_advanced_filters(&mut self) -> FilterSnapshot {
        self.update(|state| state.advanced_filters = AdvancedFilters::default())
    }

    /// Clearing zones clears regions as well
    pub fn clear_zones(&mut self) -> FilterSnapshot {
        self.update(|state| {
            state.selected_zones.clear();
            state.selected_regions.clear();
        })
    }

    pub fn clear_regions(&mut self) -> FilterSnapshot {
        self.update(|state| state.selected_regions.clear())
    }

    /// Restore session defaults, re-anchored on today
    pub fn reset_all(&mut self) -> FilterSnapshot {
        let initial = FilterState::initial(self.clock.today(), self.default_timeframe);
        self.update(|state| *state = initial)
    }

    fn update(&mut self, mutate: impl FnOnce(&mut FilterState)) -> FilterSnapshot {
        let mut next = FilterState::clone(&self.current.state);
        mutate(&mut next);
        if next == *self.current.state {
            return self.current.clone();
        }

        self.current = FilterSnapshot {
            revision: self.current.revision + 1,
            state: Arc::new(next),
        };
        debug!(
            revision = self.current.revision,
            zones = self.current.selected_zones.len(),
            regions = self.current.selected_regions.len(),
            "Filter state updated"
        );
        for (_, listener) in &self.listeners {
            listener(&self.current);
        }
        self.current.clone()
    }
}

fn validate_range(field: &'static str, range: RangeFilter) -> Result<(), StoreError> {
    if range.min > range.max {
        debug!(field, min = range.min, max = range.max, "Rejected inverted range");
        return Err(StoreError::InvalidRange {
            field,
            min: range.min,
            max: range.max,
        });
    }
    Ok(())
}
