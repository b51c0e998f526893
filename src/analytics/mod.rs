//! Derived metrics computed from gateway results
//!
//! Pure, synchronous functions; formatting helpers produce display strings
//! for the Indian numbering system.

pub mod change;
pub mod dates;
pub mod format;
pub mod labels;
pub mod regional;
pub mod scale;

pub use change::{latest_change, percent_change, reference_average, rolling_average};
pub use dates::{format_date, parse_date, DateParseError, SourceFormat};
pub use format::{format_area, format_currency_scale, format_indian_number, format_percent};
pub use labels::{ActivityLevel, AreaVolume, PropertySize, TrendLabel};
pub use regional::classify_against_average;
pub use scale::{bucket_badge_tier, normalized_position, value_bounds, BadgeTier, NEUTRAL_POSITION};
