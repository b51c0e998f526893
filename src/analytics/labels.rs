//! Qualitative labels shown beside summary figures

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    High,
    Moderate,
    Steady,
}

impl ActivityLevel {
    pub fn from_transactions(count: u64) -> Self {
        if count > 100 {
            ActivityLevel::High
        } else if count > 50 {
            ActivityLevel::Moderate
        } else {
            ActivityLevel::Steady
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ActivityLevel::High => "High activity period",
            ActivityLevel::Moderate => "Moderate activity",
            ActivityLevel::Steady => "Steady activity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaVolume {
    High,
    Moderate,
    Steady,
}

impl AreaVolume {
    pub fn from_area(area_sold: f64) -> Self {
        if area_sold > 10_000.0 {
            AreaVolume::High
        } else if area_sold > 5_000.0 {
            AreaVolume::Moderate
        } else {
            AreaVolume::Steady
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AreaVolume::High => "High volume activity",
            AreaVolume::Moderate => "Moderate trading",
            AreaVolume::Steady => "Steady market",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertySize {
    Large,
    Medium,
    Compact,
}

impl PropertySize {
    pub fn from_average(size: f64) -> Self {
        if size > 500.0 {
            PropertySize::Large
        } else if size > 200.0 {
            PropertySize::Medium
        } else {
            PropertySize::Compact
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PropertySize::Large => "Large properties",
            PropertySize::Medium => "Medium properties",
            PropertySize::Compact => "Compact properties",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLabel {
    StrongUpward,
    Correction,
    Stable,
}

impl TrendLabel {
    /// Moves larger than 5% either way are called out; unknown change is stable
    pub fn from_change(change: Option<f64>) -> Self {
        match change {
            Some(value) if value.abs() > 5.0 && value >= 0.0 => TrendLabel::StrongUpward,
            Some(value) if value.abs() > 5.0 => TrendLabel::Correction,
            _ => TrendLabel::Stable,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TrendLabel::StrongUpward => "Strong upward trend",
            TrendLabel::Correction => "Market correction",
            TrendLabel::Stable => "Stable vs previous period",
        }
    }
}
