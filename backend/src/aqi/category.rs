//! Severity categories for AQI values.
//!
//! Two independent scales are kept on purpose: the fine-grained 7-tier scale
//! used to label forecast points, and the standard 6-tier EPA scale used for
//! the current-AQI pill. They disagree on thresholds and must not be merged.

use serde::Serialize;

/// A severity tier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AqiCategory {
    /// Position in the scale, 0 = best
    pub tier: u8,
    pub label: &'static str,
    pub color: &'static str,
    pub advisory: &'static str,
}

struct Tier {
    /// Inclusive upper bound; `None` for the open-ended last tier
    upper: Option<f64>,
    category: AqiCategory,
}

const fn tier(upper: Option<f64>, n: u8, label: &'static str, color: &'static str, advisory: &'static str) -> Tier {
    Tier {
        upper,
        category: AqiCategory {
            tier: n,
            label,
            color,
            advisory,
        },
    }
}

static FINE_GRAINED: [Tier; 7] = [
    tier(Some(12.0), 0, "Excellent", "#00E400", "Ideal air quality"),
    tier(Some(35.4), 1, "Good", "#FFFF00", "Air quality is acceptable"),
    tier(Some(55.4), 2, "Acceptable", "#FF7E00", "Sensitive groups should limit prolonged activity"),
    tier(Some(150.4), 3, "Moderate", "#FF0000", "Everyone may experience health effects"),
    tier(Some(250.4), 4, "Poor", "#99004C", "Health alert: everyone may experience serious effects"),
    tier(Some(350.4), 5, "Very Poor", "#7E0023", "Health emergency alert"),
    tier(None, 6, "Hazardous", "#4C0026", "Health warning of emergency conditions"),
];

static STANDARD: [Tier; 6] = [
    tier(Some(50.0), 0, "Good", "#00E400", "Air quality is satisfactory"),
    tier(Some(100.0), 1, "Moderate", "#FFFF00", "Acceptable; unusually sensitive people should limit exertion"),
    tier(Some(150.0), 2, "Unhealthy for Sensitive Groups", "#FF7E00", "Sensitive groups may experience health effects"),
    tier(Some(200.0), 3, "Unhealthy", "#FF0000", "Everyone may begin to experience health effects"),
    tier(Some(300.0), 4, "Very Unhealthy", "#8F3F97", "Health alert: risk of health effects is increased for everyone"),
    tier(None, 5, "Hazardous", "#7E0023", "Health warning of emergency conditions"),
];

/// Which category table to classify against.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryScale {
    /// 7 tiers with pollutant-style thresholds (12, 35.4, 55.4, ...)
    FineGrained,
    /// 6 tiers with the standard AQI thresholds (50, 100, 150, 200, 300)
    Standard,
}

impl CategoryScale {
    fn tiers(self) -> &'static [Tier] {
        match self {
            CategoryScale::FineGrained => &FINE_GRAINED,
            CategoryScale::Standard => &STANDARD,
        }
    }

    /// All categories of this scale, best first.
    pub fn categories(self) -> impl Iterator<Item = AqiCategory> {
        self.tiers().iter().map(|t| t.category)
    }

    /// Classify a value. Values below zero land in the first tier, NaN in the
    /// last.
    pub fn classify(self, value: f64) -> AqiCategory {
        let tiers = self.tiers();
        tiers
            .iter()
            .find(|t| t.upper.is_some_and(|upper| value <= upper))
            .unwrap_or(&tiers[tiers.len() - 1])
            .category
    }
}

/// Classify on the fine-grained 7-tier scale.
pub fn classify(value: f64) -> AqiCategory {
    CategoryScale::FineGrained.classify(value)
}

/// Classify on the standard 6-tier AQI scale.
pub fn classify_standard(aqi: u16) -> AqiCategory {
    CategoryScale::Standard.classify(aqi as f64)
}
