//! Crop scoring and recommendation models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::WaterRequirement;

/// The four independent factors of the suitability score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    PlantingWindow,
    Temperature,
    Rainfall,
    HistoricalSuccess,
}

impl Factor {
    /// Maximum points the factor can contribute
    pub fn max_points(&self) -> f64 {
        match self {
            Factor::PlantingWindow => 40.0,
            Factor::Temperature => 30.0,
            Factor::Rainfall => 20.0,
            Factor::HistoricalSuccess => 10.0,
        }
    }
}

/// Which branch of a factor fired
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FactorOutcome {
    /// Best branch of the factor
    Matched,
    /// Partial credit
    Acceptable,
    /// Worst branch of the factor
    Unmatched,
    /// Required history was missing; a neutral value was substituted
    DataUnavailable,
}

/// Points and explanation for one factor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactorScore {
    pub factor: Factor,
    pub outcome: FactorOutcome,
    pub points: f64,
    pub reason: String,
}

/// Suitability category derived from the total score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    /// Score >= 85
    HighlyRecommended,
    /// Score >= 70
    Recommended,
    /// Score >= 50
    ModeratelySuitable,
    /// Score < 50
    NotRecommended,
}

impl RecommendationCategory {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            RecommendationCategory::HighlyRecommended
        } else if score >= 70.0 {
            RecommendationCategory::Recommended
        } else if score >= 50.0 {
            RecommendationCategory::ModeratelySuitable
        } else {
            RecommendationCategory::NotRecommended
        }
    }

    /// Sort priority, 1 is best
    pub fn priority(&self) -> u8 {
        match self {
            RecommendationCategory::HighlyRecommended => 1,
            RecommendationCategory::Recommended => 2,
            RecommendationCategory::ModeratelySuitable => 3,
            RecommendationCategory::NotRecommended => 4,
        }
    }
}

impl std::fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationCategory::HighlyRecommended => write!(f, "Highly Recommended"),
            RecommendationCategory::Recommended => write!(f, "Recommended"),
            RecommendationCategory::ModeratelySuitable => write!(f, "Moderately Suitable"),
            RecommendationCategory::NotRecommended => write!(f, "Not Recommended"),
        }
    }
}

/// Total suitability of one crop for one target month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropScore {
    pub score: f64,
    pub category: RecommendationCategory,
    /// One entry per factor, in scoring order
    pub factors: Vec<FactorScore>,
}

impl CropScore {
    pub fn priority(&self) -> u8 {
        self.category.priority()
    }

    pub fn reasons(&self) -> Vec<String> {
        self.factors.iter().map(|f| f.reason.clone()).collect()
    }

    pub fn factor(&self, factor: Factor) -> Option<&FactorScore> {
        self.factors.iter().find(|f| f.factor == factor)
    }
}

/// How an expected harvest was estimated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HarvestMethod {
    /// Heat accumulation against the day-of-year climatology
    Gdd,
    /// Growing season length in whole months
    Calendar,
}

/// Expected harvest for a recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HarvestEstimate {
    pub method: HarvestMethod,
    /// Projected calendar date, only for GDD projections
    pub date: Option<NaiveDate>,
    pub month: u32,
    pub days: u32,
    /// "Nov 15 (95 days)" or "Jul (~90 days)"
    pub display: String,
}

/// A ranked crop recommendation with its display fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub crop: String,
    pub score: f64,
    pub category: RecommendationCategory,
    pub priority: u8,
    pub reasons: Vec<String>,
    pub factors: Vec<FactorScore>,
    pub water_requirement: WaterRequirement,
    pub soil_type: String,
    pub growing_days: u32,
    pub expected_harvest: HarvestEstimate,
    pub season: String,
    pub description: String,
    pub optimal_planting: Vec<u32>,
    pub optimal_planting_text: String,
}
