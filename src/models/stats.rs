//! Dashboard aggregates computed by the backend.
//!
//! These are read-only; the client only caches and displays them.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Trainer dashboard (`/trainer/dashboard/stats`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrainerStats {
    #[serde(default)]
    pub total_stats: TotalStats,
    #[serde(default)]
    pub completion_rates: CompletionRates,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TotalStats {
    #[serde(default)]
    pub users: u32,
    #[serde(default)]
    pub workout_plans: u32,
    #[serde(default)]
    pub nutrition_plans: u32,
    /// Users who logged progress in the last 30 days
    #[serde(default)]
    pub active_users: u32,
}

/// Plan adherence, percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CompletionRates {
    #[serde(default)]
    pub workout: f64,
    #[serde(default)]
    pub nutrition: f64,
}

/// One point of the user's progress chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressPoint {
    /// ISO 8601 date
    pub date: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub body_fat: Option<f64>,
    #[serde(default)]
    pub workouts_completed: u32,
}

/// User dashboard progress (`/user/progress/stats?range=`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressStats {
    #[serde(default)]
    pub points: Vec<ProgressPoint>,
    #[serde(default)]
    pub completion_rates: CompletionRates,
}
