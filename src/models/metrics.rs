// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Body-metric snapshots and the progress figures derived from them.
//!
//! Snapshots are append-only per user. BMI is normally computed by the
//! backend; the helpers here fill it in when it is missing and summarize a
//! history for the progress charts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// One body-metrics measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MetricSnapshot {
    #[serde(default)]
    pub id: Option<u64>,
    pub user_id: u64,
    pub date: NaiveDate,
    /// kg
    #[serde(default)]
    pub weight: Option<f64>,
    /// Percent
    #[serde(default)]
    pub body_fat: Option<f64>,
    /// kg
    #[serde(default)]
    pub muscle_mass: Option<f64>,
    /// Meters
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MetricSnapshot {
    /// BMI as reported, or derived from weight and height.
    pub fn bmi_or_derived(&self) -> Option<f64> {
        self.bmi
            .or_else(|| bmi(self.weight?, self.height?))
    }
}

/// Body for recording a new snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct MetricInput {
    #[validate(range(exclusive_min = 0.0, max = 500.0, message = "weight must be positive"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0, message = "body fat is a percentage"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<f64>,
    #[validate(range(min = 0.0, message = "muscle mass cannot be negative"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_mass: Option<f64>,
    #[validate(range(exclusive_min = 0.0, max = 3.0, message = "height is in meters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Time window for metric and progress charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Year,
    All,
}

impl TimeRange {
    pub const fn as_str(self) -> &'static str {
        match self {
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
            TimeRange::All => "all",
        }
    }

    /// First day included in the window ending at `today`.
    pub fn start_date(self, today: NaiveDate) -> Option<NaiveDate> {
        let days = match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Year => 365,
            TimeRange::All => return None,
        };
        today.checked_sub_days(chrono::Days::new(days))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend progress figures for one user (`/metrics/user/{id}/progress`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProgress {
    #[serde(default)]
    pub total_workouts: u32,
    #[serde(default)]
    pub completed_workouts: u32,
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub initial_weight: Option<f64>,
    #[serde(default)]
    pub current_weight: Option<f64>,
    #[serde(default)]
    pub weight_change: Option<f64>,
    #[serde(default)]
    pub initial_body_fat: Option<f64>,
    #[serde(default)]
    pub current_body_fat: Option<f64>,
    #[serde(default)]
    pub body_fat_change: Option<f64>,
}

/// Progress between the first and last snapshot of a history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub initial_weight: Option<f64>,
    pub current_weight: Option<f64>,
    pub weight_change: Option<f64>,
    pub initial_body_fat: Option<f64>,
    pub current_body_fat: Option<f64>,
    pub body_fat_change: Option<f64>,
    pub initial_date: NaiveDate,
    pub current_date: NaiveDate,
    pub days_tracked: i64,
}

impl ProgressSummary {
    /// Summarize a history in any order. Returns `None` when it is empty.
    pub fn from_snapshots(snapshots: &[MetricSnapshot]) -> Option<Self> {
        let initial = snapshots.iter().min_by_key(|s| s.date)?;
        let current = snapshots.iter().max_by_key(|s| s.date)?;

        Some(Self {
            initial_weight: initial.weight,
            current_weight: current.weight,
            weight_change: change(initial.weight, current.weight),
            initial_body_fat: initial.body_fat,
            current_body_fat: current.body_fat,
            body_fat_change: change(initial.body_fat, current.body_fat),
            initial_date: initial.date,
            current_date: current.date,
            days_tracked: (current.date - initial.date).num_days(),
        })
    }
}

/// Body mass index from weight (kg) and height (m).
pub fn bmi(weight_kg: f64, height_m: f64) -> Option<f64> {
    if weight_kg <= 0.0 || height_m <= 0.0 {
        return None;
    }
    Some(round2(weight_kg / (height_m * height_m)))
}

fn change(initial: Option<f64>, current: Option<f64>) -> Option<f64> {
    Some(round2(current? - initial?))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
