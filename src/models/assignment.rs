//! Plan assignments (which routine and nutrition plan a user follows).

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{NutritionPlan, Routine};

/// Kind of plan that can be assigned to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Workout,
    Nutrition,
}

impl PlanType {
    pub const fn as_str(self) -> &'static str {
        match self {
            PlanType::Workout => "workout",
            PlanType::Nutrition => "nutrition",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plans currently assigned to one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserPlans {
    #[serde(default)]
    pub workout_plans: Vec<Routine>,
    #[serde(default)]
    pub nutrition_plans: Vec<NutritionPlan>,
}

impl UserPlans {
    /// Number of active assignments of the given type.
    pub fn count(&self, plan_type: PlanType) -> usize {
        match plan_type {
            PlanType::Workout => self.workout_plans.len(),
            PlanType::Nutrition => self.nutrition_plans.len(),
        }
    }
}

/// Acknowledgement returned by assign/unassign endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentAck {
    #[serde(default)]
    pub message: String,
}
