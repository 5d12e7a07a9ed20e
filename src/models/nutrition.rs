//! Nutrition plans and their meals.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NutritionPlan {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub trainer_id: Option<u64>,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

impl NutritionPlan {
    /// Daily calories across all meals (kcal).
    pub fn total_calories(&self) -> f64 {
        self.meals.iter().map(|m| m.calories).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Meal {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub calories: f64,
    /// Grams
    #[serde(default)]
    pub protein: f64,
    /// Grams
    #[serde(default)]
    pub carbs: f64,
    /// Grams
    #[serde(default)]
    pub fats: f64,
    #[serde(default)]
    pub time_of_day: Option<String>,
}

/// Create/update body for a nutrition plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NutritionPlanPayload {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning trainer; only admins set this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer_id: Option<u64>,
    #[validate(length(min = 1, message = "at least one meal is required"), nested)]
    pub meals: Vec<MealInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct MealInput {
    #[validate(length(min = 1, max = 255, message = "meal name is required"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "calories cannot be negative"))]
    pub calories: f64,
    #[validate(range(min = 0.0, message = "protein cannot be negative"))]
    pub protein: f64,
    #[validate(range(min = 0.0, message = "carbs cannot be negative"))]
    pub carbs: f64,
    #[validate(range(min = 0.0, message = "fats cannot be negative"))]
    pub fats: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
}

impl From<&Meal> for MealInput {
    fn from(meal: &Meal) -> Self {
        Self {
            name: meal.name.clone(),
            description: meal.description.clone(),
            calories: meal.calories,
            protein: meal.protein,
            carbs: meal.carbs,
            fats: meal.fats,
            time_of_day: meal.time_of_day.clone(),
        }
    }
}
