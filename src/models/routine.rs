// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout routines (the backend also calls them workout plans).

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
pub struct Routine {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub trainer_id: Option<u64>,
    /// Exercises in the order they are performed
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl Routine {
    /// Total number of sets across all exercises.
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.sets).sum()
    }
}

/// Exercise inside a routine.
///
/// Summary views omit `rest_time` and `description`, so everything except
/// the name is defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Exercise {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sets: u32,
    #[serde(default)]
    pub reps: u32,
    /// Rest between sets, seconds
    #[serde(default)]
    pub rest_time: u32,
}

/// Create/update body for a routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RoutinePayload {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning trainer; only admins set this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer_id: Option<u64>,
    #[validate(length(min = 1, message = "at least one exercise is required"), nested)]
    pub exercises: Vec<ExerciseInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ExerciseInput {
    #[validate(length(min = 1, max = 255, message = "exercise name is required"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "sets must be positive"))]
    pub sets: u32,
    #[validate(range(min = 1, message = "reps must be positive"))]
    pub reps: u32,
    pub rest_time: u32,
}

impl From<&Exercise> for ExerciseInput {
    fn from(exercise: &Exercise) -> Self {
        Self {
            name: exercise.name.clone(),
            description: exercise.description.clone(),
            sets: exercise.sets,
            reps: exercise.reps,
            rest_time: exercise.rest_time,
        }
    }
}
