// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Editable drafts for the routine and nutrition-plan forms.
//!
//! A draft holds free-form text as typed and a [`FieldArray`] of exercise or
//! meal rows. Nothing is checked while editing; [`RoutineDraft::into_payload`]
//! and [`NutritionPlanDraft::into_payload`] trim, validate and build the body
//! sent to the backend.

use crate::models::{
    ExerciseInput, MealInput, NutritionPlan, NutritionPlanPayload, Routine, RoutinePayload,
};
use validator::{Validate, ValidationErrors};

/// Ordered list of form rows with pure editing operations.
///
/// Every operation consumes the array and returns the edited one; an
/// out-of-range index returns it unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldArray<T> {
    items: Vec<T>,
}

impl<T> FieldArray<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn append(mut self, item: T) -> Self {
        self.items.push(item);
        self
    }

    #[must_use]
    pub fn remove(mut self, index: usize) -> Self {
        if index < self.items.len() {
            self.items.remove(index);
        }
        self
    }

    #[must_use]
    pub fn update(mut self, index: usize, f: impl FnOnce(&mut T)) -> Self {
        if let Some(item) = self.items.get_mut(index) {
            f(item);
        }
        self
    }

    /// Move the row at `from` so that it ends up at index `to`.
    #[must_use]
    pub fn move_item(mut self, from: usize, to: usize) -> Self {
        if from < self.items.len() && to < self.items.len() && from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
        }
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> From<Vec<T>> for FieldArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for FieldArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Routine form state.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineDraft {
    pub name: String,
    pub description: String,
    pub trainer_id: Option<u64>,
    pub exercises: FieldArray<ExerciseInput>,
}

impl Default for RoutineDraft {
    /// Empty form with one blank exercise row.
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            trainer_id: None,
            exercises: FieldArray::new().append(ExerciseInput::default()),
        }
    }
}

impl RoutineDraft {
    /// Pre-filled form for editing an existing routine.
    pub fn from_routine(routine: &Routine) -> Self {
        Self {
            name: routine.name.clone(),
            description: routine.description.clone().unwrap_or_default(),
            trainer_id: routine.trainer_id,
            exercises: routine.exercises.iter().map(ExerciseInput::from).collect(),
        }
    }

    pub fn into_payload(self) -> Result<RoutinePayload, ValidationErrors> {
        let payload = RoutinePayload {
            name: self.name.trim().to_string(),
            description: non_empty(self.description),
            trainer_id: self.trainer_id,
            exercises: self
                .exercises
                .into_vec()
                .into_iter()
                .map(|mut e| {
                    e.name = e.name.trim().to_string();
                    e.description = e.description.and_then(non_empty);
                    e
                })
                .collect(),
        };
        payload.validate()?;
        Ok(payload)
    }
}

/// Nutrition-plan form state.
#[derive(Debug, Clone, PartialEq)]
pub struct NutritionPlanDraft {
    pub name: String,
    pub description: String,
    pub trainer_id: Option<u64>,
    pub meals: FieldArray<MealInput>,
}

impl Default for NutritionPlanDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            trainer_id: None,
            meals: FieldArray::new().append(MealInput::default()),
        }
    }
}

impl NutritionPlanDraft {
    pub fn from_plan(plan: &NutritionPlan) -> Self {
        Self {
            name: plan.name.clone(),
            description: plan.description.clone().unwrap_or_default(),
            trainer_id: plan.trainer_id,
            meals: plan.meals.iter().map(MealInput::from).collect(),
        }
    }

    pub fn into_payload(self) -> Result<NutritionPlanPayload, ValidationErrors> {
        let payload = NutritionPlanPayload {
            name: self.name.trim().to_string(),
            description: non_empty(self.description),
            trainer_id: self.trainer_id,
            meals: self
                .meals
                .into_vec()
                .into_iter()
                .map(|mut m| {
                    m.name = m.name.trim().to_string();
                    m.description = m.description.and_then(non_empty);
                    m.time_of_day = m.time_of_day.and_then(non_empty);
                    m
                })
                .collect(),
        };
        payload.validate()?;
        Ok(payload)
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
