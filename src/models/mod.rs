// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Records exchanged with the coaching backend.

pub mod assignment;
pub mod metrics;
pub mod nutrition;
pub mod routine;
pub mod session;
pub mod stats;
pub mod trainer;
pub mod user;

pub use assignment::{AssignmentAck, PlanType, UserPlans};
pub use metrics::{MetricInput, MetricSnapshot, ProgressSummary, TimeRange, UserProgress};
pub use nutrition::{Meal, MealInput, NutritionPlan, NutritionPlanPayload};
pub use routine::{Exercise, ExerciseInput, Routine, RoutinePayload};
pub use session::{Credential, Role, SessionUser};
pub use stats::{CompletionRates, ProgressPoint, ProgressStats, TotalStats, TrainerStats};
pub use trainer::{Trainer, TrainerPayload};
pub use user::{Goals, User, UserPayload};
