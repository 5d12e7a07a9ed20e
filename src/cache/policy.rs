// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Which cached reads a write makes stale.
//!
//! Invalidation is by family, never by exact key: the set of keys a write
//! could affect downstream (every `user-plans` entry that might embed a
//! deleted routine, say) is not enumerable on the client.

use crate::cache::Family;

/// Every write the resource handles can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Write {
    CreateUser,
    UpdateUser,
    DeleteUser,
    CreateTrainer,
    UpdateTrainer,
    DeleteTrainer,
    CreateRoutine,
    UpdateRoutine,
    DeleteRoutine,
    CreateNutritionPlan,
    UpdateNutritionPlan,
    DeleteNutritionPlan,
    AssignPlan,
    UnassignPlan,
    RecordMetrics,
    UpdateProfile,
    UpdateGoals,
}

impl Write {
    pub const ALL: [Write; 17] = [
        Write::CreateUser,
        Write::UpdateUser,
        Write::DeleteUser,
        Write::CreateTrainer,
        Write::UpdateTrainer,
        Write::DeleteTrainer,
        Write::CreateRoutine,
        Write::UpdateRoutine,
        Write::DeleteRoutine,
        Write::CreateNutritionPlan,
        Write::UpdateNutritionPlan,
        Write::DeleteNutritionPlan,
        Write::AssignPlan,
        Write::UnassignPlan,
        Write::RecordMetrics,
        Write::UpdateProfile,
        Write::UpdateGoals,
    ];

    /// Family this write mutates.
    pub const fn family(self) -> Family {
        stale_families(self)[0]
    }
}

/// Families to mark stale after `write` succeeds. The written family is first.
pub const fn stale_families(write: Write) -> &'static [Family] {
    use Family::*;

    match write {
        Write::CreateUser => &[Users, TrainerStats],
        Write::UpdateUser => &[Users, UserProfile],
        Write::DeleteUser => &[
            Users,
            UserPlans,
            UserMetrics,
            UserProgress,
            UserReport,
            TrainerStats,
        ],
        // Users list their trainer.
        Write::CreateTrainer | Write::UpdateTrainer | Write::DeleteTrainer => &[Trainers, Users],
        Write::CreateRoutine => &[Routines, TrainerStats],
        Write::UpdateRoutine | Write::DeleteRoutine => &[Routines, UserPlans, TrainerStats],
        Write::CreateNutritionPlan => &[NutritionPlans, TrainerStats],
        Write::UpdateNutritionPlan | Write::DeleteNutritionPlan => {
            &[NutritionPlans, UserPlans, TrainerStats]
        }
        Write::AssignPlan | Write::UnassignPlan => &[UserPlans, Users, TrainerStats],
        Write::RecordMetrics => &[UserMetrics, UserProgress, UserReport, ProgressStats],
        Write::UpdateProfile => &[UserProfile, Users],
        Write::UpdateGoals => &[UserProfile, ProgressStats, UserProgress],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_write_invalidates_its_own_family() {
        for write in Write::ALL {
            let families = stale_families(write);
            assert!(!families.is_empty(), "{write:?} invalidates nothing");
            assert_eq!(families[0], write.family());
        }
    }

    #[test]
    fn test_plan_content_changes_reach_user_plans() {
        for write in [
            Write::UpdateRoutine,
            Write::DeleteRoutine,
            Write::UpdateNutritionPlan,
            Write::DeleteNutritionPlan,
            Write::AssignPlan,
            Write::UnassignPlan,
            Write::DeleteUser,
        ] {
            assert!(
                stale_families(write).contains(&Family::UserPlans),
                "{write:?} must stale user-plans"
            );
        }
    }

    #[test]
    fn test_metric_writes_reach_progress() {
        let families = stale_families(Write::RecordMetrics);
        assert!(families.contains(&Family::UserProgress));
        assert!(families.contains(&Family::UserReport));
    }
}
