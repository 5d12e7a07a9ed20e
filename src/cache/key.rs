// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Query keys and resource families.

use std::fmt;

/// Resource family: the first segment of every query key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Users,
    Trainers,
    Routines,
    NutritionPlans,
    UserPlans,
    UserMetrics,
    UserProgress,
    UserReport,
    UserProfile,
    ProgressStats,
    TrainerStats,
}

impl Family {
    pub const ALL: [Family; 11] = [
        Family::Users,
        Family::Trainers,
        Family::Routines,
        Family::NutritionPlans,
        Family::UserPlans,
        Family::UserMetrics,
        Family::UserProgress,
        Family::UserReport,
        Family::UserProfile,
        Family::ProgressStats,
        Family::TrainerStats,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Family::Users => "users",
            Family::Trainers => "trainers",
            Family::Routines => "routines",
            Family::NutritionPlans => "nutrition-plans",
            Family::UserPlans => "user-plans",
            Family::UserMetrics => "user-metrics",
            Family::UserProgress => "user-progress",
            Family::UserReport => "user-report",
            Family::UserProfile => "user-profile",
            Family::ProgressStats => "progress-stats",
            Family::TrainerStats => "trainer-stats",
        }
    }

    /// Key that prefixes every key of this family.
    pub fn key(self) -> QueryKey {
        QueryKey::new(self)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache key: a family followed by scoping parameters.
///
/// `["routines", "trainer"]`, `["user-metrics", "42", "month"]`. Keys compare
/// segment by segment, so a family-only key is a prefix of all its members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(family: Family) -> Self {
        Self(vec![family.as_str().to_string()])
    }

    /// Append a scoping segment.
    pub fn with(mut self, segment: impl fmt::Display) -> Self {
        self.0.push(segment.to_string());
        self
    }

    /// Family segment.
    pub fn family(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    /// True if every segment of `prefix` matches the start of this key.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl From<Family> for QueryKey {
    fn from(family: Family) -> Self {
        QueryKey::new(family)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}", segment)?;
        }
        f.write_str("]")
    }
}
