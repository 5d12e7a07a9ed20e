// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Body-metric history, progress and reports for one user.

use crate::api::ApiRequest;
use crate::cache::{Family, QueryKey, Write};
use crate::error::ApiError;
use crate::models::{MetricInput, MetricSnapshot, ProgressSummary, TimeRange, UserProgress};
use crate::resources::validate;
use crate::FitCoach;
use chrono::Local;

pub struct Metrics<'a> {
    fc: &'a FitCoach,
}

impl<'a> Metrics<'a> {
    pub(crate) fn new(fc: &'a FitCoach) -> Self {
        Self { fc }
    }

    /// `["user-metrics", user_id, range]`
    pub fn history_key(&self, user_id: u64, range: TimeRange) -> QueryKey {
        Family::UserMetrics.key().with(user_id).with(range)
    }

    /// Snapshots for `user_id` within `range`, newest first as the backend
    /// returns them. Missing BMI values are derived from weight and height.
    pub async fn history(
        &self,
        user_id: u64,
        range: TimeRange,
    ) -> Result<Vec<MetricSnapshot>, ApiError> {
        let mut request = ApiRequest::get(metrics_path(user_id)).query("range", range.as_str());
        if let Some(start) = range.start_date(Local::now().date_naive()) {
            request = request.query("start_date", start.to_string());
        }

        let mut snapshots: Vec<MetricSnapshot> =
            self.fc.read(self.history_key(user_id, range), request).await?;
        for snapshot in &mut snapshots {
            snapshot.bmi = snapshot.bmi_or_derived();
        }
        Ok(snapshots)
    }

    /// Backend progress figures (`["user-progress", user_id]`).
    pub async fn progress(&self, user_id: u64) -> Result<UserProgress, ApiError> {
        let request = ApiRequest::get(format!("/metrics/user/{}/progress", user_id));
        self.fc
            .read(Family::UserProgress.key().with(user_id), request)
            .await
    }

    /// Progress computed locally from the history in `range`.
    pub async fn summary(
        &self,
        user_id: u64,
        range: TimeRange,
    ) -> Result<Option<ProgressSummary>, ApiError> {
        let history = self.history(user_id, range).await?;
        Ok(ProgressSummary::from_snapshots(&history))
    }

    /// PDF progress report (`["user-report", user_id]`).
    pub async fn report(&self, user_id: u64) -> Result<Vec<u8>, ApiError> {
        let client = self.fc.client();
        self.fc
            .cache()
            .fetch(Family::UserReport.key().with(user_id), || async move {
                let mut request = ApiRequest::get(format!("/metrics/user/{}/report", user_id));
                let pdf = client.download(&mut request).await?;
                serde_json::to_value(pdf).map_err(|e| ApiError::Decode(e.to_string()))
            })
            .await
    }

    /// Record a new snapshot for `user_id`.
    pub async fn record(
        &self,
        user_id: u64,
        input: &MetricInput,
    ) -> Result<MetricSnapshot, ApiError> {
        validate(input)?;
        let request = ApiRequest::post(metrics_path(user_id)).json(input)?;
        self.fc.write(Write::RecordMetrics, request).await
    }
}

fn metrics_path(user_id: u64) -> String {
    format!("/metrics/user/{}/metrics", user_id)
}
