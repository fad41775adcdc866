use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::{ReadError, WorkoutID};

pub const DEFAULT_PERIOD_DAYS: u32 = 30;

#[allow(async_fn_in_trait)]
pub trait AnalyticsService {
    async fn get_workout_analytics(&self, id: WorkoutID) -> Result<WorkoutAnalytics, ReadError>;
    async fn get_user_progress(&self, days: u32) -> Result<UserProgress, ReadError>;
    async fn get_strength_progress(&self, days: u32) -> Result<StrengthProgress, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait AnalyticsRepository {
    async fn read_workout_analytics(&self, id: WorkoutID) -> Result<WorkoutAnalytics, ReadError>;
    async fn read_user_progress(&self, days: u32) -> Result<UserProgress, ReadError>;
    async fn read_strength_progress(&self, days: u32) -> Result<StrengthProgress, ReadError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutAnalytics {
    pub workout_id: WorkoutID,
    pub date: Option<NaiveDateTime>,
    pub total_volume: f32,
    pub total_sets: u32,
    pub total_reps: u32,
    pub exercises: Vec<ExerciseAnalytics>,
    pub muscle_group_volume: BTreeMap<String, f32>,
    pub intensity_score: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseAnalytics {
    pub exercise_name: String,
    pub muscle_group: String,
    pub volume: f32,
    pub max_weight: f32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserProgress {
    pub period: String,
    pub total_workouts: u32,
    pub total_volume_kg: f32,
    pub avg_volume_per_workout: f32,
    pub consistency_score: f32,
    pub muscle_group_distribution: BTreeMap<String, f32>,
    pub weekly_progress: Vec<WeeklyProgress>,
    pub error: Option<String>,
}

impl UserProgress {
    /// No workouts were recorded in the period.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_workouts == 0
    }

    /// Muscle groups with the largest share first.
    #[must_use]
    pub fn muscle_groups_by_share(&self) -> Vec<(&str, f32)> {
        let mut groups = self
            .muscle_group_distribution
            .iter()
            .map(|(muscle, share)| (muscle.as_str(), *share))
            .collect::<Vec<_>>();
        groups.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(b.0)));
        groups
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyProgress {
    pub week: String,
    pub workouts: u32,
    pub volume: f32,
    pub avg_volume_per_workout: f32,
}

/// Best set of each tracked exercise, keyed by exercise name.
pub type StrengthProgress = BTreeMap<String, ExerciseStrength>;

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseStrength {
    pub best_weight: f32,
    pub best_reps: u32,
    pub estimated_1rm: f32,
    pub date: NaiveDateTime,
}
