use chrono::NaiveDateTime;
use derive_more::{Deref, Display};
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, Exercise, ExerciseID, FieldViolation, ReadError, SetField,
    SetValidity, UpdateError, validate,
};

pub const DEFAULT_WEIGHT: f32 = 0.0;
pub const DEFAULT_RIR: f32 = 2.0;
pub const MAX_WORKOUT_NAME_LENGTH: usize = 255;
pub const MAX_WORKOUT_NOTES_LENGTH: usize = 500;
pub const MAX_DURATION_MINUTES: u32 = 1440;

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError>;
    async fn create_workout(&self, workout: NewWorkout) -> Result<Workout, CreateError>;
    async fn replace_workout(
        &self,
        id: WorkoutID,
        workout: NewWorkout,
    ) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn read_workout(&self, id: WorkoutID) -> Result<Workout, ReadError>;
    async fn create_workout(&self, workout: NewWorkout) -> Result<Workout, CreateError>;
    async fn replace_workout(
        &self,
        id: WorkoutID,
        workout: NewWorkout,
    ) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

/// A workout as stored by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub name: String,
    pub notes: String,
    pub duration_minutes: Option<u32>,
    pub goal: TrainingGoal,
    pub date: NaiveDateTime,
    pub total_volume: Option<f32>,
    pub exercises: Vec<WorkoutExercise>,
}

impl Workout {
    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutExercise {
    pub id: WorkoutExerciseID,
    pub exercise: Exercise,
    pub order: u32,
    pub target_rir: Option<f32>,
    pub sets: Vec<SetValues>,
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(u32);

impl WorkoutID {
    #[must_use]
    pub fn nil() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for WorkoutID {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutExerciseID(u32);

impl From<u32> for WorkoutExerciseID {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[derive(
    StrumDisplay, EnumString, EnumIter, Debug, Default, Clone, Copy, Hash, PartialEq, Eq,
)]
#[strum(serialize_all = "lowercase")]
pub enum TrainingGoal {
    Strength,
    #[default]
    Hypertrophy,
    Endurance,
}

/// The values of a set as exchanged with the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetValues {
    pub set_number: u32,
    pub weight_kg: Option<f32>,
    pub reps: Option<i32>,
    pub rir: Option<f32>,
}

/// Identity of an entry in a draft, stable across reordering.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum EntryKey {
    Persisted(WorkoutExerciseID),
    Temporary(TempID),
}

#[derive(Deref, Display, Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct TempID(Uuid);

impl TempID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TempID {
    fn default() -> Self {
        Self::new()
    }
}

impl From<u128> for TempID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetEntry {
    pub set_number: u32,
    pub weight_kg: Option<f32>,
    pub reps: Option<i32>,
    pub rir: Option<f32>,
    pub validity: SetValidity,
}

impl SetEntry {
    #[must_use]
    pub fn new(
        set_number: u32,
        weight_kg: Option<f32>,
        reps: Option<i32>,
        rir: Option<f32>,
    ) -> Self {
        Self {
            set_number,
            weight_kg,
            reps,
            rir,
            validity: SetValidity::default(),
        }
    }

    #[must_use]
    pub fn values(&self) -> SetValues {
        SetValues {
            set_number: self.set_number,
            weight_kg: self.weight_kg,
            reps: self.reps,
            rir: self.rir,
        }
    }

    /// First field outside of its valid range, checked in the order weight, reps, RIR.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn violation(&self) -> Option<FieldViolation> {
        [
            (SetField::Weight, self.weight_kg),
            (SetField::Reps, self.reps.map(|r| r as f32)),
            (SetField::RIR, self.rir),
        ]
        .into_iter()
        .find_map(|(field, value)| validate(field, value).violation())
    }
}

impl From<SetValues> for SetEntry {
    fn from(value: SetValues) -> Self {
        Self::new(value.set_number, value.weight_kg, value.reps, value.rir)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutExerciseEntry {
    pub key: EntryKey,
    pub exercise: Exercise,
    pub order: usize,
    pub notes: String,
    pub target_rir: Option<f32>,
    pub sets: Vec<SetEntry>,
}

/// The workout being composed in the editor.
///
/// A draft lives as long as the editing session. It is never persisted locally, a reload
/// discards it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorkoutDraft {
    pub id: Option<WorkoutID>,
    pub name: String,
    pub goal: TrainingGoal,
    pub notes: String,
    pub duration_minutes: u32,
    pub exercises: Vec<WorkoutExerciseEntry>,
}

impl WorkoutDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    /// Payload for creating or replacing the workout on the backend.
    #[allow(clippy::cast_possible_truncation)]
    pub fn submission(&self) -> Result<NewWorkout, SubmitError> {
        let name = self.name.trim();

        if name.is_empty() {
            return Err(SubmitError::EmptyName);
        }

        let len = name.chars().count();

        if len > MAX_WORKOUT_NAME_LENGTH {
            return Err(SubmitError::NameTooLong(len));
        }

        let len = self.notes.chars().count();

        if len > MAX_WORKOUT_NOTES_LENGTH {
            return Err(SubmitError::NotesTooLong(len));
        }

        if self.duration_minutes > MAX_DURATION_MINUTES {
            return Err(SubmitError::DurationTooLong(self.duration_minutes));
        }

        if self.exercises.is_empty() {
            return Err(SubmitError::NoExercises);
        }

        for (exercise_idx, exercise) in self.exercises.iter().enumerate() {
            for (set_idx, set) in exercise.sets.iter().enumerate() {
                if let Some(violation) = set.violation() {
                    return Err(SubmitError::InvalidSet {
                        exercise: exercise_idx + 1,
                        set: set_idx + 1,
                        violation,
                    });
                }
            }
        }

        Ok(NewWorkout {
            name: name.to_string(),
            notes: self.notes.clone(),
            duration_minutes: self.duration_minutes,
            goal: self.goal,
            exercises: self
                .exercises
                .iter()
                .enumerate()
                .map(|(idx, e)| NewWorkoutExercise {
                    exercise_id: e.exercise.id,
                    order: idx as u32,
                    notes: e.notes.clone(),
                    target_rir: e.target_rir.unwrap_or(DEFAULT_RIR),
                    sets: e.sets.iter().map(SetEntry::values).collect(),
                })
                .collect(),
        })
    }
}

impl From<&Workout> for WorkoutDraft {
    fn from(value: &Workout) -> Self {
        let mut exercises = value.exercises.clone();
        exercises.sort_by_key(|e| e.order);
        Self {
            id: Some(value.id),
            name: value.name.clone(),
            goal: value.goal,
            notes: value.notes.clone(),
            duration_minutes: value.duration_minutes.unwrap_or_default(),
            exercises: exercises
                .into_iter()
                .enumerate()
                .map(|(idx, e)| WorkoutExerciseEntry {
                    key: EntryKey::Persisted(e.id),
                    exercise: e.exercise,
                    order: idx,
                    notes: String::new(),
                    target_rir: e.target_rir,
                    sets: e
                        .sets
                        .into_iter()
                        .zip(1..)
                        .map(|(s, set_number)| {
                            SetEntry::new(set_number, s.weight_kg, s.reps, s.rir)
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub name: String,
    pub notes: String,
    pub duration_minutes: u32,
    pub goal: TrainingGoal,
    pub exercises: Vec<NewWorkoutExercise>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkoutExercise {
    pub exercise_id: ExerciseID,
    pub order: u32,
    pub notes: String,
    pub target_rir: f32,
    pub sets: Vec<SetValues>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("Name must not be empty")]
    EmptyName,
    #[error("Name must be 255 characters or fewer ({0} > 255)")]
    NameTooLong(usize),
    #[error("Notes must be 500 characters or fewer ({0} > 500)")]
    NotesTooLong(usize),
    #[error("Duration must be 1440 minutes or less ({0} > 1440)")]
    DurationTooLong(u32),
    #[error("Add at least one exercise to the workout")]
    NoExercises,
    #[error("Exercise {exercise}, set {set}: {violation}")]
    InvalidSet {
        exercise: usize,
        set: usize,
        violation: FieldViolation,
    },
}
