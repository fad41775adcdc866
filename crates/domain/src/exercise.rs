use std::collections::{BTreeMap, BTreeSet};

use derive_more::{Deref, Display};

use crate::{CreateError, DeleteError, Name, ReadError, UpdateError, ValidationError};

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPS: u32 = 10;

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn create_exercise(
        &self,
        name: Name,
        muscle_coefficients: MuscleCoefficients,
    ) -> Result<Exercise, CreateError>;
    async fn modify_exercise(
        &self,
        id: ExerciseID,
        name: Option<Name>,
        muscle_coefficients: Option<MuscleCoefficients>,
    ) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;

    async fn validate_exercise_name(
        &self,
        name: &str,
        id: ExerciseID,
    ) -> Result<Name, ValidationError> {
        match Name::new(name) {
            Ok(name) => match self.get_exercises().await {
                Ok(exercises) => {
                    if exercises.iter().all(|e| e.id == id || e.name != name) {
                        Ok(name)
                    } else {
                        Err(ValidationError::Conflict("name".to_string()))
                    }
                }
                Err(err) => Err(ValidationError::Other(err.into())),
            },
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn create_exercise(
        &self,
        name: Name,
        muscle_coefficients: MuscleCoefficients,
    ) -> Result<Exercise, CreateError>;
    async fn modify_exercise(
        &self,
        id: ExerciseID,
        name: Option<Name>,
        muscle_coefficients: Option<MuscleCoefficients>,
    ) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub muscle_coefficients: MuscleCoefficients,
    pub equipment: Option<Equipment>,
    pub default_sets: Option<u32>,
    pub default_reps: Option<u32>,
}

impl Exercise {
    #[must_use]
    pub fn default_sets(&self) -> u32 {
        match self.default_sets {
            Some(sets) if sets > 0 => sets,
            _ => DEFAULT_SETS,
        }
    }

    #[must_use]
    pub fn default_reps(&self) -> u32 {
        match self.default_reps {
            Some(reps) if reps > 0 => reps,
            _ => DEFAULT_REPS,
        }
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(u32);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for ExerciseID {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equipment {
    pub id: u32,
    pub name: String,
}

/// Contribution of each muscle to an exercise.
///
/// Values created through [`MuscleCoefficients::new`] lie in (0, 1] and sum to 1. Values
/// received from the backend are taken as they are.
#[derive(Deref, Debug, Default, Clone, PartialEq)]
pub struct MuscleCoefficients(BTreeMap<String, f32>);

impl MuscleCoefficients {
    pub const SUM_TOLERANCE: f32 = 0.001;

    /// Rows with an empty muscle name or a non-positive coefficient count towards the sum but are
    /// not part of the result.
    pub fn new<'a>(
        rows: impl IntoIterator<Item = (&'a str, f32)>,
    ) -> Result<Self, CoefficientError> {
        let rows = rows.into_iter().collect::<Vec<_>>();

        if let Some((muscle, value)) = rows
            .iter()
            .find(|(_, value)| !(0.0..=1.0).contains(value))
        {
            return Err(CoefficientError::OutOfRange(muscle.trim().to_string(), *value));
        }

        let sum = rows.iter().map(|(_, value)| value).sum::<f32>();

        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(CoefficientError::InvalidSum(sum));
        }

        Ok(Self(
            rows.into_iter()
                .filter(|(muscle, value)| !muscle.trim().is_empty() && *value > 0.0)
                .map(|(muscle, value)| (muscle.trim().to_string(), value))
                .collect(),
        ))
    }

    #[must_use]
    pub fn sum(&self) -> f32 {
        self.0.values().sum()
    }
}

impl From<BTreeMap<String, f32>> for MuscleCoefficients {
    fn from(value: BTreeMap<String, f32>) -> Self {
        Self(value)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CoefficientError {
    #[error("Coefficients must sum to 1 (current sum: {0:.2})")]
    InvalidSum(f32),
    #[error("Coefficient of {0} must be in the range 0 to 1 ({1})")]
    OutOfRange(String, f32),
}

#[derive(Default, PartialEq)]
pub struct ExerciseFilter {
    pub name: String,
    pub muscles: BTreeSet<String>,
}

impl ExerciseFilter {
    /// Exercises whose name contains the search text and which train at least one of the
    /// selected muscles.
    #[must_use]
    pub fn exercises<'a>(
        &self,
        exercises: impl Iterator<Item = &'a Exercise>,
    ) -> Vec<&'a Exercise> {
        exercises
            .filter(|e| {
                e.name
                    .as_ref()
                    .to_lowercase()
                    .contains(self.name.to_lowercase().trim())
                    && (self.muscles.is_empty()
                        || self.muscles.iter().any(|m| {
                            e.muscle_coefficients
                                .get(m)
                                .is_some_and(|coefficient| *coefficient > 0.0)
                        }))
            })
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty() && self.muscles.is_empty()
    }

    pub fn toggle_muscle(&mut self, muscle: &str) {
        if !self.muscles.remove(muscle) {
            self.muscles.insert(muscle.to_string());
        }
    }
}
