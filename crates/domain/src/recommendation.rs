use crate::{DEFAULT_RIR, ExerciseID, ReadError, SetEntry, WorkoutDraft};

#[allow(async_fn_in_trait)]
pub trait RecommendationService {
    async fn get_recommendation(
        &self,
        exercise_id: ExerciseID,
        current_sets: Vec<CurrentSet>,
    ) -> Result<Recommendation, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait RecommendationRepository {
    async fn request_recommendation(
        &self,
        exercise_id: ExerciseID,
        current_sets: Vec<CurrentSet>,
    ) -> Result<Recommendation, ReadError>;
}

/// Result of asking the backend for the next sets of an exercise.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    SetsRecommended {
        sets: Vec<RecommendedSet>,
        message: String,
    },
    NoSetsNeeded {
        message: String,
    },
    RequiresInitialSet {
        message: String,
    },
    Failed {
        message: String,
    },
}

impl Recommendation {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Recommendation::SetsRecommended { message, .. }
            | Recommendation::NoSetsNeeded { message }
            | Recommendation::RequiresInitialSet { message }
            | Recommendation::Failed { message } => message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendedSet {
    pub weight_kg: f32,
    pub reps: i32,
    pub target_rir: Option<f32>,
}

/// A set as sent to the recommendation endpoint. Missing values are filled with defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentSet {
    pub set_number: u32,
    pub weight_kg: f32,
    pub reps: i32,
    pub rir: f32,
}

impl From<&SetEntry> for CurrentSet {
    fn from(value: &SetEntry) -> Self {
        Self {
            set_number: value.set_number,
            weight_kg: value.weight_kg.unwrap_or(0.0),
            reps: value.reps.unwrap_or(0),
            rir: value.rir.unwrap_or(DEFAULT_RIR),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub enum FlowState {
    #[default]
    Idle,
    Requesting,
    SucceededWithSets {
        sets: Vec<RecommendedSet>,
        message: String,
    },
    SucceededNoSets {
        message: String,
    },
    NeedsInitialSet {
        message: String,
    },
    Failed {
        message: String,
    },
}

/// Recommendation state of a single exercise entry.
///
/// ```text
/// Idle -> Requesting -> SucceededWithSets | SucceededNoSets | NeedsInitialSet | Failed -> Idle
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecommendationFlow {
    state: FlowState,
}

impl RecommendationFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    #[must_use]
    pub fn is_requesting(&self) -> bool {
        self.state == FlowState::Requesting
    }

    /// Message to be shown for a terminal state.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match &self.state {
            FlowState::Idle | FlowState::Requesting => None,
            FlowState::SucceededWithSets { message, .. }
            | FlowState::SucceededNoSets { message }
            | FlowState::NeedsInitialSet { message }
            | FlowState::Failed { message } => Some(message),
        }
    }

    /// Start a request and return its body.
    pub fn request(&mut self, sets: &[SetEntry]) -> Result<Vec<CurrentSet>, FlowError> {
        if self.is_requesting() {
            return Err(FlowError::AlreadyRequesting);
        }
        self.state = FlowState::Requesting;
        Ok(sets.iter().map(CurrentSet::from).collect())
    }

    pub fn complete(&mut self, result: Result<Recommendation, String>) -> Result<(), FlowError> {
        if !self.is_requesting() {
            return Err(FlowError::NotRequesting);
        }
        self.state = match result {
            Ok(Recommendation::SetsRecommended { sets, message }) => {
                if sets.is_empty() {
                    FlowState::SucceededNoSets { message }
                } else {
                    FlowState::SucceededWithSets { sets, message }
                }
            }
            Ok(Recommendation::NoSetsNeeded { message }) => FlowState::SucceededNoSets { message },
            Ok(Recommendation::RequiresInitialSet { message }) => {
                FlowState::NeedsInitialSet { message }
            }
            Ok(Recommendation::Failed { message }) | Err(message) => FlowState::Failed { message },
        };
        Ok(())
    }

    /// Apply the recommended sets to the given exercise. Only a successful recommendation with
    /// sets changes the draft.
    ///
    /// # Panics
    ///
    /// Panics if `exercise_index` is out of range and there are sets to apply.
    #[must_use]
    pub fn accept(&mut self, draft: WorkoutDraft, exercise_index: usize) -> WorkoutDraft {
        if self.is_requesting() {
            return draft;
        }
        match std::mem::take(&mut self.state) {
            FlowState::SucceededWithSets { sets, .. } => {
                draft.apply_recommendation(exercise_index, &sets)
            }
            _ => draft,
        }
    }

    pub fn dismiss(&mut self) {
        if !self.is_requesting() {
            self.state = FlowState::Idle;
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowError {
    #[error("A recommendation is already being requested")]
    AlreadyRequesting,
    #[error("No recommendation has been requested")]
    NotRequesting,
}
