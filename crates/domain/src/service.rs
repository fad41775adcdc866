use log::{debug, error};

use crate::{
    AnalyticsRepository, AnalyticsService, CreateError, Credentials, CurrentSet, DeleteError,
    Exercise, ExerciseID, ExerciseRepository, ExerciseService, MuscleCoefficients, Name, NewUser,
    NewWorkout, ReadError, Recommendation, RecommendationRepository, RecommendationService,
    SessionRepository, SessionService, StrengthProgress, UpdateError, User, UserProgress, Workout,
    WorkoutAnalytics, WorkoutID, WorkoutRepository, WorkoutService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: SessionRepository> SessionService for Service<R> {
    async fn request_session(&self, credentials: Credentials) -> Result<User, ReadError> {
        log_on_error!(
            self.repository.request_session(credentials),
            ReadError,
            "request",
            "session"
        )
    }

    async fn register(&self, user: NewUser) -> Result<User, CreateError> {
        log_on_error!(
            self.repository.create_account(user),
            CreateError,
            "create",
            "account"
        )
    }

    async fn get_session(&self) -> Result<User, ReadError> {
        log_on_error!(
            self.repository.initialize_session(),
            ReadError,
            "get",
            "session"
        )
    }

    async fn delete_session(&self) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository.delete_session(),
            DeleteError,
            "delete",
            "session"
        )
    }
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn create_exercise(
        &self,
        name: Name,
        muscle_coefficients: MuscleCoefficients,
    ) -> Result<Exercise, CreateError> {
        log_on_error!(
            self.repository.create_exercise(name, muscle_coefficients),
            CreateError,
            "create",
            "exercise"
        )
    }

    async fn modify_exercise(
        &self,
        id: ExerciseID,
        name: Option<Name>,
        muscle_coefficients: Option<MuscleCoefficients>,
    ) -> Result<Exercise, UpdateError> {
        log_on_error!(
            self.repository.modify_exercise(id, name, muscle_coefficients),
            UpdateError,
            "modify",
            "exercise"
        )
    }

    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
        log_on_error!(
            self.repository.delete_exercise(id),
            DeleteError,
            "delete",
            "exercise"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        let mut workouts = log_on_error!(
            self.repository.read_workouts(),
            ReadError,
            "get",
            "workouts"
        )?;
        workouts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(workouts)
    }

    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError> {
        log_on_error!(
            self.repository.read_workout(id),
            ReadError,
            "get",
            "workout"
        )
    }

    async fn create_workout(&self, workout: NewWorkout) -> Result<Workout, CreateError> {
        log_on_error!(
            self.repository.create_workout(workout),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn replace_workout(
        &self,
        id: WorkoutID,
        workout: NewWorkout,
    ) -> Result<Workout, UpdateError> {
        log_on_error!(
            self.repository.replace_workout(id, workout),
            UpdateError,
            "replace",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}

impl<R: RecommendationRepository> RecommendationService for Service<R> {
    async fn get_recommendation(
        &self,
        exercise_id: ExerciseID,
        current_sets: Vec<CurrentSet>,
    ) -> Result<Recommendation, ReadError> {
        log_on_error!(
            self.repository
                .request_recommendation(exercise_id, current_sets),
            ReadError,
            "get",
            "recommendation"
        )
    }
}

impl<R: AnalyticsRepository> AnalyticsService for Service<R> {
    async fn get_workout_analytics(&self, id: WorkoutID) -> Result<WorkoutAnalytics, ReadError> {
        log_on_error!(
            self.repository.read_workout_analytics(id),
            ReadError,
            "get",
            "workout analytics"
        )
    }

    async fn get_user_progress(&self, days: u32) -> Result<UserProgress, ReadError> {
        log_on_error!(
            self.repository.read_user_progress(days),
            ReadError,
            "get",
            "progress"
        )
    }

    async fn get_strength_progress(&self, days: u32) -> Result<StrengthProgress, ReadError> {
        log_on_error!(
            self.repository.read_strength_progress(days),
            ReadError,
            "get",
            "strength progress"
        )
    }
}
