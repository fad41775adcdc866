//! Controller of the workout editor.
//!
//! The editor owns the draft of one editing session. Network requests are split into a `begin_*`
//! step, which hands out a ticket, and a `finish_*` step, which applies the response. Responses
//! arriving after [`WorkoutEditor::unmount`] are discarded.

use std::{cell::RefCell, collections::HashMap};

use chrono::{DateTime, Utc};
use gymlog_domain::{
    CreateError, CurrentSet, EntryKey, Exercise, ExerciseFilter, ExerciseID, ExerciseService,
    FlowError, NewWorkout, ReadError, Recommendation, RecommendationFlow, RecommendationService,
    SubmitError, Workout, WorkoutDraft, WorkoutID, WorkoutService, WorkoutTimer,
};
use log::{debug, warn};

use crate::Navigator;

const SESSION_EXPIRED: &str = "Session expired, please log in again";

#[derive(Debug, Default)]
pub struct WorkoutEditor {
    draft: WorkoutDraft,
    exercises: Vec<Exercise>,
    loading_exercises: bool,
    exercises_error: Option<String>,
    saving: bool,
    save_error: Option<String>,
    saved: Option<Workout>,
    recommendations: HashMap<EntryKey, RecommendationFlow>,
    timer: WorkoutTimer,
    generation: u64,
    session_expired: bool,
}

impl WorkoutEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an existing workout.
    #[must_use]
    pub fn edit(workout: &Workout) -> Self {
        let draft = WorkoutDraft::from(workout);
        Self {
            timer: WorkoutTimer::new(draft.duration_minutes),
            draft,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn draft(&self) -> &WorkoutDraft {
        &self.draft
    }

    /// Apply an editing operation to the draft.
    ///
    /// Recommendation states of removed entries are dropped. The draft is locked while it is
    /// being saved.
    pub fn update(
        &mut self,
        operation: impl FnOnce(WorkoutDraft) -> WorkoutDraft,
    ) -> Result<(), EditorError> {
        self.ensure_editable()?;
        self.draft = operation(std::mem::take(&mut self.draft));
        let draft = &self.draft;
        self.recommendations
            .retain(|key, _| draft.exercises.iter().any(|e| e.key == *key));
        Ok(())
    }

    pub fn add_exercise(
        &mut self,
        id: ExerciseID,
        at_index: Option<usize>,
    ) -> Result<(), EditorError> {
        let exercise = self
            .exercises
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(EditorError::UnknownExercise(id))?;
        self.update(|draft| draft.add_exercise(exercise, at_index))
    }

    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    #[must_use]
    pub fn filtered_exercises(&self, filter: &ExerciseFilter) -> Vec<&Exercise> {
        filter.exercises(self.exercises.iter())
    }

    #[must_use]
    pub fn is_loading_exercises(&self) -> bool {
        self.loading_exercises
    }

    #[must_use]
    pub fn exercises_error(&self) -> Option<&str> {
        self.exercises_error.as_deref()
    }

    pub fn dismiss_exercises_error(&mut self) {
        self.exercises_error = None;
    }

    /// Returns `None` if the exercises are already being loaded.
    pub fn begin_load_exercises(&mut self) -> Option<Ticket> {
        if self.loading_exercises {
            return None;
        }
        self.loading_exercises = true;
        Some(Ticket {
            generation: self.generation,
        })
    }

    pub fn finish_load_exercises(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Exercise>, ReadError>,
    ) -> Outcome {
        if !self.is_current(ticket.generation) {
            debug!("discarding exercises loaded after editor was closed");
            return Outcome::Discarded;
        }
        self.loading_exercises = false;
        match result {
            Ok(mut exercises) => {
                exercises.sort_by(|a, b| a.name.cmp(&b.name));
                self.exercises = exercises;
                self.exercises_error = None;
                Outcome::Applied
            }
            Err(err) if err.is_unauthorized() => self.expire_session(),
            Err(err) => {
                self.exercises_error = Some(format!("Failed to load exercises: {err}"));
                Outcome::Failed
            }
        }
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    #[must_use]
    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    pub fn dismiss_save_error(&mut self) {
        self.save_error = None;
    }

    /// The workout as returned by the last successful save.
    #[must_use]
    pub fn saved_workout(&self) -> Option<&Workout> {
        self.saved.as_ref()
    }

    /// Validate the draft and start saving it.
    ///
    /// Validation failures are also shown as save error.
    pub fn begin_save(&mut self) -> Result<SaveTicket, EditorError> {
        if self.saving {
            return Err(EditorError::SaveInProgress);
        }
        let workout = self.draft.submission().inspect_err(|err| {
            self.save_error = Some(err.to_string());
        })?;
        self.saving = true;
        self.save_error = None;
        Ok(SaveTicket {
            generation: self.generation,
            id: self.draft.id,
            workout,
        })
    }

    pub fn finish_save(
        &mut self,
        ticket: &SaveTicket,
        result: Result<Workout, CreateError>,
    ) -> Outcome {
        if !self.is_current(ticket.generation) {
            debug!("discarding save response received after editor was closed");
            return Outcome::Discarded;
        }
        self.saving = false;
        match result {
            Ok(workout) => {
                self.draft = WorkoutDraft::from(&workout);
                self.recommendations.clear();
                self.saved = Some(workout);
                Outcome::Applied
            }
            Err(err) if err.is_unauthorized() => {
                self.save_error = Some(SESSION_EXPIRED.to_string());
                self.expire_session()
            }
            Err(err) => {
                self.save_error = Some(err.to_string());
                Outcome::Failed
            }
        }
    }

    /// Recommendation state of the exercise at `exercise_index`.
    ///
    /// # Panics
    ///
    /// Panics if `exercise_index` is out of range.
    #[must_use]
    pub fn recommendation(&self, exercise_index: usize) -> Option<&RecommendationFlow> {
        self.recommendations
            .get(&self.draft.exercises[exercise_index].key)
    }

    /// # Panics
    ///
    /// Panics if `exercise_index` is out of range.
    pub fn begin_recommendation(
        &mut self,
        exercise_index: usize,
    ) -> Result<RecommendationTicket, EditorError> {
        let entry = &self.draft.exercises[exercise_index];
        let current_sets = self
            .recommendations
            .entry(entry.key)
            .or_default()
            .request(&entry.sets)?;
        Ok(RecommendationTicket {
            generation: self.generation,
            key: entry.key,
            exercise_id: entry.exercise.id,
            current_sets,
        })
    }

    pub fn finish_recommendation(
        &mut self,
        ticket: &RecommendationTicket,
        result: Result<Recommendation, ReadError>,
    ) -> Outcome {
        if !self.is_current(ticket.generation) {
            debug!("discarding recommendation received after editor was closed");
            return Outcome::Discarded;
        }
        let Some(flow) = self.recommendations.get_mut(&ticket.key) else {
            debug!("discarding recommendation for removed exercise");
            return Outcome::Discarded;
        };
        let (result, outcome) = match result {
            Ok(recommendation) => (Ok(recommendation), Outcome::Applied),
            Err(err) if err.is_unauthorized() => {
                (Err(SESSION_EXPIRED.to_string()), Outcome::Unauthorized)
            }
            Err(err) => (Err(err.to_string()), Outcome::Failed),
        };
        if let Err(err) = flow.complete(result) {
            warn!("failed to complete recommendation: {err}");
            return Outcome::Discarded;
        }
        if outcome == Outcome::Unauthorized {
            self.expire_session()
        } else {
            outcome
        }
    }

    /// Append the recommended sets, if any, and close the recommendation.
    ///
    /// # Panics
    ///
    /// Panics if `exercise_index` is out of range.
    pub fn accept_recommendation(&mut self, exercise_index: usize) -> Result<(), EditorError> {
        self.ensure_editable()?;
        let key = self.draft.exercises[exercise_index].key;
        if let Some(flow) = self.recommendations.get_mut(&key) {
            self.draft = flow.accept(std::mem::take(&mut self.draft), exercise_index);
        }
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if `exercise_index` is out of range.
    pub fn dismiss_recommendation(&mut self, exercise_index: usize) {
        let key = self.draft.exercises[exercise_index].key;
        if let Some(flow) = self.recommendations.get_mut(&key) {
            flow.dismiss();
        }
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    #[must_use]
    pub fn timer_display(&self, now: DateTime<Utc>) -> String {
        self.timer.display(now)
    }

    pub fn start_timer(&mut self, now: DateTime<Utc>) {
        self.timer.start(now);
    }

    /// Pause the timer and take over the elapsed time as duration of the workout.
    pub fn pause_timer(&mut self, now: DateTime<Utc>) -> Result<(), EditorError> {
        self.ensure_editable()?;
        self.timer.pause(now);
        self.draft.duration_minutes = self.timer.elapsed_minutes(now);
        Ok(())
    }

    pub fn reset_timer(&mut self) -> Result<(), EditorError> {
        self.ensure_editable()?;
        self.timer.reset();
        self.draft.duration_minutes = 0;
        Ok(())
    }

    /// The backend rejected a request because the session has expired.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        self.session_expired
    }

    /// Close the editor. Responses to requests started before are discarded.
    pub fn unmount(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.loading_exercises = false;
        self.saving = false;
        self.recommendations.retain(|_, flow| !flow.is_requesting());
    }

    fn ensure_editable(&self) -> Result<(), EditorError> {
        if self.saving {
            return Err(EditorError::SaveInProgress);
        }
        Ok(())
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    fn expire_session(&mut self) -> Outcome {
        self.session_expired = true;
        Outcome::Unauthorized
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveTicket {
    generation: u64,
    pub id: Option<WorkoutID>,
    pub workout: NewWorkout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationTicket {
    generation: u64,
    key: EntryKey,
    pub exercise_id: ExerciseID,
    pub current_sets: Vec<CurrentSet>,
}

/// Effect of a response on the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Failed,
    Unauthorized,
    Discarded,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("The workout is already being saved")]
    SaveInProgress,
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error(transparent)]
    Recommendation(#[from] FlowError),
    #[error("Exercise {0} is not part of the exercise library")]
    UnknownExercise(ExerciseID),
}

fn follow(outcome: Outcome, navigator: &impl Navigator) -> Outcome {
    if outcome == Outcome::Unauthorized {
        navigator.redirect_to_login();
    }
    outcome
}

pub async fn load_exercises(
    editor: &RefCell<WorkoutEditor>,
    service: &impl ExerciseService,
    navigator: &impl Navigator,
) -> Outcome {
    let Some(ticket) = editor.borrow_mut().begin_load_exercises() else {
        return Outcome::Discarded;
    };
    let result = service.get_exercises().await;
    let outcome = editor.borrow_mut().finish_load_exercises(ticket, result);
    follow(outcome, navigator)
}

/// Create the workout, or replace it if it was saved before.
pub async fn save(
    editor: &RefCell<WorkoutEditor>,
    service: &impl WorkoutService,
    navigator: &impl Navigator,
) -> Result<Outcome, EditorError> {
    let ticket = editor.borrow_mut().begin_save()?;
    let result = match ticket.id {
        Some(id) => service
            .replace_workout(id, ticket.workout.clone())
            .await
            .map_err(CreateError::from),
        None => service.create_workout(ticket.workout.clone()).await,
    };
    let outcome = editor.borrow_mut().finish_save(&ticket, result);
    Ok(follow(outcome, navigator))
}

pub async fn request_recommendation(
    editor: &RefCell<WorkoutEditor>,
    service: &impl RecommendationService,
    navigator: &impl Navigator,
    exercise_index: usize,
) -> Result<Outcome, EditorError> {
    let ticket = editor.borrow_mut().begin_recommendation(exercise_index)?;
    let result = service
        .get_recommendation(ticket.exercise_id, ticket.current_sets.clone())
        .await;
    let outcome = editor.borrow_mut().finish_recommendation(&ticket, result);
    Ok(follow(outcome, navigator))
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use chrono::{NaiveDate, TimeZone};
    use futures_util::FutureExt;
    use gymlog_domain::{
        DeleteError, FieldViolation, FlowState, MuscleCoefficients, Name, RecommendedSet,
        SetPatch, StorageError, TrainingGoal, UpdateError,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn exercise(id: u32, name: &str) -> Exercise {
        Exercise {
            id: id.into(),
            name: Name::new(name).unwrap(),
            muscle_coefficients: MuscleCoefficients::default(),
            equipment: None,
            default_sets: Some(2),
            default_reps: Some(8),
        }
    }

    fn workout(id: u32, name: &str) -> Workout {
        Workout {
            id: id.into(),
            name: name.to_string(),
            notes: String::new(),
            duration_minutes: Some(45),
            goal: TrainingGoal::Strength,
            date: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap(),
            total_volume: None,
            exercises: vec![],
        }
    }

    fn workout_with_squat(id: u32, name: &str) -> Workout {
        Workout {
            exercises: vec![gymlog_domain::WorkoutExercise {
                id: 30.into(),
                exercise: exercise(2, "Squat"),
                order: 0,
                target_rir: None,
                sets: vec![],
            }],
            ..workout(id, name)
        }
    }

    #[derive(Default)]
    struct FakeNavigator {
        redirects: Cell<u32>,
    }

    impl Navigator for FakeNavigator {
        fn redirect_to_login(&self) {
            self.redirects.set(self.redirects.get() + 1);
        }
    }

    #[derive(Default)]
    struct FakeService {
        error: Option<fn() -> StorageError>,
        created: RefCell<Vec<NewWorkout>>,
        replaced: RefCell<Vec<(WorkoutID, NewWorkout)>>,
        requested: RefCell<Vec<(ExerciseID, Vec<CurrentSet>)>>,
    }

    impl FakeService {
        fn failing(error: fn() -> StorageError) -> Self {
            Self {
                error: Some(error),
                ..Self::default()
            }
        }

        fn check(&self) -> Result<(), StorageError> {
            match self.error {
                Some(error) => Err(error()),
                None => Ok(()),
            }
        }
    }

    impl ExerciseService for FakeService {
        async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
            self.check()?;
            Ok(vec![exercise(2, "Squat"), exercise(1, "Bench Press")])
        }

        async fn create_exercise(
            &self,
            _: Name,
            _: MuscleCoefficients,
        ) -> Result<Exercise, CreateError> {
            unreachable!()
        }

        async fn modify_exercise(
            &self,
            _: ExerciseID,
            _: Option<Name>,
            _: Option<MuscleCoefficients>,
        ) -> Result<Exercise, UpdateError> {
            unreachable!()
        }

        async fn delete_exercise(&self, _: ExerciseID) -> Result<ExerciseID, DeleteError> {
            unreachable!()
        }
    }

    impl WorkoutService for FakeService {
        async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
            unreachable!()
        }

        async fn get_workout(&self, _: WorkoutID) -> Result<Workout, ReadError> {
            unreachable!()
        }

        async fn create_workout(&self, workout: NewWorkout) -> Result<Workout, CreateError> {
            self.check()?;
            let name = workout.name.clone();
            self.created.borrow_mut().push(workout);
            Ok(self::workout(7, &name))
        }

        async fn replace_workout(
            &self,
            id: WorkoutID,
            workout: NewWorkout,
        ) -> Result<Workout, UpdateError> {
            self.check()?;
            let name = workout.name.clone();
            self.replaced.borrow_mut().push((id, workout));
            Ok(self::workout(*id, &name))
        }

        async fn delete_workout(&self, _: WorkoutID) -> Result<WorkoutID, DeleteError> {
            unreachable!()
        }
    }

    impl RecommendationService for FakeService {
        async fn get_recommendation(
            &self,
            exercise_id: ExerciseID,
            current_sets: Vec<CurrentSet>,
        ) -> Result<Recommendation, ReadError> {
            self.check()?;
            self.requested
                .borrow_mut()
                .push((exercise_id, current_sets));
            Ok(Recommendation::SetsRecommended {
                sets: vec![RecommendedSet {
                    weight_kg: 62.5,
                    reps: 6,
                    target_rir: Some(1.0),
                }],
                message: String::from("Add one heavier set"),
            })
        }
    }

    fn editor_with_exercises() -> RefCell<WorkoutEditor> {
        let editor = RefCell::new(WorkoutEditor::new());
        assert_eq!(
            load_exercises(&editor, &FakeService::default(), &FakeNavigator::default())
                .now_or_never()
                .unwrap(),
            Outcome::Applied
        );
        editor
    }

    #[test]
    fn test_load_exercises() {
        let editor = editor_with_exercises();
        let editor = editor.borrow();

        assert!(!editor.is_loading_exercises());
        assert_eq!(editor.exercises_error(), None);
        assert_eq!(
            editor
                .exercises()
                .iter()
                .map(|e| e.name.to_string())
                .collect::<Vec<_>>(),
            vec!["Bench Press", "Squat"]
        );
        assert_eq!(
            editor
                .filtered_exercises(&ExerciseFilter {
                    name: String::from("squ"),
                    ..ExerciseFilter::default()
                })
                .len(),
            1
        );
    }

    #[test]
    fn test_load_exercises_failure() {
        let editor = RefCell::new(WorkoutEditor::new());

        assert_eq!(
            load_exercises(
                &editor,
                &FakeService::failing(|| StorageError::NoConnection),
                &FakeNavigator::default()
            )
            .now_or_never()
            .unwrap(),
            Outcome::Failed
        );
        assert_eq!(
            editor.borrow().exercises_error(),
            Some("Failed to load exercises: no connection")
        );

        editor.borrow_mut().dismiss_exercises_error();

        assert_eq!(editor.borrow().exercises_error(), None);
    }

    #[test]
    fn test_load_exercises_in_progress() {
        let mut editor = WorkoutEditor::new();
        let ticket = editor.begin_load_exercises().unwrap();

        assert_eq!(editor.begin_load_exercises(), None);

        editor.finish_load_exercises(ticket, Ok(vec![]));

        assert!(editor.begin_load_exercises().is_some());
    }

    #[test]
    fn test_add_exercise() {
        let editor = editor_with_exercises();
        let mut editor = editor.borrow_mut();

        editor.add_exercise(2.into(), None).unwrap();
        editor.add_exercise(1.into(), Some(0)).unwrap();

        assert_eq!(
            editor
                .draft()
                .exercises
                .iter()
                .map(|e| (*e.exercise.id, e.order, e.sets.len()))
                .collect::<Vec<_>>(),
            vec![(1, 0, 2), (2, 1, 2)]
        );
        assert_eq!(
            editor.add_exercise(9.into(), None),
            Err(EditorError::UnknownExercise(9.into()))
        );
    }

    #[test]
    fn test_save_invalid_draft() {
        let editor = RefCell::new(WorkoutEditor::new());
        let service = FakeService::default();

        assert_eq!(
            save(&editor, &service, &FakeNavigator::default())
                .now_or_never()
                .unwrap(),
            Err(EditorError::Submit(SubmitError::EmptyName))
        );
        assert_eq!(editor.borrow().save_error(), Some("Name must not be empty"));
        assert!(!editor.borrow().is_saving());
        assert!(service.created.borrow().is_empty());
    }

    #[test]
    fn test_save_invalid_set() {
        let editor = editor_with_exercises();
        editor.borrow_mut().add_exercise(1.into(), None).unwrap();
        editor
            .borrow_mut()
            .update(|draft| {
                draft
                    .set_name("Push")
                    .update_set(0, 1, SetPatch::default().reps(Some(150)))
            })
            .unwrap();

        assert_eq!(
            save(&editor, &FakeService::default(), &FakeNavigator::default())
                .now_or_never()
                .unwrap(),
            Err(EditorError::Submit(SubmitError::InvalidSet {
                exercise: 1,
                set: 2,
                violation: FieldViolation::TooManyReps,
            }))
        );
    }

    #[test]
    fn test_save_new_workout() {
        let editor = editor_with_exercises();
        let service = FakeService::default();
        editor.borrow_mut().add_exercise(1.into(), None).unwrap();
        editor.borrow_mut().update(|draft| draft.set_name("Push")).unwrap();

        assert_eq!(
            save(&editor, &service, &FakeNavigator::default())
                .now_or_never()
                .unwrap(),
            Ok(Outcome::Applied)
        );

        let editor = editor.borrow();
        assert_eq!(service.created.borrow().len(), 1);
        assert_eq!(service.created.borrow()[0].exercises[0].sets.len(), 2);
        assert_eq!(editor.draft().id, Some(7.into()));
        assert_eq!(editor.saved_workout().map(|w| w.name.as_str()), Some("Push"));
        assert!(!editor.is_saving());
        assert_eq!(editor.save_error(), None);
    }

    #[test]
    fn test_save_existing_workout() {
        let editor = RefCell::new(WorkoutEditor::edit(&workout_with_squat(3, "Legs")));
        let service = FakeService::default();

        assert_eq!(
            save(&editor, &service, &FakeNavigator::default())
                .now_or_never()
                .unwrap(),
            Ok(Outcome::Applied)
        );
        assert!(service.created.borrow().is_empty());
        assert_eq!(service.replaced.borrow()[0].0, 3.into());
        assert_eq!(service.replaced.borrow()[0].1.duration_minutes, 45);
    }

    #[test]
    fn test_save_failure() {
        let editor = editor_with_exercises();
        editor.borrow_mut().add_exercise(1.into(), None).unwrap();
        editor.borrow_mut().update(|draft| draft.set_name("Push")).unwrap();

        assert_eq!(
            save(
                &editor,
                &FakeService::failing(|| StorageError::Rejected(String::from(
                    "body.name: field required"
                ))),
                &FakeNavigator::default()
            )
            .now_or_never()
            .unwrap(),
            Ok(Outcome::Failed)
        );
        assert_eq!(
            editor.borrow().save_error(),
            Some("body.name: field required")
        );
        assert_eq!(editor.borrow().draft().id, None);
        assert!(!editor.borrow().is_saving());
    }

    #[test]
    fn test_save_unauthorized() {
        let editor = editor_with_exercises();
        let navigator = FakeNavigator::default();
        editor.borrow_mut().add_exercise(1.into(), None).unwrap();
        editor.borrow_mut().update(|draft| draft.set_name("Push")).unwrap();

        assert_eq!(
            save(
                &editor,
                &FakeService::failing(|| StorageError::NoSession),
                &navigator
            )
            .now_or_never()
            .unwrap(),
            Ok(Outcome::Unauthorized)
        );
        assert_eq!(navigator.redirects.get(), 1);
        assert!(editor.borrow().is_session_expired());
        assert_eq!(editor.borrow().save_error(), Some(SESSION_EXPIRED));
    }

    #[test]
    fn test_save_in_progress() {
        let editor = editor_with_exercises();
        let mut editor = editor.borrow_mut();
        editor.add_exercise(1.into(), None).unwrap();
        editor.update(|draft| draft.set_name("Push")).unwrap();

        let ticket = editor.begin_save().unwrap();

        assert!(editor.is_saving());
        assert_eq!(editor.begin_save(), Err(EditorError::SaveInProgress));

        assert_eq!(
            editor.finish_save(&ticket, Ok(workout_with_squat(7, "Push"))),
            Outcome::Applied
        );
        assert!(!editor.is_saving());
        assert_eq!(editor.draft().id, Some(7.into()));

        let ticket = editor.begin_save().unwrap();

        assert_eq!(ticket.id, Some(7.into()));
    }

    #[test]
    fn test_edit_while_saving() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap();
        let editor = editor_with_exercises();
        let mut editor = editor.borrow_mut();
        editor.add_exercise(1.into(), None).unwrap();
        editor.update(|draft| draft.set_name("Push")).unwrap();
        editor.start_timer(start);
        let draft = editor.draft().clone();

        let ticket = editor.begin_save().unwrap();

        assert_eq!(
            editor.update(|draft| draft.set_name("Pull")),
            Err(EditorError::SaveInProgress)
        );
        assert_eq!(
            editor.add_exercise(2.into(), None),
            Err(EditorError::SaveInProgress)
        );
        assert_eq!(
            editor.pause_timer(start + chrono::Duration::minutes(30)),
            Err(EditorError::SaveInProgress)
        );
        assert_eq!(editor.reset_timer(), Err(EditorError::SaveInProgress));
        assert_eq!(editor.accept_recommendation(0), Err(EditorError::SaveInProgress));
        assert_eq!(*editor.draft(), draft);

        assert_eq!(
            editor.finish_save(&ticket, Err(CreateError::Storage(StorageError::NoConnection))),
            Outcome::Failed
        );
        assert!(editor.update(|draft| draft.set_name("Pull")).is_ok());
        assert_eq!(editor.draft().name, "Pull");
    }

    #[test]
    fn test_save_response_after_unmount() {
        let editor = editor_with_exercises();
        let mut editor = editor.borrow_mut();
        editor.add_exercise(1.into(), None).unwrap();
        editor.update(|draft| draft.set_name("Push")).unwrap();
        let draft = editor.draft().clone();

        let ticket = editor.begin_save().unwrap();
        editor.unmount();

        assert!(!editor.is_saving());
        assert_eq!(
            editor.finish_save(&ticket, Ok(workout(7, "Push"))),
            Outcome::Discarded
        );
        assert_eq!(*editor.draft(), draft);
        assert_eq!(editor.saved_workout(), None);
    }

    #[test]
    fn test_recommendation() {
        let editor = editor_with_exercises();
        let service = FakeService::default();
        editor.borrow_mut().add_exercise(1.into(), None).unwrap();
        editor
            .borrow_mut()
            .update(|draft| {
                draft.update_set(0, 0, SetPatch::default().weight_kg(Some(60.0)).rir(None))
            })
            .unwrap();

        assert_eq!(
            request_recommendation(&editor, &service, &FakeNavigator::default(), 0)
                .now_or_never()
                .unwrap(),
            Ok(Outcome::Applied)
        );
        assert_eq!(
            *service.requested.borrow(),
            vec![(
                1.into(),
                vec![
                    CurrentSet {
                        set_number: 1,
                        weight_kg: 60.0,
                        reps: 8,
                        rir: 2.0
                    },
                    CurrentSet {
                        set_number: 2,
                        weight_kg: 0.0,
                        reps: 8,
                        rir: 2.0
                    }
                ]
            )]
        );
        assert_eq!(
            editor.borrow().recommendation(0).and_then(RecommendationFlow::message),
            Some("Add one heavier set")
        );

        editor.borrow_mut().accept_recommendation(0).unwrap();

        let editor = editor.borrow();
        let sets = &editor.draft().exercises[0].sets;
        assert_eq!(sets.len(), 3);
        assert_eq!(sets[2].set_number, 3);
        assert_eq!(sets[2].weight_kg, Some(62.5));
        assert_eq!(sets[2].reps, Some(6));
        assert_eq!(sets[2].rir, Some(1.0));
        assert_eq!(
            editor.recommendation(0).map(RecommendationFlow::state),
            Some(&FlowState::Idle)
        );
    }

    #[test]
    fn test_recommendation_dismissed() {
        let editor = editor_with_exercises();
        editor.borrow_mut().add_exercise(1.into(), None).unwrap();

        request_recommendation(&editor, &FakeService::default(), &FakeNavigator::default(), 0)
            .now_or_never()
            .unwrap()
            .unwrap();
        editor.borrow_mut().dismiss_recommendation(0);
        editor.borrow_mut().accept_recommendation(0).unwrap();

        assert_eq!(editor.borrow().draft().exercises[0].sets.len(), 2);
    }

    #[test]
    fn test_recommendation_failure() {
        let editor = editor_with_exercises();
        editor.borrow_mut().add_exercise(1.into(), None).unwrap();

        assert_eq!(
            request_recommendation(
                &editor,
                &FakeService::failing(|| StorageError::Rejected(String::from(
                    "Exercise not found"
                ))),
                &FakeNavigator::default(),
                0
            )
            .now_or_never()
            .unwrap(),
            Ok(Outcome::Failed)
        );
        assert_eq!(
            editor.borrow().recommendation(0).map(RecommendationFlow::state),
            Some(&FlowState::Failed {
                message: String::from("Exercise not found")
            })
        );
    }

    #[test]
    fn test_recommendation_in_progress() {
        let editor = editor_with_exercises();
        let mut editor = editor.borrow_mut();
        editor.add_exercise(1.into(), None).unwrap();
        editor.add_exercise(2.into(), None).unwrap();

        let ticket = editor.begin_recommendation(0).unwrap();

        assert_eq!(
            editor.begin_recommendation(0),
            Err(EditorError::Recommendation(FlowError::AlreadyRequesting))
        );
        assert!(editor.begin_recommendation(1).is_ok());
        assert!(editor.recommendation(0).unwrap().is_requesting());

        assert_eq!(
            editor.finish_recommendation(
                &ticket,
                Ok(Recommendation::NoSetsNeeded {
                    message: String::from("Enough volume")
                })
            ),
            Outcome::Applied
        );
        assert!(editor.begin_recommendation(0).is_ok());
    }

    #[test]
    fn test_recommendation_for_removed_exercise() {
        let editor = editor_with_exercises();
        let mut editor = editor.borrow_mut();
        editor.add_exercise(1.into(), None).unwrap();
        editor.add_exercise(2.into(), None).unwrap();

        let ticket = editor.begin_recommendation(0).unwrap();
        editor.update(|draft| draft.remove_exercise(0)).unwrap();

        assert_eq!(
            editor.finish_recommendation(
                &ticket,
                Ok(Recommendation::NoSetsNeeded {
                    message: String::new()
                })
            ),
            Outcome::Discarded
        );
        assert_eq!(editor.recommendation(0), None);
    }

    #[test]
    fn test_recommendation_after_unmount() {
        let editor = editor_with_exercises();
        let mut editor = editor.borrow_mut();
        editor.add_exercise(1.into(), None).unwrap();

        let ticket = editor.begin_recommendation(0).unwrap();
        editor.unmount();

        assert_eq!(
            editor.finish_recommendation(
                &ticket,
                Ok(Recommendation::NoSetsNeeded {
                    message: String::new()
                })
            ),
            Outcome::Discarded
        );
        assert_eq!(editor.recommendation(0), None);
    }

    #[test]
    fn test_recommendation_unauthorized() {
        let editor = editor_with_exercises();
        let navigator = FakeNavigator::default();
        editor.borrow_mut().add_exercise(1.into(), None).unwrap();

        assert_eq!(
            request_recommendation(
                &editor,
                &FakeService::failing(|| StorageError::NoSession),
                &navigator,
                0
            )
            .now_or_never()
            .unwrap(),
            Ok(Outcome::Unauthorized)
        );
        assert_eq!(navigator.redirects.get(), 1);
        assert!(editor.borrow().is_session_expired());
    }

    #[test]
    fn test_timer() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap();
        let mut editor = WorkoutEditor::new();

        editor.start_timer(start);

        assert!(editor.is_timer_running());
        assert_eq!(
            editor.timer_display(start + chrono::Duration::seconds(75)),
            "01:15"
        );

        editor.pause_timer(start + chrono::Duration::minutes(42)).unwrap();

        assert!(!editor.is_timer_running());
        assert_eq!(editor.draft().duration_minutes, 42);

        editor.reset_timer().unwrap();

        assert_eq!(editor.draft().duration_minutes, 0);
    }

    #[test]
    fn test_edit_keeps_duration() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap();
        let mut editor = WorkoutEditor::edit(&workout(3, "Legs"));

        editor.start_timer(start);
        editor.pause_timer(start + chrono::Duration::minutes(5)).unwrap();

        assert_eq!(editor.draft().duration_minutes, 50);
    }
}
