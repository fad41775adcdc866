//! REST
//!
//! Repository backed by the backend service. Every response is wrapped in an envelope of the form
//! `{success, data, message}`. A `401` response ends the session.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use gloo_net::http::{Request, RequestBuilder, Response};
use gymlog_domain as domain;
use log::debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, json};

use crate::local_storage;

pub const DEFAULT_BASE_URL: &str = "api/v1";

const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
}

impl Config {
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
        request.send().await
    }
}

/// Storage of the bearer token.
pub trait TokenRepository {
    fn read_token(&self) -> Option<String>;
    fn write_token(&self, token: &str) -> Result<(), domain::StorageError>;
    fn delete_token(&self);
}

#[derive(Clone)]
pub struct REST<S: SendRequest, T: TokenRepository = local_storage::Token> {
    pub sender: S,
    pub tokens: T,
    pub config: Config,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            sender: GlooNetSendRequest,
            tokens: local_storage::Token,
            config,
        }
    }
}

impl Default for REST<GlooNetSendRequest> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SendRequest, T: TokenRepository> REST<S, T> {
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.tokens.read_token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    fn get(&self, path: &str) -> Result<Request, domain::StorageError> {
        self.authorized(Request::get(&self.config.url(path)))
            .build()
            .map_err(|err| domain::StorageError::Other(err.into()))
    }

    fn delete(&self, path: &str) -> Result<Request, domain::StorageError> {
        self.authorized(Request::delete(&self.config.url(path)))
            .build()
            .map_err(|err| domain::StorageError::Other(err.into()))
    }

    fn with_json(
        &self,
        builder: RequestBuilder,
        value: &impl Serialize,
    ) -> Result<Request, domain::StorageError> {
        self.authorized(builder)
            .json(value)
            .map_err(|err| domain::StorageError::Other(err.into()))
    }

    async fn fetch<D: DeserializeOwned>(
        &self,
        request: Result<Request, domain::StorageError>,
    ) -> Result<D, domain::StorageError> {
        self.fetch_envelope(request, true).await?.into_data()
    }

    async fn fetch_no_content<R>(
        &self,
        request: Result<Request, domain::StorageError>,
        result: R,
    ) -> Result<R, domain::StorageError> {
        self.fetch_envelope::<serde_json::Value>(request, true)
            .await?
            .into_ok()?;
        Ok(result)
    }

    /// Send a request and unwrap the response envelope.
    ///
    /// A `401` response deletes the stored token if `session_required` is set.
    async fn fetch_envelope<D: DeserializeOwned>(
        &self,
        request: Result<Request, domain::StorageError>,
        session_required: bool,
    ) -> Result<Envelope<D>, domain::StorageError> {
        let request = request?;
        let url = request.url();
        let Ok(response) = self.sender.send_request(request).await else {
            return Err(domain::StorageError::NoConnection);
        };
        let status = response.status();
        debug!("{status} {url}");
        if status == 401 && session_required {
            self.tokens.delete_token();
            return Err(domain::StorageError::NoSession);
        }
        let body = response
            .text()
            .await
            .map_err(|err| domain::StorageError::Other(err.into()))?;
        parse_envelope(status, &response.status_text(), &body)
    }

    async fn login(&self, credentials: &domain::Credentials) -> Result<(), domain::StorageError> {
        let request = Request::post(&self.config.url("/auth/login"))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(form_encode(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ]))
            .map_err(|err| domain::StorageError::Other(err.into()));
        let token = self
            .fetch_envelope::<Token>(request, false)
            .await?
            .into_data()?;
        self.tokens.write_token(&token.access_token)
    }

    async fn read_current_user(&self) -> Result<domain::User, domain::StorageError> {
        Ok(self.fetch::<User>(self.get("/auth/me")).await?.into())
    }
}

impl<S: SendRequest, T: TokenRepository> domain::SessionRepository for REST<S, T> {
    async fn request_session(
        &self,
        credentials: domain::Credentials,
    ) -> Result<domain::User, domain::ReadError> {
        self.login(&credentials).await?;
        Ok(self.read_current_user().await?)
    }

    async fn create_account(
        &self,
        user: domain::NewUser,
    ) -> Result<domain::User, domain::CreateError> {
        let request = self.with_json(
            Request::post(&self.config.url("/auth/register")),
            &NewUser::from(&user),
        );
        self.fetch::<User>(request).await?;
        self.login(&domain::Credentials {
            username: user.username,
            password: user.password,
        })
        .await?;
        Ok(self.read_current_user().await?)
    }

    async fn initialize_session(&self) -> Result<domain::User, domain::ReadError> {
        if self.tokens.read_token().is_none() {
            return Err(domain::StorageError::NoSession.into());
        }
        Ok(self.read_current_user().await?)
    }

    async fn delete_session(&self) -> Result<(), domain::DeleteError> {
        self.tokens.delete_token();
        Ok(())
    }
}

impl<S: SendRequest, T: TokenRepository> domain::ExerciseRepository for REST<S, T> {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        let exercises = self.fetch::<Vec<Exercise>>(self.get("/exercises")).await?;
        Ok(exercises
            .into_iter()
            .map(domain::Exercise::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn create_exercise(
        &self,
        name: domain::Name,
        muscle_coefficients: domain::MuscleCoefficients,
    ) -> Result<domain::Exercise, domain::CreateError> {
        let request = self.with_json(
            Request::post(&self.config.url("/exercises")),
            &json!({
                "name": name.to_string(),
                "muscle_coefficients": *muscle_coefficients,
            }),
        );
        Ok(domain::Exercise::try_from(self.fetch::<Exercise>(request).await?)?)
    }

    async fn modify_exercise(
        &self,
        id: domain::ExerciseID,
        name: Option<domain::Name>,
        muscle_coefficients: Option<domain::MuscleCoefficients>,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        let mut content = Map::new();
        if let Some(name) = name {
            content.insert("name".into(), json!(name.to_string()));
        }
        if let Some(muscle_coefficients) = muscle_coefficients {
            content.insert("muscle_coefficients".into(), json!(*muscle_coefficients));
        }
        let request = self.with_json(
            Request::patch(&self.config.url(&format!("/exercises/{id}"))),
            &content,
        );
        Ok(domain::Exercise::try_from(self.fetch::<Exercise>(request).await?)?)
    }

    async fn delete_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::ExerciseID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(self.delete(&format!("/exercises/{id}")), id)
            .await?)
    }
}

impl<S: SendRequest, T: TokenRepository> domain::WorkoutRepository for REST<S, T> {
    async fn read_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        let workouts = self.fetch::<Vec<Workout>>(self.get("/workouts")).await?;
        Ok(workouts
            .into_iter()
            .map(domain::Workout::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn read_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::Workout, domain::ReadError> {
        let workout = self
            .fetch::<Workout>(self.get(&format!("/workouts/{id}")))
            .await?;
        Ok(domain::Workout::try_from(workout)?)
    }

    async fn create_workout(
        &self,
        workout: domain::NewWorkout,
    ) -> Result<domain::Workout, domain::CreateError> {
        let request = self.with_json(
            Request::post(&self.config.url("/workouts")),
            &NewWorkout::from(workout),
        );
        Ok(domain::Workout::try_from(self.fetch::<Workout>(request).await?)?)
    }

    async fn replace_workout(
        &self,
        id: domain::WorkoutID,
        workout: domain::NewWorkout,
    ) -> Result<domain::Workout, domain::UpdateError> {
        let request = self.with_json(
            Request::put(&self.config.url(&format!("/workouts/{id}"))),
            &NewWorkout::from(workout),
        );
        Ok(domain::Workout::try_from(self.fetch::<Workout>(request).await?)?)
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        Ok(self
            .fetch_no_content(self.delete(&format!("/workouts/{id}")), id)
            .await?)
    }
}

impl<S: SendRequest, T: TokenRepository> domain::RecommendationRepository for REST<S, T> {
    async fn request_recommendation(
        &self,
        exercise_id: domain::ExerciseID,
        current_sets: Vec<domain::CurrentSet>,
    ) -> Result<domain::Recommendation, domain::ReadError> {
        let request = self.with_json(
            Request::post(&self.config.url(&format!("/recommendations/exercise/{exercise_id}"))),
            &current_sets
                .into_iter()
                .map(CurrentSet::from)
                .collect::<Vec<_>>(),
        );
        Ok(self
            .fetch_envelope::<Recommendation>(request, true)
            .await?
            .into_recommendation())
    }
}

impl<S: SendRequest, T: TokenRepository> domain::AnalyticsRepository for REST<S, T> {
    async fn read_workout_analytics(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutAnalytics, domain::ReadError> {
        Ok(self
            .fetch::<WorkoutAnalytics>(self.get(&format!("/analytics/workout/{id}")))
            .await?
            .into())
    }

    async fn read_user_progress(
        &self,
        days: u32,
    ) -> Result<domain::UserProgress, domain::ReadError> {
        Ok(self
            .fetch::<UserProgress>(self.get(&format!("/analytics/progress?days={days}")))
            .await?
            .into())
    }

    async fn read_strength_progress(
        &self,
        days: u32,
    ) -> Result<domain::StrengthProgress, domain::ReadError> {
        Ok(self
            .fetch::<BTreeMap<String, ExerciseStrength>>(
                self.get(&format!("/analytics/strength-progress?days={days}")),
            )
            .await?
            .into_iter()
            .map(|(name, strength)| (name, strength.into()))
            .collect())
    }
}

fn parse_envelope<D: DeserializeOwned>(
    status: u16,
    status_text: &str,
    body: &str,
) -> Result<Envelope<D>, domain::StorageError> {
    if !(200..300).contains(&status) {
        return Err(domain::StorageError::Rejected(error_message(
            status,
            status_text,
            body,
        )));
    }
    serde_json::from_str::<Envelope<D>>(body).map_err(|err| {
        domain::StorageError::Other(format!("deserialization failed: {err}").into())
    })
}

/// Message of a failed request, preferring the details given by the backend.
fn error_message(status: u16, status_text: &str, body: &str) -> String {
    let error = serde_json::from_str::<ErrorBody>(body).unwrap_or_default();
    error
        .detail
        .map(|detail| detail.to_string())
        .or(error.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("{status} {status_text}").trim().to_string())
}

fn form_encode(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, FORM_ENCODE_SET),
                utf8_percent_encode(value, FORM_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Envelope<D> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<D>,
    #[serde(default)]
    pub message: String,
}

fn default_success() -> bool {
    true
}

impl<D> Envelope<D> {
    fn into_ok(self) -> Result<Option<D>, domain::StorageError> {
        if self.success {
            Ok(self.data)
        } else if self.message.trim().is_empty() {
            Err(domain::StorageError::Rejected("Request failed".to_string()))
        } else {
            Err(domain::StorageError::Rejected(self.message))
        }
    }

    fn into_data(self) -> Result<D, domain::StorageError> {
        self.into_ok()?
            .ok_or(domain::StorageError::Other("response contains no data".into()))
    }
}

impl Envelope<Recommendation> {
    /// Unlike other responses, a failed recommendation still carries its data.
    fn into_recommendation(self) -> domain::Recommendation {
        match self.data {
            Some(data) => {
                let message = data
                    .message
                    .clone()
                    .filter(|message| !message.is_empty())
                    .unwrap_or(self.message);
                data.into_domain(message)
            }
            None => domain::Recommendation::Failed {
                message: self.message,
            },
        }
    }
}

#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    detail: Option<Detail>,
    message: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Detail {
    Message(String),
    Errors(Vec<DetailEntry>),
}

impl std::fmt::Display for Detail {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Detail::Message(message) => write!(f, "{message}"),
            Detail::Errors(errors) => write!(
                f,
                "{}",
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DetailEntry {
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
}

impl std::fmt::Display for DetailEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let loc = self
            .loc
            .iter()
            .map(|segment| match segment {
                serde_json::Value::String(segment) => segment.clone(),
                segment => segment.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{loc}: {}", self.msg)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: u32,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub training_goal: Option<String>,
}

impl From<User> for domain::User {
    fn from(value: User) -> Self {
        domain::User {
            id: value.id.into(),
            username: value.username,
            email: value.email,
            full_name: value.full_name,
            training_goal: value.training_goal.and_then(|goal| goal.parse().ok()),
        }
    }
}

impl From<domain::User> for User {
    fn from(value: domain::User) -> Self {
        User {
            id: *value.id,
            username: value.username,
            email: value.email,
            full_name: value.full_name,
            training_goal: value.training_goal.map(|goal| goal.to_string()),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub training_goal: Option<String>,
}

impl From<&domain::NewUser> for NewUser {
    fn from(value: &domain::NewUser) -> Self {
        NewUser {
            username: value.username.clone(),
            email: value.email.clone(),
            password: value.password.clone(),
            full_name: value.full_name.clone(),
            training_goal: value.training_goal.map(|goal| goal.to_string()),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub muscle_coefficients: Option<BTreeMap<String, f32>>,
    #[serde(default)]
    pub equipment: Option<Equipment>,
    #[serde(default)]
    pub default_sets: Option<u32>,
    #[serde(default)]
    pub default_reps: Option<u32>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Equipment {
    pub id: u32,
    pub name: String,
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = domain::StorageError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(domain::Exercise {
            id: value.id.into(),
            name: domain::Name::new(&value.name)
                .map_err(|err| domain::StorageError::Other(err.into()))?,
            muscle_coefficients: value.muscle_coefficients.unwrap_or_default().into(),
            equipment: value.equipment.map(|equipment| domain::Equipment {
                id: equipment.id,
                name: equipment.name,
            }),
            default_sets: value.default_sets,
            default_reps: value.default_reps,
        })
    }
}

impl From<domain::Exercise> for Exercise {
    fn from(value: domain::Exercise) -> Self {
        Exercise {
            id: *value.id,
            name: value.name.to_string(),
            muscle_coefficients: Some((*value.muscle_coefficients).clone()),
            equipment: value.equipment.map(|equipment| Equipment {
                id: equipment.id,
                name: equipment.name,
            }),
            default_sets: value.default_sets,
            default_reps: value.default_reps,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub training_goal: Option<String>,
    pub date: NaiveDateTime,
    #[serde(default)]
    pub total_volume: Option<f32>,
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WorkoutExercise {
    pub id: u32,
    pub exercise_id: u32,
    pub order: u32,
    #[serde(default)]
    pub target_rir: Option<f32>,
    pub exercise: Exercise,
    #[serde(default)]
    pub sets: Vec<Set>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Set {
    pub set_number: u32,
    pub weight_kg: Option<f32>,
    pub reps: Option<i32>,
    pub rir: Option<f32>,
}

impl From<Set> for domain::SetValues {
    fn from(value: Set) -> Self {
        domain::SetValues {
            set_number: value.set_number,
            weight_kg: value.weight_kg,
            reps: value.reps,
            rir: value.rir,
        }
    }
}

impl From<domain::SetValues> for Set {
    fn from(value: domain::SetValues) -> Self {
        Set {
            set_number: value.set_number,
            weight_kg: value.weight_kg,
            reps: value.reps,
            rir: value.rir,
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = domain::StorageError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(domain::Workout {
            id: value.id.into(),
            name: value.name,
            notes: value.notes.unwrap_or_default(),
            duration_minutes: value.duration_minutes,
            goal: value
                .training_goal
                .and_then(|goal| goal.parse().ok())
                .unwrap_or_default(),
            date: value.date,
            total_volume: value.total_volume,
            exercises: value
                .exercises
                .into_iter()
                .map(|e| {
                    Ok(domain::WorkoutExercise {
                        id: e.id.into(),
                        exercise: e.exercise.try_into()?,
                        order: e.order,
                        target_rir: e.target_rir,
                        sets: e.sets.into_iter().map(domain::SetValues::from).collect(),
                    })
                })
                .collect::<Result<Vec<_>, domain::StorageError>>()?,
        })
    }
}

impl From<domain::Workout> for Workout {
    fn from(value: domain::Workout) -> Self {
        Workout {
            id: *value.id,
            name: value.name,
            notes: Some(value.notes),
            duration_minutes: value.duration_minutes,
            training_goal: Some(value.goal.to_string()),
            date: value.date,
            total_volume: value.total_volume,
            exercises: value
                .exercises
                .into_iter()
                .map(|e| WorkoutExercise {
                    id: *e.id,
                    exercise_id: *e.exercise.id,
                    order: e.order,
                    target_rir: e.target_rir,
                    exercise: e.exercise.into(),
                    sets: e.sets.into_iter().map(Set::from).collect(),
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub name: String,
    pub notes: String,
    pub duration_minutes: u32,
    pub training_goal: String,
    pub exercises: Vec<NewWorkoutExercise>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewWorkoutExercise {
    pub exercise_id: u32,
    pub order: u32,
    pub notes: String,
    pub target_rir: f32,
    pub sets: Vec<Set>,
}

impl From<domain::NewWorkout> for NewWorkout {
    fn from(value: domain::NewWorkout) -> Self {
        NewWorkout {
            name: value.name,
            notes: value.notes,
            duration_minutes: value.duration_minutes,
            training_goal: value.goal.to_string(),
            exercises: value
                .exercises
                .into_iter()
                .map(|e| NewWorkoutExercise {
                    exercise_id: *e.exercise_id,
                    order: e.order,
                    notes: e.notes,
                    target_rir: e.target_rir,
                    sets: e.sets.into_iter().map(Set::from).collect(),
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct CurrentSet {
    pub set_number: u32,
    pub weight_kg: f32,
    pub reps: i32,
    pub rir: f32,
}

impl From<domain::CurrentSet> for CurrentSet {
    fn from(value: domain::CurrentSet) -> Self {
        CurrentSet {
            set_number: value.set_number,
            weight_kg: value.weight_kg,
            reps: value.reps,
            rir: value.rir,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Recommendation {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub sets_array: Vec<RecommendedSet>,
    #[serde(default)]
    pub requires_initial_set: bool,
    #[serde(default)]
    pub is_addition: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct RecommendedSet {
    pub weight_kg: f32,
    pub reps: i32,
    #[serde(default)]
    pub target_rir: Option<f32>,
}

impl Recommendation {
    fn into_domain(self, message: String) -> domain::Recommendation {
        if self.requires_initial_set {
            domain::Recommendation::RequiresInitialSet { message }
        } else if !self.success {
            domain::Recommendation::Failed { message }
        } else if self.sets_array.is_empty() {
            domain::Recommendation::NoSetsNeeded { message }
        } else {
            domain::Recommendation::SetsRecommended {
                sets: self
                    .sets_array
                    .into_iter()
                    .map(|s| domain::RecommendedSet {
                        weight_kg: s.weight_kg,
                        reps: s.reps,
                        target_rir: s.target_rir,
                    })
                    .collect(),
                message,
            }
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WorkoutAnalytics {
    pub workout_id: u32,
    #[serde(default)]
    pub date: Option<NaiveDateTime>,
    #[serde(default)]
    pub total_volume: f32,
    #[serde(default)]
    pub total_sets: u32,
    #[serde(default)]
    pub total_reps: u32,
    #[serde(default)]
    pub exercises: Vec<ExerciseAnalytics>,
    #[serde(default)]
    pub muscle_group_volume: BTreeMap<String, f32>,
    #[serde(default)]
    pub intensity_score: f32,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ExerciseAnalytics {
    pub exercise_name: String,
    #[serde(default)]
    pub muscle_group: String,
    #[serde(default)]
    pub volume: f32,
    #[serde(default)]
    pub max_weight: f32,
}

impl From<WorkoutAnalytics> for domain::WorkoutAnalytics {
    fn from(value: WorkoutAnalytics) -> Self {
        domain::WorkoutAnalytics {
            workout_id: value.workout_id.into(),
            date: value.date,
            total_volume: value.total_volume,
            total_sets: value.total_sets,
            total_reps: value.total_reps,
            exercises: value
                .exercises
                .into_iter()
                .map(|e| domain::ExerciseAnalytics {
                    exercise_name: e.exercise_name,
                    muscle_group: e.muscle_group,
                    volume: e.volume,
                    max_weight: e.max_weight,
                })
                .collect(),
            muscle_group_volume: value.muscle_group_volume,
            intensity_score: value.intensity_score,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct UserProgress {
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub total_workouts: u32,
    #[serde(default)]
    pub total_volume_kg: f32,
    #[serde(default)]
    pub avg_volume_per_workout: f32,
    #[serde(default)]
    pub consistency_score: f32,
    #[serde(default)]
    pub muscle_group_distribution: BTreeMap<String, f32>,
    #[serde(default)]
    pub weekly_progress: Vec<WeeklyProgress>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WeeklyProgress {
    pub week: String,
    pub workouts: u32,
    pub volume: f32,
    pub avg_volume_per_workout: f32,
}

impl From<UserProgress> for domain::UserProgress {
    fn from(value: UserProgress) -> Self {
        domain::UserProgress {
            period: value.period,
            total_workouts: value.total_workouts,
            total_volume_kg: value.total_volume_kg,
            avg_volume_per_workout: value.avg_volume_per_workout,
            consistency_score: value.consistency_score,
            muscle_group_distribution: value.muscle_group_distribution,
            weekly_progress: value
                .weekly_progress
                .into_iter()
                .map(|w| domain::WeeklyProgress {
                    week: w.week,
                    workouts: w.workouts,
                    volume: w.volume,
                    avg_volume_per_workout: w.avg_volume_per_workout,
                })
                .collect(),
            error: value.error,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ExerciseStrength {
    pub best_weight: f32,
    pub best_reps: u32,
    pub estimated_1rm: f32,
    pub date: NaiveDateTime,
}

impl From<ExerciseStrength> for domain::ExerciseStrength {
    fn from(value: ExerciseStrength) -> Self {
        domain::ExerciseStrength {
            best_weight: value.best_weight,
            best_reps: value.best_reps,
            estimated_1rm: value.estimated_1rm,
            date: value.date,
        }
    }
}
