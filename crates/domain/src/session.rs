use crate::{CreateError, Credentials, DeleteError, NewUser, ReadError, User};

#[allow(async_fn_in_trait)]
pub trait SessionService {
    async fn request_session(&self, credentials: Credentials) -> Result<User, ReadError>;
    async fn register(&self, user: NewUser) -> Result<User, CreateError>;
    async fn get_session(&self) -> Result<User, ReadError>;
    async fn delete_session(&self) -> Result<(), DeleteError>;
}

/// Authentication against the backend.
///
/// A successful login or registration stores the access token, which is attached to every
/// subsequent request until the session is deleted or rejected by the backend.
#[allow(async_fn_in_trait)]
pub trait SessionRepository {
    async fn request_session(&self, credentials: Credentials) -> Result<User, ReadError>;
    async fn create_account(&self, user: NewUser) -> Result<User, CreateError>;
    async fn initialize_session(&self) -> Result<User, ReadError>;
    async fn delete_session(&self) -> Result<(), DeleteError>;
}
