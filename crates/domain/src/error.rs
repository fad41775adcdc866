#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<UpdateError> for CreateError {
    fn from(value: UpdateError) -> Self {
        match value {
            UpdateError::Storage(storage) => CreateError::Storage(storage),
            UpdateError::Other(other) => CreateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("{0} already exists")]
    Conflict(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error("no session")]
    NoSession,
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

macro_rules! storage_error_of {
    ($($error: ident),*) => {
        $(
            impl $error {
                #[must_use]
                pub fn storage(&self) -> Option<&StorageError> {
                    match self {
                        $error::Storage(storage) => Some(storage),
                        $error::Other(_) => None,
                    }
                }

                /// The backend rejected the request because the session is gone.
                #[must_use]
                pub fn is_unauthorized(&self) -> bool {
                    matches!(self.storage(), Some(StorageError::NoSession))
                }
            }
        )*
    };
}

storage_error_of!(ReadError, CreateError, UpdateError, DeleteError);
