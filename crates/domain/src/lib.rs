#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod analytics;
mod composition;
mod error;
mod exercise;
mod name;
mod recommendation;
mod service;
mod session;
mod timer;
mod user;
mod validation;
mod workout;

pub use analytics::*;
pub use composition::*;
pub use error::*;
pub use exercise::*;
pub use name::*;
pub use recommendation::*;
pub use service::*;
pub use session::*;
pub use timer::*;
pub use user::*;
pub use validation::*;
pub use workout::*;
