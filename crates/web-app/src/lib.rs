#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use ::log::error;

pub mod editor;
pub mod log;
pub mod service;

pub const LOGIN_PATH: &str = "/login";

/// Navigation between views.
pub trait Navigator {
    fn redirect_to_login(&self);
}

/// Navigator changing the location of the browser window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Browser {
    pub login_path: String,
}

impl Default for Browser {
    fn default() -> Self {
        Self {
            login_path: LOGIN_PATH.to_string(),
        }
    }
}

impl Navigator for Browser {
    fn redirect_to_login(&self) {
        let Some(window) = web_sys::window() else {
            error!("failed to redirect to login: no window");
            return;
        };
        if let Err(err) = window.location().set_href(&self.login_path) {
            error!("failed to redirect to login: {err:?}");
        }
    }
}
