use std::collections::VecDeque;

use gloo_storage::Storage as GlooStorage;
use gymlog_domain as domain;
use gymlog_web_app::log;

use crate::rest::TokenRepository;

/// Bearer token of the current session.
///
/// The token is stored as a plain string. Tokens written under the legacy key are still read and
/// are removed together with the current one.
#[derive(Debug, Default, Clone, Copy)]
pub struct Token;

const KEY_TOKEN: &str = "auth_token";
const KEY_TOKEN_LEGACY: &str = "access_token";

impl TokenRepository for Token {
    fn read_token(&self) -> Option<String> {
        let storage = gloo_storage::LocalStorage::raw();
        [KEY_TOKEN, KEY_TOKEN_LEGACY]
            .into_iter()
            .find_map(|key| storage.get_item(key).ok().flatten())
            .filter(|token| !token.is_empty())
    }

    fn write_token(&self, token: &str) -> Result<(), domain::StorageError> {
        gloo_storage::LocalStorage::raw()
            .set_item(KEY_TOKEN, token)
            .map_err(|err| domain::StorageError::Other(format!("{err:?}").into()))
    }

    fn delete_token(&self) {
        gloo_storage::LocalStorage::delete(KEY_TOKEN);
        gloo_storage::LocalStorage::delete(KEY_TOKEN_LEGACY);
    }
}

pub struct Log;

const KEY_LOG: &str = "log";
const MAX_LOG_ENTRIES: usize = 100;

impl log::Repository for Log {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match gloo_storage::LocalStorage::get(KEY_LOG) {
            Ok(entries) => Ok(entries),
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(VecDeque::new()),
            Err(err) => Err(log::Error::Unknown(err.to_string())),
        }
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(MAX_LOG_ENTRIES);
        gloo_storage::LocalStorage::set(KEY_LOG, entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn clear_entries(&self) -> Result<(), log::Error> {
        gloo_storage::LocalStorage::delete(KEY_LOG);
        Ok(())
    }
}
