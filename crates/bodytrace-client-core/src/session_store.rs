//! Durable storage of the logged in identity
//!
//! The store is the only writer of the session. Screens read an immutable
//! snapshot with [`SessionStore::session`].

use std::{
    fmt::Debug,
    sync::{Arc, Mutex},
};

use anyhow::Context as _;
use bodytrace_shared::{
    session::{Session, UnrecognizedRoleError},
    uac::LoginIdentity,
};
use tracing::{info, warn};

/// Somewhere a session can survive a restart of the client
pub trait SessionPersistence: Debug + Send + Sync {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> anyhow::Result<Option<Session>>;
    fn save(&self, session: &Session) -> anyhow::Result<()>;
    /// Removes the stored copy. Must succeed if nothing is stored.
    fn erase(&self) -> anyhow::Result<()>;
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<SessionStoreInner>>,
}

#[derive(Debug)]
struct SessionStoreInner {
    session: Arc<Session>,
    persistence: Box<dyn SessionPersistence>,
}

impl SessionStore {
    /// Loads any previously persisted session. Unreadable or inconsistent
    /// values are discarded and the store starts logged out.
    #[tracing::instrument]
    pub fn new(persistence: Box<dyn SessionPersistence>) -> Self {
        let session = match persistence.load() {
            Ok(Some(session)) if session.is_consistent() => {
                info!(role = ?session.role(), "restored persisted session");
                session
            }
            Ok(Some(session)) => {
                warn!(?session, "discarding inconsistent persisted session");
                bodytrace_shared::log_err_as_warn!(persistence.erase());
                Session::default()
            }
            Ok(None) => Session::default(),
            Err(e) => {
                warn!("failed to load persisted session: {e:#}");
                Session::default()
            }
        };
        Self {
            inner: Arc::new(Mutex::new(SessionStoreInner {
                session: Arc::new(session),
                persistence,
            })),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::<InMemorySession>::default())
    }

    pub fn session(&self) -> Arc<Session> {
        Arc::clone(&self.inner.lock().expect("mutex poisoned").session)
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .session
            .is_logged_in()
    }

    /// Replaces every field with the identity returned by the server. If the
    /// identity has no usable role the current session is kept unchanged.
    #[tracing::instrument]
    pub fn set_session(
        &self,
        identity: LoginIdentity,
    ) -> Result<Arc<Session>, UnrecognizedRoleError> {
        let session = Arc::new(Session::try_from_identity(identity)?);
        let mut guard = self.inner.lock().expect("mutex poisoned");
        guard.session = Arc::clone(&session);
        if let Err(e) = guard.persistence.save(&session) {
            warn!("session will not survive a restart: {e:#}");
        }
        Ok(session)
    }

    /// Resets to the logged out state and erases the persisted copy
    #[tracing::instrument]
    pub fn clear_session(&self) {
        let mut guard = self.inner.lock().expect("mutex poisoned");
        guard.session = Arc::new(Session::default());
        bodytrace_shared::log_err_as_error!(guard.persistence.erase());
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[derive(Debug, Default)]
pub struct InMemorySession {
    stored: Mutex<Option<Session>>,
}

impl SessionPersistence for InMemorySession {
    fn load(&self) -> anyhow::Result<Option<Session>> {
        Ok(self.stored.lock().expect("mutex poisoned").clone())
    }

    fn save(&self, session: &Session) -> anyhow::Result<()> {
        *self.stored.lock().expect("mutex poisoned") = Some(session.clone());
        Ok(())
    }

    fn erase(&self) -> anyhow::Result<()> {
        *self.stored.lock().expect("mutex poisoned") = None;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::JsonFileSession;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use super::*;

    /// Stores the session as JSON in a file
    #[derive(Debug, Clone)]
    pub struct JsonFileSession {
        path: PathBuf,
    }

    impl JsonFileSession {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &std::path::Path {
            &self.path
        }
    }

    impl SessionPersistence for JsonFileSession {
        fn load(&self) -> anyhow::Result<Option<Session>> {
            let contents = match std::fs::read_to_string(&self.path) {
                Ok(contents) => contents,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
                Err(e) => {
                    return Err(e).with_context(|| format!("failed to read {:?}", self.path))
                }
            };
            let session = serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse session file {:?}", self.path))?;
            Ok(Some(session))
        }

        fn save(&self, session: &Session) -> anyhow::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create folder {parent:?}"))?;
            }
            let contents =
                serde_json::to_string_pretty(session).context("failed to serialize session")?;
            std::fs::write(&self.path, contents)
                .with_context(|| format!("failed to write {:?}", self.path))
        }

        fn erase(&self) -> anyhow::Result<()> {
            match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e).with_context(|| format!("failed to remove {:?}", self.path)),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageSession;

#[cfg(target_arch = "wasm32")]
mod web {
    use anyhow::anyhow;

    use super::*;

    /// Stores the session as JSON in the browser's local storage
    #[derive(Debug, Clone)]
    pub struct LocalStorageSession {
        key: String,
    }

    impl LocalStorageSession {
        pub fn new(key: impl Into<String>) -> Self {
            Self { key: key.into() }
        }

        fn storage() -> anyhow::Result<web_sys::Storage> {
            web_sys::window()
                .context("no window found")?
                .local_storage()
                .map_err(|e| anyhow!("failed to access local storage: {e:?}"))?
                .context("local storage not available")
        }
    }

    impl Default for LocalStorageSession {
        fn default() -> Self {
            Self::new(bodytrace_shared::const_config::client::CLIENT_SESSION_STORAGE_KEY)
        }
    }

    impl SessionPersistence for LocalStorageSession {
        fn load(&self) -> anyhow::Result<Option<Session>> {
            let Some(value) = Self::storage()?
                .get_item(&self.key)
                .map_err(|e| anyhow!("failed to read {:?}: {e:?}", self.key))?
            else {
                return Ok(None);
            };
            Ok(Some(
                serde_json::from_str(&value).context("failed to parse stored session")?,
            ))
        }

        fn save(&self, session: &Session) -> anyhow::Result<()> {
            let value = serde_json::to_string(session).context("failed to serialize session")?;
            Self::storage()?
                .set_item(&self.key, &value)
                .map_err(|e| anyhow!("failed to write {:?}: {e:?}", self.key))
        }

        fn erase(&self) -> anyhow::Result<()> {
            Self::storage()?
                .remove_item(&self.key)
                .map_err(|e| anyhow!("failed to remove {:?}: {e:?}", self.key))
        }
    }
}
