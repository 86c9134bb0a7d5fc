use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use super::token_store::{PersistedSession, SessionError, TokenStore};
use crate::gateway::Credentials;

/// Label used when a restored token has none stored with it
pub const DEFAULT_USER_LABEL: &str = "Admin";

/// Current login state. A token exists only in the authenticated variant, so
/// "authenticated without a token" cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { token: String, user_label: String },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }

    pub fn user_label(&self) -> Option<&str> {
        match self {
            Session::Authenticated { user_label, .. } => Some(user_label),
            Session::Anonymous => None,
        }
    }
}

/// Owner of the session. Cloning shares the same state.
///
/// Every read returns a whole [`Session`] snapshot, and writers replace the
/// whole value under the write lock, so no reader observes a half-applied
/// login or logout.
#[derive(Debug, Clone)]
pub struct SessionStore {
    current: Arc<RwLock<Session>>,
    tokens: Arc<dyn TokenStore>,
}

impl SessionStore {
    /// Start-up: a persisted token alone makes the session authenticated.
    /// The token is not re-validated against the backend.
    pub fn restore(tokens: Arc<dyn TokenStore>) -> Self {
        let session = match tokens.load() {
            Ok(Some(PersistedSession { token, user_label })) if !token.is_empty() => {
                info!("restored persisted session");
                Session::Authenticated {
                    token,
                    user_label: user_label.unwrap_or_else(|| DEFAULT_USER_LABEL.to_string()),
                }
            }
            Ok(_) => Session::Anonymous,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable persisted session");
                Session::Anonymous
            }
        };

        Self {
            current: Arc::new(RwLock::new(session)),
            tokens,
        }
    }

    pub async fn snapshot(&self) -> Session {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_authenticated()
    }

    pub async fn token(&self) -> Option<String> {
        self.current.read().await.token().map(str::to_string)
    }

    pub async fn user_label(&self) -> Option<String> {
        self.current.read().await.user_label().map(str::to_string)
    }

    /// Persist `credentials`, then publish them. If persisting fails the
    /// in-memory session is left untouched.
    pub async fn establish(&self, credentials: Credentials) -> Result<(), SessionError> {
        let mut current = self.current.write().await;

        let persisted = PersistedSession {
            token: credentials.token.clone(),
            user_label: Some(credentials.user_label.clone()),
        };
        self.persist(move |tokens| tokens.save(&persisted)).await?;

        *current = Session::Authenticated {
            token: credentials.token,
            user_label: credentials.user_label,
        };
        Ok(())
    }

    /// Drop the persisted token and return to anonymous.
    pub async fn clear(&self) -> Result<(), SessionError> {
        let mut current = self.current.write().await;
        self.persist(|tokens| tokens.clear()).await?;
        *current = Session::Anonymous;
        Ok(())
    }

    /// Run a blocking token-store call off the async workers. Callers hold
    /// the session write guard across it so readers never see a session
    /// that disagrees with what was persisted.
    async fn persist<F>(&self, op: F) -> Result<(), SessionError>
    where
        F: FnOnce(&dyn TokenStore) -> Result<(), SessionError> + Send + 'static,
    {
        let tokens = Arc::clone(&self.tokens);
        tokio::task::spawn_blocking(move || op(&*tokens))
            .await
            .map_err(|e| SessionError::Unavailable(e.to_string()))?
    }
}
