use std::future::Future;

use tracing::{info, warn};

use super::store::{Session, SessionStore};
use crate::error::AppError;
use crate::gateway::AuthGateway;

/// Login entry point every protected route redirects to
pub const LOGIN_PATH: &str = "/auth/login";

/// Where a successful login lands
pub const HOME_PATH: &str = "/dashboard/overview";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Dashboard,
    Overview,
    Organizations,
    People,
}

impl Route {
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        match normalized {
            "/" | "" => Some(Route::Root),
            "/auth" | "/auth/login" => Some(Route::Login),
            "/dashboard" => Some(Route::Dashboard),
            "/dashboard/overview" => Some(Route::Overview),
            "/dashboard/companies" => Some(Route::Organizations),
            "/dashboard/employees" => Some(Route::People),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => LOGIN_PATH,
            Route::Dashboard => "/dashboard",
            Route::Overview => HOME_PATH,
            Route::Organizations => "/dashboard/companies",
            Route::People => "/dashboard/employees",
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::Overview | Route::Organizations | Route::People
        )
    }
}

/// Where a navigation request ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(&'static str),
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

/// Result of rendering a protected view
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome<T> {
    Rendered(T),
    Redirect(&'static str),
}

impl<T> GuardOutcome<T> {
    /// Convert a redirect into [`AppError::NotAuthenticated`]
    pub fn into_result(self) -> Result<T, AppError> {
        match self {
            GuardOutcome::Rendered(value) => Ok(value),
            GuardOutcome::Redirect(path) => Err(AppError::NotAuthenticated(path)),
        }
    }
}

/// Gatekeeper for protected views and the only path into and out of the
/// authenticated state.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    store: SessionStore,
}

impl SessionGuard {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub async fn state(&self) -> AuthState {
        if self.store.is_authenticated().await {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    /// Authenticate and, on success, persist and publish the session.
    /// Any failure leaves the session as it was.
    pub async fn login<G>(&self, gateway: &G, email: &str, password: &str) -> Result<Route, AppError>
    where
        G: AuthGateway + ?Sized,
    {
        let credentials = gateway.authenticate(email, password).await.map_err(|e| {
            warn!(error = %e, "login failed");
            AppError::Authentication(e)
        })?;

        self.store.establish(credentials).await?;
        info!("login succeeded");
        Ok(Route::Overview)
    }

    /// Purely local: the backend is not told.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.store.clear().await?;
        info!("logged out");
        Ok(())
    }

    /// Resolve a path against the route table and the current session.
    pub async fn navigate(&self, path: &str) -> Navigation {
        let Some(route) = Route::parse(path) else {
            return Navigation::NotFound;
        };
        let authenticated = self.state().await == AuthState::Authenticated;

        match route {
            Route::Root if authenticated => Navigation::Redirect(HOME_PATH),
            Route::Root => Navigation::Redirect(LOGIN_PATH),
            Route::Dashboard if authenticated => Navigation::Redirect(HOME_PATH),
            route if route.is_protected() && !authenticated => Navigation::Redirect(LOGIN_PATH),
            route => Navigation::Render(route),
        }
    }

    /// Run `view` only when authenticated; otherwise redirect to login
    /// without executing it.
    pub async fn render<T, F, Fut>(&self, view: F) -> GuardOutcome<T>
    where
        F: FnOnce(Session) -> Fut,
        Fut: Future<Output = T>,
    {
        let session = self.store.snapshot().await;
        if !session.is_authenticated() {
            return GuardOutcome::Redirect(LOGIN_PATH);
        }
        GuardOutcome::Rendered(view(session).await)
    }
}
