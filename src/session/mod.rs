pub mod guard;
pub mod store;
pub mod token_store;

pub use guard::{AuthState, GuardOutcome, Navigation, Route, SessionGuard, HOME_PATH, LOGIN_PATH};
pub use store::{Session, SessionStore, DEFAULT_USER_LABEL};
pub use token_store::{FileTokenStore, MemoryTokenStore, PersistedSession, SessionError, TokenStore, TOKEN_KEY};
