//! Demo authentication: one hardcoded account, session kept in memory

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEMO_NAME: &str = "Jack";
pub const DEMO_EMAIL: &str = "jack@example.com";
pub const DEMO_PASSWORD: &str = "qwerty";
pub const DEMO_AVATAR: &str = "https://i.pravatar.cc/100?u=zz";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct User {
    pub name: String,
    pub email: String,
    pub avatar: String,
}

impl User {
    pub fn demo() -> Self {
        Self {
            name: DEMO_NAME.into(),
            email: DEMO_EMAIL.into(),
            avatar: DEMO_AVATAR.into(),
        }
    }
}

/// Auth store. `user` and `is_authenticated` always change together.
///
/// Loaded state is rebuilt from the user alone, so a saved snapshot cannot
/// claim a session without one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(from = "StoredAuth")]
pub struct AuthState {
    user: Option<User>,
    is_authenticated: bool,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct StoredAuth {
    user: Option<User>,
}

impl From<StoredAuth> for AuthState {
    fn from(stored: StoredAuth) -> Self {
        Self {
            is_authenticated: stored.user.is_some(),
            user: stored.user,
        }
    }
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Start a session if the credentials match the demo account.
    ///
    /// A mismatch leaves the state untouched; callers read
    /// [`AuthState::is_authenticated`] (or the return value) to tell.
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        if email != DEMO_EMAIL || password != DEMO_PASSWORD {
            return false;
        }
        self.user = Some(User::demo());
        self.is_authenticated = true;
        true
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.is_authenticated = false;
    }
}
