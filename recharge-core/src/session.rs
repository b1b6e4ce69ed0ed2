//! Client-side session: identity and credential of the logged-in user.
//!
//! A `Session` is an explicit value. It is loaded once when the app starts
//! (`Session::load`), persisted after a successful login (`Session::persist`)
//! and torn down on logout (`Session::clear`). Nothing else reads the
//! session keys directly.
use serde::{Deserialize, Serialize};

use crate::constants::{KEY_CURRENT_USER, KEY_LOGGED_IN, KEY_TOKEN, KEY_USER_ROLE, LOGGED_IN_FLAG};
use crate::numbers::de_lenient_text;
use crate::storage::{LocalStore, read_json, write_json};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parse a role string; anything other than `admin` is a regular user.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if text.trim().eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::User
        }
    }
}

/// Identity of the logged-in user as stored alongside the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(default, deserialize_with = "de_lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "de_lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "de_lenient_text")]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub logged_in: bool,
    pub role: Role,
    pub token: Option<String>,
    pub current_user: Option<CurrentUser>,
}

impl Session {
    /// A logged-out session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build a logged-in session from a successful login reply.
    #[must_use]
    pub fn logged_in(role: Role, token: Option<String>, user: Option<CurrentUser>) -> Self {
        Self {
            logged_in: true,
            role,
            token: token.filter(|t| !t.trim().is_empty()),
            current_user: user,
        }
    }

    /// Restore the session persisted in `store`. Missing or unreadable keys
    /// yield the corresponding empty field rather than an error.
    pub fn load<S: LocalStore + ?Sized>(store: &S) -> Self {
        let read = |key: &str| match store.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("session key {key} unreadable: {err}");
                None
            }
        };
        let logged_in = read(KEY_LOGGED_IN).as_deref() == Some(LOGGED_IN_FLAG);
        let role = read(KEY_USER_ROLE).map_or(Role::User, |r| Role::parse(&r));
        let token = read(KEY_TOKEN).filter(|t| !t.trim().is_empty());
        let current_user = read_json::<_, CurrentUser>(store, KEY_CURRENT_USER);
        Self {
            logged_in,
            role,
            token,
            current_user,
        }
    }

    /// Write this session to `store`.
    ///
    /// # Errors
    ///
    /// Returns the store error from the first failing write.
    pub fn persist<S: LocalStore + ?Sized>(&self, store: &S) -> Result<(), S::Error> {
        if self.logged_in {
            store.set_item(KEY_LOGGED_IN, LOGGED_IN_FLAG)?;
        } else {
            store.remove_item(KEY_LOGGED_IN)?;
        }
        store.set_item(KEY_USER_ROLE, self.role.as_str())?;
        match &self.token {
            Some(token) => store.set_item(KEY_TOKEN, token)?,
            None => store.remove_item(KEY_TOKEN)?,
        }
        match &self.current_user {
            Some(user) => write_json(store, KEY_CURRENT_USER, user)?,
            None => store.remove_item(KEY_CURRENT_USER)?,
        }
        Ok(())
    }

    /// Remove every session key from `store`. The local recharge mirror and
    /// the scratch mobile number are left in place.
    ///
    /// # Errors
    ///
    /// Returns the store error from the first failing removal.
    pub fn clear<S: LocalStore + ?Sized>(store: &S) -> Result<(), S::Error> {
        for key in [KEY_LOGGED_IN, KEY_USER_ROLE, KEY_CURRENT_USER, KEY_TOKEN] {
            store.remove_item(key)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.logged_in && self.role == Role::Admin
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Email of the current user, when one is known and non-blank.
    #[must_use]
    pub fn user_email(&self) -> Option<&str> {
        self.current_user
            .as_ref()
            .map(|u| u.email.as_str())
            .filter(|e| !e.trim().is_empty())
    }

    /// Id of the current user, when one is known and non-blank.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.current_user
            .as_ref()
            .map(|u| u.id.as_str())
            .filter(|id| !id.trim().is_empty())
    }

    /// Display name for the header; falls back to the email.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        let user = self.current_user.as_ref()?;
        if user.name.trim().is_empty() {
            self.user_email()
        } else {
            Some(user.name.as_str())
        }
    }
}
