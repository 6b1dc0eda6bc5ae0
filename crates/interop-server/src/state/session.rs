//! Caller identity handed to request handlers.

use serde::Serialize;

use crate::persistence::TeamUser;

/// Proof that the caller presented a valid session token.
///
/// Only the auth layer can mint one, so holding a value is the
/// authentication check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    id: i64,
    username: String,
}

impl AuthenticatedUser {
    pub(crate) fn from_user(user: &TeamUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}
