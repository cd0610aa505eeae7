// Principal - the authenticated identity of one request

use serde::{Deserialize, Serialize};

/// Identifier of a user (credential row id)
pub type UserId = i64;

/// Authenticated identity resolved for a single request.
///
/// Only produced by successful token verification or login. Carries nothing
/// but the user id, so it is cheap to copy into service calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
}

impl Principal {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Whether this principal is the given owner
    pub fn owns(&self, owner_id: UserId) -> bool {
        self.user_id == owner_id
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.user_id)
    }
}
