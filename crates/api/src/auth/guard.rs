// Authorization guard
// Decision: Ownership is the only rule; there are no roles
// Decision: Callers run the guard before any store write

use corkboard_core::{Error, Principal, Result, UserId};

use super::session::SessionContext;

/// Fail with `Forbidden` unless the principal is the resource owner
pub fn require_owner(owner_id: UserId, principal: &Principal) -> Result<()> {
    if principal.owns(owner_id) {
        Ok(())
    } else {
        tracing::debug!(owner_id, principal = %principal, "Ownership check failed");
        Err(Error::Forbidden)
    }
}

/// Fail with `Unauthenticated` unless a principal is bound to the request
pub fn require_authenticated(context: &SessionContext) -> Result<Principal> {
    if !context.is_authenticated() {
        tracing::debug!("Anonymous request to a protected route");
    }
    context.current_principal()
}
