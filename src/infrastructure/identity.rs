use std::fmt;

use uuid::Uuid;

use crate::errors::AppError;

/// Identifier of the signed-in account owning a record collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new(id: Uuid) -> Self {
        UserId(id)
    }

    pub fn random() -> Self {
        UserId(Uuid::new_v4())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supplies the current account. Store operations never read ambient auth
/// state; callers resolve identity through this trait and pass the owner in.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserId>;
}

/// Fixed identity, for the demo driver and tests.
pub struct StaticIdentity(Option<UserId>);

impl StaticIdentity {
    pub fn signed_in(user: UserId) -> Self {
        StaticIdentity(Some(user))
    }

    pub fn signed_out() -> Self {
        StaticIdentity(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.0.clone()
    }
}

pub fn require_user<I: IdentityProvider + ?Sized>(identity: &I) -> Result<UserId, AppError> {
    identity.current_user().ok_or(AppError::Unauthenticated)
}
