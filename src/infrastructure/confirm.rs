use async_trait::async_trait;

/// Yes/no dialog collaborator. The engine awaits the user's choice as a
/// boolean continuation; presentation belongs to the caller.
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

/// Accepts every prompt. Used by the demo driver; tests bring their own
/// recording doubles.
pub struct AlwaysConfirm;

#[async_trait]
impl ConfirmPrompt for AlwaysConfirm {
    async fn confirm(&self, _message: &str) -> bool {
        true
    }
}
