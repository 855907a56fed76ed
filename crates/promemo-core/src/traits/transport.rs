//! Message transport contract.

use async_trait::async_trait;

use crate::error::Result;

/// One-way message transport to a messaging channel.
///
/// Implementations must bound each send (request timeout or similar);
/// callers never await a send unboundedly.
#[async_trait]
pub trait Transport: Send + Sync {
    fn name(&self) -> &str;

    /// Deliver `body` to `recipient`. Errors carry the failure reason.
    async fn send(&self, recipient: &str, body: &str) -> Result<()>;
}
