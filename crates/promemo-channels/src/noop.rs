//! Log-only transport for credential-less runs.

use async_trait::async_trait;

use promemo_core::error::Result;
use promemo_core::traits::Transport;

pub struct NoopTransport;

#[async_trait]
impl Transport for NoopTransport {
    fn name(&self) -> &str {
        "noop"
    }

    async fn send(&self, recipient: &str, body: &str) -> Result<()> {
        tracing::info!("[dry-run] to {recipient}: {body}");
        Ok(())
    }
}
