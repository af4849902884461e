// # Confirmation Gate
//
// Human-in-the-loop approval before the engine mutates registrar state.
// Modeled as an injectable strategy so the CLI can block on stdin while
// tests substitute an always-approve (or always-deny) stub.
//
// The gate has no timeout: cancellation is process termination or a
// configuration flag that bypasses the gate before the run starts.

use async_trait::async_trait;

/// Trait for confirmation gate implementations
#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    /// Ask for approval; `Ok(true)` approves, `Ok(false)` denies
    async fn confirm(&self, prompt: &str) -> Result<bool, crate::Error>;
}

/// Gate that approves everything without asking
///
/// For non-interactive embedders of the engine; interactive frontends
/// install their own prompting gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

#[async_trait]
impl ConfirmationGate for AutoApprove {
    async fn confirm(&self, _prompt: &str) -> Result<bool, crate::Error> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn auto_approve_always_approves() {
        let gate = AutoApprove;
        assert!(gate.confirm("rewrite nameservers?").await.unwrap());
    }
}
