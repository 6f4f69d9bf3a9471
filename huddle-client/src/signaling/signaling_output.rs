use async_trait::async_trait;
use huddle_core::ClientSignal;

/// Outbound half of the connection to the relay.
///
/// Implementations deliver signals in the order `emit` is called and do not
/// retry; a dead transport is the owner's problem.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    async fn emit(&self, signal: ClientSignal);
}
