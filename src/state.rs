//! Application state shared across request handlers.
//!
//! The state is wired once during startup at the composition root and then
//! cloned (cheaply, as it contains reference-counted types) for each
//! incoming request through Axum's state extraction.

use std::sync::Arc;

use crate::config::SignaturePolicy;
use crate::scheduler::retry::RetryScheduler;
use crate::service::command::CommandRouter;

/// Shared resources for the webhook server.
#[derive(Clone)]
pub struct AppState {
    /// Interaction command router with all collaborators injected.
    pub command_router: Arc<CommandRouter>,

    /// Retry queue handle, exposed for health introspection.
    pub scheduler: Arc<RetryScheduler>,

    /// How inbound webhook signatures are checked.
    pub signature_policy: SignaturePolicy,
}

impl AppState {
    pub fn new(
        command_router: Arc<CommandRouter>,
        scheduler: Arc<RetryScheduler>,
        signature_policy: SignaturePolicy,
    ) -> Self {
        Self {
            command_router,
            scheduler,
            signature_policy,
        }
    }
}
