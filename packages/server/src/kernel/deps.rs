//! Server dependencies for route handlers and workflows (using traits for testability)

use anyhow::Result;
use async_trait::async_trait;
use sendgrid::SendGridService;
use serde_json::Value;
use std::sync::Arc;

use super::{BaseMailer, BaseMemberStore, BaseWhitelistService};

// =============================================================================
// SendGridService Adapter (implements BaseMailer trait)
// =============================================================================

/// Wrapper around SendGridService that implements the BaseMailer trait.
/// Holds the fixed remote template id every welcome email renders from.
pub struct SendGridAdapter {
    service: Arc<SendGridService>,
    template_id: String,
}

impl SendGridAdapter {
    pub fn new(service: Arc<SendGridService>, template_id: String) -> Self {
        Self {
            service,
            template_id,
        }
    }
}

#[async_trait]
impl BaseMailer for SendGridAdapter {
    async fn send_welcome_email(
        &self,
        recipient: &str,
        recipient_name: &str,
        template_data: Value,
    ) -> Result<()> {
        self.service
            .send_template_email(&self.template_id, recipient, recipient_name, template_data)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to route handlers and workflows
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn BaseMemberStore>,
    pub mailer: Arc<dyn BaseMailer>,
    /// Whitelist server client (optional — not all deployments run one)
    pub whitelist: Option<Arc<dyn BaseWhitelistService>>,
}

impl ServerDeps {
    pub fn new(
        store: Arc<dyn BaseMemberStore>,
        mailer: Arc<dyn BaseMailer>,
        whitelist: Option<Arc<dyn BaseWhitelistService>>,
    ) -> Self {
        Self {
            store,
            mailer,
            whitelist,
        }
    }
}
