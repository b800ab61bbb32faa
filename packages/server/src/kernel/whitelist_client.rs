use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};

use super::BaseWhitelistService;

/// Minecraft whitelist client
/// Notifies the game server's whitelist plugin about a new member.
pub struct WhitelistClient {
    client: Client,
    url: String,
}

impl WhitelistClient {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[async_trait]
impl BaseWhitelistService for WhitelistClient {
    async fn add_player(&self, minecraft_username: &str) -> Result<()> {
        info!("Whitelisting minecraft user: {}", minecraft_username);

        let response = self
            .client
            .post(&self.url)
            .form(&[("username", minecraft_username)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Whitelist call failed {}: {}", status, body);
            anyhow::bail!("Whitelist server error {}: {}", status, body);
        }

        info!("Whitelist updated for {}", minecraft_username);
        Ok(())
    }
}
