// https://www.twilio.com/docs/sendgrid/api-reference/mail-send/mail-send

pub mod models;

use reqwest::Client;
use serde_json::Value;

use crate::models::{EmailAddress, MailSendRequest, Personalization};

#[derive(Debug, Clone)]
pub struct SendGridOptions {
    pub api_key: String,
    pub from_email: String,
    pub from_name: String,
}

#[derive(Debug, Clone)]
pub struct SendGridService {
    options: SendGridOptions,
}

impl SendGridService {
    pub fn new(options: SendGridOptions) -> Self {
        Self { options }
    }

    /// Send one transactional email rendered from a dynamic template.
    ///
    /// `dynamic_template_data` is handed to the remote template verbatim.
    pub async fn send_template_email(
        &self,
        template_id: &str,
        recipient: &str,
        recipient_name: &str,
        dynamic_template_data: Value,
    ) -> Result<(), &'static str> {
        let body = MailSendRequest {
            personalizations: vec![Personalization {
                to: vec![EmailAddress {
                    email: recipient.to_string(),
                    name: Some(recipient_name.to_string()),
                }],
                dynamic_template_data,
            }],
            from: EmailAddress {
                email: self.options.from_email.clone(),
                name: Some(self.options.from_name.clone()),
            },
            template_id: template_id.to_string(),
        };

        let client = Client::new();
        let res = client
            .post("https://api.sendgrid.com/v3/mail/send")
            .bearer_auth(&self.options.api_key)
            .json(&body)
            .send()
            .await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    // Log the error response from SendGrid
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("SendGrid error ({}): {}", status, error_body);
                    return Err("SendGrid returned an error");
                }
                Ok(())
            }
            Err(e) => {
                eprintln!("Request to SendGrid failed: {}", e);
                Err("Error sending email")
            }
        }
    }
}
