use latchkey_core::{Claims, Email, Notifier, NotifierError, ResetToken};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use super::templates::render_password_reset;

/// Delivers password reset emails through the Postmark HTTP API.
pub struct PostmarkNotifier {
    http_client: Client,
    base_url: String,
    sender: Email,
    authorization_token: Secret<String>,
    link_base_url: String,
}

impl PostmarkNotifier {
    pub fn new(
        base_url: String,
        sender: Email,
        authorization_token: Secret<String>,
        link_base_url: String,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
            link_base_url,
        }
    }
}

#[async_trait::async_trait]
impl Notifier for PostmarkNotifier {
    #[tracing::instrument(name = "Sending password reset email", skip_all)]
    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        token: &ResetToken,
        claims: &Claims,
    ) -> Result<(), NotifierError> {
        let message = render_password_reset(recipient, token, claims, &self.link_base_url)?;

        let base =
            Url::parse(&self.base_url).map_err(|e| NotifierError::Delivery(e.to_string()))?;
        let url = base
            .join("/email")
            .map_err(|e| NotifierError::Delivery(e.to_string()))?;

        let request_body = SendEmailRequest {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            subject: message.subject,
            html_body: &message.html_body,
            text_body: &message.text_body,
            message_stream: MESSAGE_STREAM,
        };

        self.http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await
            .map_err(|e| NotifierError::Delivery(e.to_string()))?
            .error_for_status()
            .map_err(|e| NotifierError::Delivery(e.to_string()))?;

        Ok(())
    }
}

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}
