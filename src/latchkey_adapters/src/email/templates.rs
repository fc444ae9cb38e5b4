use askama::Template;
use latchkey_core::{Claims, Email, NotifierError, ResetToken};
use reqwest::Url;
use secrecy::ExposeSecret;

pub const PASSWORD_RESET_SUBJECT: &str = "Reset your password";

#[derive(Template)]
#[template(path = "password_reset.txt")]
struct PasswordResetText<'a> {
    recipient: &'a str,
    name: Option<&'a str>,
    reset_token: &'a str,
    reset_link: &'a str,
}

#[derive(Template)]
#[template(path = "password_reset.html")]
struct PasswordResetHtml<'a> {
    recipient: &'a str,
    name: Option<&'a str>,
    reset_token: &'a str,
    reset_link: &'a str,
}

/// A rendered password reset email, ready to hand to a transport.
#[derive(Debug, Clone)]
pub struct PasswordResetMessage {
    pub subject: &'static str,
    pub text_body: String,
    pub html_body: String,
}

/// Renders the reset message. A string `name` claim personalises the greeting.
pub fn render_password_reset(
    recipient: &Email,
    token: &ResetToken,
    claims: &Claims,
    link_base_url: &str,
) -> Result<PasswordResetMessage, NotifierError> {
    let recipient = recipient.as_ref().expose_secret();
    let reset_token = token.as_ref().expose_secret();
    let name = claims.get("name").and_then(|value| value.as_str());

    let reset_link = Url::parse_with_params(
        link_base_url,
        &[("email", recipient.as_str()), ("reset_token", reset_token.as_str())],
    )
    .map_err(|e| NotifierError::Template(format!("invalid reset link base: {e}")))?;

    let text_body = PasswordResetText {
        recipient,
        name,
        reset_token,
        reset_link: reset_link.as_str(),
    }
    .render()
    .map_err(|e| NotifierError::Template(e.to_string()))?;

    let html_body = PasswordResetHtml {
        recipient,
        name,
        reset_token,
        reset_link: reset_link.as_str(),
    }
    .render()
    .map_err(|e| NotifierError::Template(e.to_string()))?;

    Ok(PasswordResetMessage {
        subject: PASSWORD_RESET_SUBJECT,
        text_body,
        html_body,
    })
}
