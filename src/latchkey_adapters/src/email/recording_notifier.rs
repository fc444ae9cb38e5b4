use std::sync::Arc;
use tokio::sync::RwLock;

use latchkey_core::{Claims, Email, Notifier, NotifierError, ResetToken};

#[derive(Debug, Clone)]
pub struct SentResetEmail {
    pub recipient: Email,
    pub token: ResetToken,
    pub claims: Claims,
}

/// Keeps reset emails in memory instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<RwLock<Vec<SentResetEmail>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentResetEmail> {
        self.sent.read().await.clone()
    }

    /// The most recent reset token mailed to `recipient`.
    pub async fn last_token_for(&self, recipient: &Email) -> Option<ResetToken> {
        self.sent
            .read()
            .await
            .iter()
            .rev()
            .find(|email| &email.recipient == recipient)
            .map(|email| email.token.clone())
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        token: &ResetToken,
        claims: &Claims,
    ) -> Result<(), NotifierError> {
        tracing::info!("Recorded password reset email");
        self.sent.write().await.push(SentResetEmail {
            recipient: recipient.clone(),
            token: token.clone(),
            claims: claims.clone(),
        });
        Ok(())
    }
}
