pub mod postmark_notifier;
pub mod recording_notifier;
pub mod templates;

pub use postmark_notifier::PostmarkNotifier;
pub use recording_notifier::{RecordingNotifier, SentResetEmail};
pub use templates::{PasswordResetMessage, render_password_reset};
