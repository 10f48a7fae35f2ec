use std::sync::Mutex;

use async_trait::async_trait;

/// Subject of the password reset mail
pub const FORGOT_PASSWORD_SUBJECT: &str = "Forgot Password";

/// Outbound mail abstraction
///
/// Delivery is best-effort: implementations return `false` on failure and the
/// caller decides how to surface it.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, recipients: &[String], subject: &str, html_body: &str) -> bool;
}

/// Default sender used when no mail transport is configured
///
/// Logs the envelope at info level and reports success; the body is never logged.
#[derive(Debug, Clone)]
pub struct LogEmailSender {
    from: String,
}

impl LogEmailSender {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, recipients: &[String], subject: &str, _html_body: &str) -> bool {
        tracing::info!(
            from = %self.from,
            to = ?recipients,
            subject = %subject,
            "Outgoing email logged; no mail transport configured"
        );
        true
    }
}

/// A message captured by [`MemoryEmailSender`]
#[derive(Debug, Clone, PartialEq)]
pub struct SentEmail {
    pub recipients: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

/// In-memory sender that records every message, optionally failing delivery
#[derive(Debug, Default)]
pub struct MemoryEmailSender {
    sent: Mutex<Vec<SentEmail>>,
    fail: bool,
}

impl MemoryEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose every delivery fails
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl EmailSender for MemoryEmailSender {
    async fn send(&self, recipients: &[String], subject: &str, html_body: &str) -> bool {
        if self.fail {
            return false;
        }

        match self.sent.lock() {
            Ok(mut sent) => {
                sent.push(SentEmail {
                    recipients: recipients.to_vec(),
                    subject: subject.to_string(),
                    html_body: html_body.to_string(),
                });
                true
            }
            Err(_) => false,
        }
    }
}

/// HTML body of the password reset mail
pub fn forgot_password_email(name: &str, otp: &str) -> String {
    format!(
        "<html><body><p>Hi <strong>{}</strong>, your OTP for password reset is <strong>{}</strong> and it's valid for 10 minutes.</p></body></html>",
        name, otp
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forgot_password_template() {
        let body = forgot_password_email("Jane", "042917");
        assert!(body.starts_with("<html><body><p>"));
        assert!(body.contains("Hi <strong>Jane</strong>"));
        assert!(body.contains("<strong>042917</strong>"));
        assert!(body.contains("valid for 10 minutes"));
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_log_sender_logs_envelope_and_reports_success() {
        let log = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer({
                let log = log.clone();
                move || log.clone()
            })
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let sender = LogEmailSender::new("no-reply@localhost");
        let delivered = sender
            .send(&["a@example.com".to_string()], "Subject", "<p>secret-body</p>")
            .await;

        assert!(delivered);
        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Outgoing email logged; no mail transport configured"));
        assert!(output.contains("a@example.com"));
        assert!(output.contains("no-reply@localhost"));
        assert!(!output.contains("secret-body"));
    }

    #[tokio::test]
    async fn test_memory_sender_records_messages() {
        let sender = MemoryEmailSender::new();
        assert!(sender.send(&["a@example.com".to_string()], "Hello", "<p>hi</p>").await);

        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipients, vec!["a@example.com".to_string()]);
        assert_eq!(sent[0].subject, "Hello");
    }

    #[tokio::test]
    async fn test_failing_sender() {
        let sender = MemoryEmailSender::failing();
        assert!(!sender.send(&["a@example.com".to_string()], "Hello", "<p>hi</p>").await);
        assert!(sender.sent().is_empty());
    }
}
