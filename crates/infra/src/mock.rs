//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリのメール送信モック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! agenda-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use agenda_domain::notification::{EmailMessage, NotificationError, SendReceipt};
use async_trait::async_trait;

use crate::notification::NotificationSender;

// ===== MockNotificationSender =====

/// 送信したメールを記録するモック
///
/// [`MockNotificationSender::failing`] で作成すると、送信と疎通確認が常に失敗する。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    fail: Arc<AtomicBool>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let sender = Self::default();
        sender.fail.store(true, Ordering::SeqCst);
        sender
    }

    /// 送信に成功したメールの一覧
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<SendReceipt, NotificationError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed(
                "mock transport failure".to_string(),
            ));
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(email.clone());
        Ok(SendReceipt {
            message_id: format!("<mock-{}@agenda.test>", sent.len()),
            response:   "250 OK".to_string(),
        })
    }

    async fn verify_connection(&self) -> Result<(), NotificationError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotificationError::ConnectionFailed(
                "mock transport unreachable".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_email() -> EmailMessage {
        EmailMessage {
            to:        "bob@example.com".to_string(),
            reply_to:  None,
            subject:   "AgendaBDE: Soirée BDE".to_string(),
            html_body: String::new(),
            text_body: String::new(),
        }
    }

    #[tokio::test]
    async fn 送信したメールが記録される() {
        let sender = MockNotificationSender::new();

        let receipt = sender.send_email(&make_email()).await.unwrap();

        assert_eq!(receipt.message_id, "<mock-1@agenda.test>");
        assert_eq!(sender.sent_emails().len(), 1);
    }

    #[tokio::test]
    async fn failingは送信も疎通確認も失敗し記録しない() {
        let sender = MockNotificationSender::failing();

        assert!(sender.send_email(&make_email()).await.is_err());
        assert!(sender.verify_connection().await.is_err());
        assert!(sender.sent_emails().is_empty());
    }
}
