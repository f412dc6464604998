//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! 開発環境や通知無効化時に使用する。

use agenda_domain::notification::{EmailMessage, NotificationError, SendReceipt};
use async_trait::async_trait;

use super::NotificationSender;

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<SendReceipt, NotificationError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "Noop: メール送信をスキップ"
        );
        Ok(SendReceipt {
            message_id: format!("<{}@noop>", uuid::Uuid::new_v4()),
            response:   "noop".to_string(),
        })
    }

    async fn verify_connection(&self) -> Result<(), NotificationError> {
        Ok(())
    }
}
