//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **2 つの実装**: SMTP（lettre）、Noop（開発・テスト用）
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択
//! - **単一インスタンス**: 送信実装はプロセス起動時に 1 度だけ構築し、
//!   `Arc<dyn NotificationSender>` として全送信で共有する。接続プールは lettre が管理する

mod noop;
mod smtp;

use agenda_domain::notification::{EmailMessage, NotificationError, SendReceipt};
use async_trait::async_trait;
pub use noop::NoopNotificationSender;
pub use smtp::{SmtpNotificationSender, SmtpSettings, SmtpTarget, WellKnownService};

/// メール送信トレイト
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<SendReceipt, NotificationError>;

    /// メールサーバーへの疎通を確認する
    async fn verify_connection(&self) -> Result<(), NotificationError>;
}
