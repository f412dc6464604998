//! # 通知サービス
//!
//! テンプレートレンダリング → メール送信 → ログ出力を統合するサービス。
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: `send_email()` は送信失敗してもエラーを返さない。
//!   リトライやデッドレターは持たない
//! - **依存性注入**: `NotificationSender` は trait で抽象化し、プロセスで 1 つを共有する

use std::sync::Arc;

use agenda_domain::notification::EmailRequest;
use agenda_infra::notification::NotificationSender;
use agenda_shared::{
    event_log::{error, event},
    log_business_event,
};

use super::TemplateRenderer;

/// 通知サービス
pub struct NotificationService {
    sender: Arc<dyn NotificationSender>,
    template_renderer: TemplateRenderer,
}

impl NotificationService {
    pub fn new(sender: Arc<dyn NotificationSender>, template_renderer: TemplateRenderer) -> Self {
        Self {
            sender,
            template_renderer,
        }
    }

    /// メールを送信する（fire-and-forget）
    ///
    /// `email` テンプレートでレンダリングし、送信する。
    /// いずれのステップで失敗してもエラーを返さない（ログ出力のみ）。
    pub async fn send_email(&self, request: EmailRequest) {
        let email = match self.template_renderer.render(&request) {
            Ok(email) => email,
            Err(e) => {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::TEMPLATE,
                    error = %e,
                    subject = %request.subject,
                    "通知テンプレートのレンダリングに失敗"
                );
                return;
            }
        };

        match self.sender.send_email(&email).await {
            Ok(receipt) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.entity_type = event::entity_type::EMAIL,
                    event.result = event::result::SUCCESS,
                    notification.recipient = %email.to,
                    notification.subject = %email.subject,
                    notification.message_id = %receipt.message_id,
                    notification.response = %receipt.response,
                    "通知メール送信成功"
                );
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.entity_type = event::entity_type::EMAIL,
                    event.result = event::result::FAILURE,
                    notification.recipient = %email.to,
                    notification.subject = %email.subject,
                    error = %e,
                    "通知メール送信失敗"
                );
            }
        }
    }

    /// メールサーバーへの疎通を確認し、結果をログに出力する
    ///
    /// 起動時に 1 度だけ呼ばれる。失敗しても起動は継続する。
    pub async fn check_connection(&self) {
        match self.sender.verify_connection().await {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::TRANSPORT_READY,
                    event.result = event::result::SUCCESS,
                    "メールサーバーへの接続を確認しました"
                );
            }
            Err(e) => {
                tracing::warn!(
                    event.action = event::action::TRANSPORT_UNAVAILABLE,
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::SMTP,
                    error = %e,
                    "メールサーバーに接続できません。起動は継続します"
                );
            }
        }
    }
}
