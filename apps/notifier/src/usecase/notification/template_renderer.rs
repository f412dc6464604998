//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **単一テンプレート**: すべての通知は `email` テンプレートを共有し、
//!   `title`・`message`・`buttonText`・`buttonURL` だけが変わる
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **plaintext 版**: 本文の `<br />` を改行に置き換えて `messageText` として渡す

use agenda_domain::notification::{EmailMessage, EmailRequest, NotificationError};
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "email";

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、`EmailRequest` から `EmailMessage` を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "email.html",
                    include_str!("../../../templates/notifications/email.html"),
                ),
                (
                    "email.txt",
                    include_str!("../../../templates/notifications/email.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 送信依頼からメールメッセージを生成する
    pub fn render(&self, request: &EmailRequest) -> Result<EmailMessage, NotificationError> {
        let context = build_context(request);

        let html_body = self
            .engine
            .render(&format!("{TEMPLATE_NAME}.html"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render(&format!("{TEMPLATE_NAME}.txt"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(EmailMessage {
            to: request.to.clone(),
            reply_to: request.reply_to.clone(),
            subject: request.subject.clone(),
            html_body,
            text_body,
        })
    }
}

fn build_context(request: &EmailRequest) -> Context {
    let mut context = Context::new();
    context.insert("title", &request.title);
    context.insert("message", &request.message);
    context.insert("messageText", &to_plain_text(&request.message));
    context.insert("buttonText", &request.button_text);
    context.insert("buttonURL", &request.button_url);
    context
}

fn to_plain_text(message: &str) -> String {
    message
        .replace("<br />", "\n")
        .replace("<br/>", "\n")
        .replace("<br>", "\n")
}
