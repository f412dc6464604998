//! # 通知
//!
//! メール通知に関する値オブジェクトとエラーを定義する。
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: 通知送信の失敗はホストアプリケーションの操作に影響しない
//! - **テンプレート分離**: 通知内容（[`EmailRequest`]）とレンダリング結果
//!   （[`EmailMessage`]）を分離する。レンダリングは notifier の `TemplateRenderer` が担う
//! - **永続化しない**: いずれも通知ごとに作られ、送信後に破棄される

use thiserror::Error;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),

    /// トランスポートの構築・接続確認に失敗
    #[error("メールサーバーに接続できません: {0}")]
    ConnectionFailed(String),
}

/// 送信依頼
///
/// `email` テンプレートに流し込む内容。1 通知につき 1 宛先。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRequest {
    /// 送信先メールアドレス
    pub to:          String,
    /// 件名
    pub subject:     String,
    /// 本文見出し
    pub title:       String,
    /// ボタンのラベル
    pub button_text: String,
    /// ボタンのリンク先（絶対 URL）
    pub button_url:  String,
    /// 本文（`<br />` による改行を含む HTML 断片）
    pub message:     String,
    /// 返信先（招待メールでは主催者のアドレス）
    pub reply_to:    Option<String>,
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。`NotificationSender` に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to:        String,
    pub reply_to:  Option<String>,
    pub subject:   String,
    pub html_body: String,
    pub text_body: String,
}

/// 送信結果
///
/// トランスポートが受理したメッセージの ID とサーバー応答。ログ出力にのみ使う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    pub message_id: String,
    pub response:   String,
}
