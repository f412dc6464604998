//! # ビジネスイベントログの構造化ヘルパー
//!
//! `jq` で効率的に調査できるよう、ログフィールドの命名規約とヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.category`、`error.kind`）を使用。tracing の
//! `$($field:ident).+` パターンでサポートされ、JSON 出力でフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。呼び出し側のクレートは `tracing` に依存すること。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
///
/// ## 推奨フィールド
///
/// - `event.entity_type`: エンティティ種別（[`event::entity_type`] の定数を使用）
/// - `event.entity_id`: エンティティ ID
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const NOTIFICATION: &str = "notification";
        pub const VERIFICATION: &str = "verification";
    }

    /// イベントアクション
    pub mod action {
        // 通知
        pub const NOTIFICATION_SENT: &str = "notification.sent";
        pub const NOTIFICATION_FAILED: &str = "notification.failed";
        pub const TRANSPORT_READY: &str = "notification.transport_ready";
        pub const TRANSPORT_UNAVAILABLE: &str = "notification.transport_unavailable";

        // メールアドレス検証
        pub const VERIFICATION_SUCCEEDED: &str = "verification.succeeded";
        pub const VERIFICATION_FAILED: &str = "verification.failed";
    }

    /// エンティティ種別
    pub mod entity_type {
        pub const EVENT: &str = "event";
        pub const EMAIL: &str = "email";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// インフラストラクチャ（SMTP トランスポート）
        pub const INFRASTRUCTURE: &str = "infrastructure";
        /// 外部サービス呼び出し（検証 API）
        pub const EXTERNAL_SERVICE: &str = "external_service";
    }

    /// エラー種別
    pub mod kind {
        pub const TEMPLATE: &str = "template";
        pub const SMTP: &str = "smtp";
        pub const EVENT_BUS: &str = "event_bus";
        pub const SERVICE_COMMUNICATION: &str = "service_communication";
    }
}
