//! # AgendaBDE インフラ層
//!
//! 外部システム（SMTP サーバー）との通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **メール送信**: lettre による SMTP 送信、ログ出力のみの Noop 実装
//! - **接続確認**: 起動時のメールサーバー疎通確認
//!
//! ## 依存関係
//!
//! ```text
//! apps → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`notification`] - メール送信トレイトと実装
//! - `mock` - テスト用のモック実装（`test-utils` feature）

pub mod notification;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
