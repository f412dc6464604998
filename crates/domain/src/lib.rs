//! # AgendaBDE ドメイン層
//!
//! 日程調整イベントと、そこから派生する通知のドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! apps → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（SMTP、HTTP）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`event`] - 日程調整イベントと参加者・コメント、通知可否の判定
//! - [`domain_event`] - 通知のトリガーとなるドメインイベント
//! - [`notification`] - メール通知の値オブジェクトとエラー
//!
//! ## 使用例
//!
//! ```rust
//! use agenda_domain::event::EventId;
//!
//! let id = EventId::new("5f1e2d3c4b5a");
//! assert_eq!(id.as_str(), "5f1e2d3c4b5a");
//! ```

#[macro_use]
mod macros;

pub mod domain_event;
pub mod event;
pub mod notification;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain_event::{DomainEvent, DomainEventKind};
pub use notification::NotificationError;
