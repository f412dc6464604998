//! # 通知ユースケース
//!
//! ドメインイベントに伴うメール通知の組み立て・レンダリング・送信を統合する。
//!
//! ## モジュール構成
//!
//! - [`composer`] - ドメインイベントと主催者の通知設定から送信依頼を組み立てる
//! - [`template_renderer`] - tera テンプレートエンジンによるメール生成
//! - [`service`] - テンプレートレンダリング + 送信 + ログ記録の統合サービス
//! - [`dispatcher`] - イベントバスを購読し、送信依頼ごとに非同期送信を起動する

pub mod composer;
pub mod dispatcher;
pub mod service;
pub mod template_renderer;

pub use composer::NotificationComposer;
pub use dispatcher::{DomainEventListener, NotificationDispatcher};
pub use service::NotificationService;
pub use template_renderer::TemplateRenderer;
