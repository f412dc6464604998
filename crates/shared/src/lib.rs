//! # AgendaBDE 共有ユーティリティ
//!
//! 通知サービス・Web クライアントの双方から使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, apps）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える

pub mod event_log;
pub mod health;
pub mod observability;

pub use health::HealthResponse;
