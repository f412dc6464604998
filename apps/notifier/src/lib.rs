//! # Notifier ライブラリ
//!
//! ドメインイベントを購読してメール通知を送る通知サービスの構成要素を公開する。
//! テスト用に内部モジュールへのアクセスを提供する。

pub mod absolute_url;
pub mod app_builder;
pub mod communicator;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
