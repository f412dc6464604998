//! # ユースケース層
//!
//! - [`notification`] - ドメインイベントからメール通知を組み立てて送信する

pub mod notification;
