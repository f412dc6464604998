//! # Web クライアントライブラリ
//!
//! ブラウザ側で動くビューコントローラーと、それが依存するナビゲーション・トースト通知・
//! API クライアントを定義する。
//!
//! ## モジュール構成
//!
//! - [`route`] - 画面のルートと履歴ナビゲーション
//! - [`toast`] - 画面上の一時的な通知
//! - [`client`] - イベント API クライアント
//! - [`controller`] - ルートごとのビューコントローラー

pub mod client;
pub mod controller;
pub mod route;
pub mod toast;
