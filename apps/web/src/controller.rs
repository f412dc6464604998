//! # ビューコントローラー
//!
//! ルートが有効になったときの画面の振る舞いを定義する。
//!
//! - [`verification`] - メールアドレス検証リンク

pub mod verification;

pub use verification::{VerificationController, VerificationParams};
