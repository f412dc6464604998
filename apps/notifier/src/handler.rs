//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置し、ここで re-export する
//! - ハンドラはイベントバスへの受け渡しだけを行い、通知の判定はディスパッチャーに任せる

pub mod event;
pub mod health;

pub use event::{EventState, publish_event};
pub use health::health_check;
