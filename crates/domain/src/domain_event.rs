//! # ドメインイベント
//!
//! ホストアプリケーションで発生し、通知機能が購読する出来事を定義する。
//!
//! ## 設計方針
//!
//! - **enum による購読**: 文字列キーによる暗黙の配線を避け、4 種類のバリアントで表現する
//! - **ワイヤ互換**: `type` タグにはホストアプリケーションのイベント名
//!   （`event:create` など）をそのまま使う
//!
//! | バリアント | イベント名 | ペイロード |
//! |---|---|---|
//! | [`DomainEvent::EventCreated`] | `event:create` | イベント |
//! | [`DomainEvent::CreatorEmailChanged`] | `event:update:creator.email` | 変更後イベント、変更前イベント（任意） |
//! | [`DomainEvent::ParticipantAdded`] | `participant:add` | イベント、参加者 |
//! | [`DomainEvent::CommentAdded`] | `comment:add` | イベント、コメント |

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::event::{Comment, Event, Participant};

/// ドメインイベント種別
///
/// ログ出力とイベント名のパースに使う。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
pub enum DomainEventKind {
    #[strum(serialize = "event:create")]
    EventCreated,
    #[strum(serialize = "event:update:creator.email")]
    CreatorEmailChanged,
    #[strum(serialize = "participant:add")]
    ParticipantAdded,
    #[strum(serialize = "comment:add")]
    CommentAdded,
}

/// 通知のトリガーとなるドメインイベント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DomainEvent {
    /// イベントが作成された
    #[serde(rename = "event:create")]
    EventCreated { event: Event },

    /// 主催者のメールアドレスが変更された
    #[serde(rename = "event:update:creator.email")]
    CreatorEmailChanged {
        event:    Event,
        #[serde(default)]
        previous: Option<Event>,
    },

    /// 参加者が投票した
    #[serde(rename = "participant:add")]
    ParticipantAdded {
        event:       Event,
        participant: Participant,
    },

    /// コメントが投稿された
    #[serde(rename = "comment:add")]
    CommentAdded { event: Event, comment: Comment },
}

impl DomainEvent {
    /// イベント種別を返す
    pub fn kind(&self) -> DomainEventKind {
        match self {
            Self::EventCreated { .. } => DomainEventKind::EventCreated,
            Self::CreatorEmailChanged { .. } => DomainEventKind::CreatorEmailChanged,
            Self::ParticipantAdded { .. } => DomainEventKind::ParticipantAdded,
            Self::CommentAdded { .. } => DomainEventKind::CommentAdded,
        }
    }

    /// 対象のイベント（変更後の状態）を返す
    pub fn event(&self) -> &Event {
        match self {
            Self::EventCreated { event }
            | Self::CreatorEmailChanged { event, .. }
            | Self::ParticipantAdded { event, .. }
            | Self::CommentAdded { event, .. } => event,
        }
    }
}
