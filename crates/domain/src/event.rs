//! # 日程調整イベント
//!
//! 通知の入力となるイベント・主催者・参加者・コメントを定義する。
//! これらは永続化層が所有しており、通知機能からは読み取り専用で扱う。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 |
//! |---|------------|
//! | [`Event`] | 日程調整イベント（投票ページ） |
//! | [`Creator`] | イベント主催者 |
//! | [`Invitee`] | 招待メールの宛先 |
//! | [`Participant`] | 投票した参加者 |
//! | [`Comment`] | イベントページへのコメント |
//!
//! ワイヤ形式はホストアプリケーションと互換の camelCase JSON。

use serde::{Deserialize, Serialize};

define_string_id! {
    /// イベント ID
    ///
    /// ホストアプリケーションが採番する不透明な文字列（MongoDB の ObjectId など）。
    pub struct EventId;
}

define_string_id! {
    /// メールアドレス検証コード
    ///
    /// 検証リンクに埋め込まれる秘密値。ログに出力しないよう Debug をマスクする。
    pub struct VerificationCode { secret: true }
}

/// 日程調整イベント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(alias = "_id")]
    pub id:           EventId,
    pub title:        String,
    pub creator:      Creator,
    #[serde(default)]
    pub is_closed:    bool,
    #[serde(default)]
    pub is_example:   bool,
    /// 招待先（登録順）
    #[serde(default)]
    pub emails:       Vec<Invitee>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub comments:     Vec<Comment>,
    /// ホストアプリケーションが公開 API から隠しているフィールド
    #[serde(rename = "__private", default, skip_serializing_if = "Option::is_none")]
    pub private:      Option<EventPrivate>,
}

/// 公開 API から隠されたイベントの内部情報
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPrivate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_code: Option<VerificationCode>,
}

/// イベント主催者
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub name:                String,
    pub email:               String,
    /// メール通知を受け取るか
    #[serde(default)]
    pub allow_notifications: bool,
    /// メールアドレスが検証済みか
    #[serde(default)]
    pub is_verified:         bool,
    /// 主催者に直接載っている検証コード。ない場合は `__private` 側を参照する
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_code:   Option<VerificationCode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitee {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author:  CommentAuthor,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub name: String,
}

impl Event {
    /// 主催者へのアドレス確認メールを送ってよいか
    ///
    /// イベント作成時の確認メールと、主催者メールアドレス変更時の再検証メールに適用する。
    /// 未検証の主催者にも送るため、検証済みかどうかは問わない。
    pub fn allows_creator_confirmation(&self) -> bool {
        self.creator.allow_notifications && !self.is_closed && !self.is_example
    }

    /// 主催者へ更新通知（新しい参加者・コメント）を送ってよいか
    ///
    /// 検証済みアドレスにのみ送る。締め切り後の投票・コメントも通知対象。
    pub fn allows_creator_updates(&self) -> bool {
        self.creator.allow_notifications && self.creator.is_verified && !self.is_example
    }

    /// 主催者のメールアドレス検証コード
    ///
    /// `creator.verificationCode`、`__private.verificationCode` の順に探す。
    pub fn verification_code(&self) -> Option<&VerificationCode> {
        self.creator.verification_code.as_ref().or_else(|| {
            self.private
                .as_ref()
                .and_then(|private| private.verification_code.as_ref())
        })
    }

    /// 招待メールを送ってよいか
    ///
    /// 主催者の通知設定には依存しない。サンプルイベントでは一切メールを送らない。
    pub fn allows_invites(&self) -> bool {
        !self.is_example
    }
}
