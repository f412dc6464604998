//! テスト用のイベントビルダー
//!
//! `test-support` feature で他クレートのテストからも利用できる。

use crate::event::{
    Comment,
    CommentAuthor,
    Creator,
    Event,
    EventId,
    Invitee,
    Participant,
    VerificationCode,
};

/// [`Event`] を組み立てるビルダー
///
/// デフォルトは「通知許可・未検証・未締切・非サンプル」で招待先なし。
#[derive(Debug, Clone)]
pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self {
            event: Event {
                id:           EventId::new("E1"),
                title:        "Soirée BDE".to_string(),
                creator:      Creator {
                    name:                "Alice".to_string(),
                    email:               "alice@example.com".to_string(),
                    allow_notifications: true,
                    is_verified:         false,
                    verification_code:   Some(VerificationCode::new("C1")),
                },
                is_closed:    false,
                is_example:   false,
                emails:       Vec::new(),
                participants: Vec::new(),
                comments:     Vec::new(),
                private:      None,
            },
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.event.id = EventId::new(id);
        self
    }

    pub fn creator_email(mut self, email: &str) -> Self {
        self.event.creator.email = email.to_string();
        self
    }

    pub fn allow_notifications(mut self, value: bool) -> Self {
        self.event.creator.allow_notifications = value;
        self
    }

    pub fn verified(mut self, value: bool) -> Self {
        self.event.creator.is_verified = value;
        self
    }

    pub fn verification_code(mut self, code: &str) -> Self {
        self.event.creator.verification_code = Some(VerificationCode::new(code));
        self
    }

    /// 検証コードを持たない主催者にする
    pub fn without_verification_code(mut self) -> Self {
        self.event.creator.verification_code = None;
        self
    }

    pub fn closed(mut self, value: bool) -> Self {
        self.event.is_closed = value;
        self
    }

    pub fn example(mut self, value: bool) -> Self {
        self.event.is_example = value;
        self
    }

    pub fn invite(mut self, email: &str) -> Self {
        self.event.emails.push(Invitee {
            email: email.to_string(),
        });
        self
    }

    pub fn build(self) -> Event {
        self.event
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn participant(name: &str) -> Participant {
    Participant {
        name: name.to_string(),
    }
}

pub fn comment(author: &str, content: &str) -> Comment {
    Comment {
        author:  CommentAuthor {
            name: author.to_string(),
        },
        content: content.to_string(),
    }
}
