//! # 通知ディスパッチャー
//!
//! イベントバスからドメインイベントを受け取り、送信依頼ごとに独立した送信タスクを起動する。
//!
//! ## 設計方針
//!
//! - **購読の明示**: [`DomainEventListener`] はドメインイベントごとに 1 メソッドを持つ
//! - **fire-and-forget**: 送信タスクの完了は待たない。送信間の順序保証・同時送信数の上限はない
//! - **停止時の待ち合わせ**: 起動中の送信タスクは `TaskTracker` で追跡し、
//!   [`NotificationDispatcher::wait_idle`] で完了を待てる

use std::sync::Arc;

use agenda_domain::{
    DomainEvent,
    event::{Comment, Event, Participant},
    notification::EmailRequest,
};
use agenda_shared::event_log::error;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::task::TaskTracker;

use super::{NotificationComposer, NotificationService};

/// ドメインイベントの購読者
pub trait DomainEventListener: Send + Sync {
    /// `event:create`
    fn on_event_created(&self, event: &Event);

    /// `event:update:creator.email`
    fn on_creator_email_changed(&self, event: &Event, previous: Option<&Event>);

    /// `participant:add`
    fn on_participant_added(&self, event: &Event, participant: &Participant);

    /// `comment:add`
    fn on_comment_added(&self, event: &Event, comment: &Comment);

    /// イベント種別に応じたメソッドへ振り分ける
    fn on_event(&self, domain_event: &DomainEvent) {
        match domain_event {
            DomainEvent::EventCreated { event } => self.on_event_created(event),
            DomainEvent::CreatorEmailChanged { event, previous } => {
                self.on_creator_email_changed(event, previous.as_ref());
            }
            DomainEvent::ParticipantAdded { event, participant } => {
                self.on_participant_added(event, participant);
            }
            DomainEvent::CommentAdded { event, comment } => self.on_comment_added(event, comment),
        }
    }
}

/// 通知ディスパッチャー
pub struct NotificationDispatcher {
    service:  Arc<NotificationService>,
    composer: NotificationComposer,
    tasks:    TaskTracker,
}

impl NotificationDispatcher {
    pub fn new(service: Arc<NotificationService>, composer: NotificationComposer) -> Self {
        Self {
            service,
            composer,
            tasks: TaskTracker::new(),
        }
    }

    /// イベントバスを購読し、送信側がすべて閉じるまで処理を続ける
    pub async fn run(self: Arc<Self>, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(domain_event) => {
                    tracing::debug!(
                        kind = %domain_event.kind(),
                        event_id = %domain_event.event().id,
                        "ドメインイベントを受信"
                    );
                    self.on_event(&domain_event);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        error.kind = error::kind::EVENT_BUS,
                        skipped,
                        "イベントバスの処理が遅れ、ドメインイベントを取りこぼしました"
                    );
                }
                Err(RecvError::Closed) => {
                    tracing::info!("イベントバスが閉じられたため購読を終了します");
                    break;
                }
            }
        }
    }

    /// 起動済みの送信タスクがすべて終わるまで待つ
    ///
    /// 待機後も新しい送信タスクを受け付ける。
    pub async fn wait_idle(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
    }

    fn dispatch(&self, requests: Vec<EmailRequest>) {
        for request in requests {
            let service = Arc::clone(&self.service);
            self.tasks.spawn(async move {
                service.send_email(request).await;
            });
        }
    }
}

impl DomainEventListener for NotificationDispatcher {
    fn on_event_created(&self, event: &Event) {
        self.dispatch(self.composer.for_event_created(event));
    }

    fn on_creator_email_changed(&self, event: &Event, _previous: Option<&Event>) {
        self.dispatch(self.composer.for_creator_email_changed(event));
    }

    fn on_participant_added(&self, event: &Event, participant: &Participant) {
        self.dispatch(self.composer.for_participant_added(event, participant));
    }

    fn on_comment_added(&self, event: &Event, comment: &Comment) {
        self.dispatch(self.composer.for_comment_added(event, comment));
    }
}
