//! # ドメインイベント受け口
//!
//! ホストアプリケーションがプロセス外からドメインイベントを届けるための内部 API。
//!
//! ## エンドポイント
//!
//! - `POST /internal/events` - ドメインイベントをイベントバスへ配信する
//!
//! ## リクエスト例
//!
//! ```json
//! {
//!   "type": "participant:add",
//!   "event": { "id": "E1", "title": "Soirée BDE", "creator": { ... } },
//!   "participant": { "name": "Bob" }
//! }
//! ```
//!
//! 配信に成功すると `202 Accepted` を返す。送信結果は待たない。

use std::sync::Arc;

use agenda_domain::DomainEvent;
use axum::{Json, extract::State, http::StatusCode};

use crate::{communicator::Communicator, error::NotifierError};

/// イベント受け口の共有状態
pub struct EventState {
    pub communicator: Communicator,
}

/// ドメインイベントを受け付ける
pub async fn publish_event(
    State(state): State<Arc<EventState>>,
    body: Result<Json<DomainEvent>, axum::extract::rejection::JsonRejection>,
) -> Result<StatusCode, NotifierError> {
    let Json(domain_event) = body?;

    tracing::debug!(
        kind = %domain_event.kind(),
        event_id = %domain_event.event().id,
        "ドメインイベントを受け付けました"
    );
    state.communicator.publish(domain_event)?;

    Ok(StatusCode::ACCEPTED)
}
