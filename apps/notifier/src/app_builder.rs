//! # ルーター構築
//!
//! main とテストで同じルーターを使うため、構築処理をここにまとめる。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    communicator::Communicator,
    handler::{EventState, health_check, publish_event},
};

/// 通知サービスのルーターを構築する
pub fn build_router(communicator: Communicator) -> Router {
    let event_state = Arc::new(EventState { communicator });

    Router::new()
        .route("/health", get(health_check))
        .route("/internal/events", post(publish_event))
        .with_state(event_state)
        .layer(TraceLayer::new_for_http())
}
