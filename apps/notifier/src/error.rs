//! # Notifier エラー定義
//!
//! 通知サービスの HTTP 受け口で発生するエラーと、HTTP レスポンスへの変換を定義する。

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::communicator::PublishError;

/// エラーレスポンス（RFC 7807 Problem Details）
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

/// 通知サービスで発生するエラー
#[derive(Debug, Error)]
pub enum NotifierError {
    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// イベントバスに配信できない
    #[error("イベントを配信できません: {0}")]
    Unavailable(#[from] PublishError),
}

impl From<JsonRejection> for NotifierError {
    fn from(rejection: JsonRejection) -> Self {
        NotifierError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for NotifierError {
    fn into_response(self) -> Response {
        let (status, error_type, title, detail) = match &self {
            NotifierError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "https://agendabde.example.com/errors/bad-request",
                "Bad Request",
                msg.clone(),
            ),
            NotifierError::Unavailable(e) => {
                tracing::error!("イベントバスへの配信に失敗: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "https://agendabde.example.com/errors/service-unavailable",
                    "Service Unavailable",
                    "通知ディスパッチャーが停止しています".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                error_type: error_type.to_string(),
                title: title.to_string(),
                status: status.as_u16(),
                detail,
            }),
        )
            .into_response()
    }
}
