//! # イベント API クライアント
//!
//! Web クライアントからイベント API への通信を担当する。
//!
//! ## エンドポイント
//!
//! - `GET /api/event/{id}/code/{code}` - 主催者メールアドレスの検証

use agenda_domain::event::{EventId, VerificationCode};
use async_trait::async_trait;
use thiserror::Error;

/// イベント API クライアントエラー
#[derive(Debug, Clone, Error)]
pub enum EventApiError {
    /// イベントが存在しない、または検証コードが一致しない（404）
    #[error("イベントまたは検証コードが見つかりません")]
    NotFound,

    /// リクエストエラー（400）
    #[error("リクエストエラー: {0}")]
    BadRequest(String),

    /// ネットワークエラー
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// API が利用不可（503、接続失敗、タイムアウト）
    #[error("イベント API が一時的に利用できません")]
    ServiceUnavailable,

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for EventApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            EventApiError::ServiceUnavailable
        } else {
            EventApiError::Network(err.to_string())
        }
    }
}

/// イベント API クライアントトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
#[async_trait]
pub trait EventApiClient: Send + Sync {
    /// 主催者のメールアドレスを検証する
    ///
    /// イベント API の `GET /api/event/{id}/code/{code}` を呼び出す。
    async fn verify(&self, id: &EventId, code: &VerificationCode) -> Result<(), EventApiError>;
}

/// イベント API クライアント実装
pub struct EventApiClientImpl {
    base_url: String,
    client:   reqwest::Client,
}

impl EventApiClientImpl {
    /// 新しい EventApiClient を作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: アプリケーションのベース URL（例: `http://localhost:3000`）
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client:   reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl EventApiClient for EventApiClientImpl {
    async fn verify(&self, id: &EventId, code: &VerificationCode) -> Result<(), EventApiError> {
        let url = format!(
            "{}/api/event/{}/code/{}",
            self.base_url,
            urlencoding::encode(id.as_str()),
            urlencoding::encode(code.as_str())
        );

        let response = self.client.get(&url).send().await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            reqwest::StatusCode::NOT_FOUND => Err(EventApiError::NotFound),
            reqwest::StatusCode::BAD_REQUEST => {
                let body = response.text().await.unwrap_or_default();
                Err(EventApiError::BadRequest(body))
            }
            reqwest::StatusCode::SERVICE_UNAVAILABLE => Err(EventApiError::ServiceUnavailable),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(EventApiError::Unexpected(format!(
                    "予期しないステータス {}: {}",
                    status, body
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, extract::Path, http::StatusCode, routing::get};
    use tokio::net::TcpListener;

    use super::*;

    /// コード `C1` だけを受け付けるイベント API を起動し、ベース URL を返す
    async fn spawn_event_api() -> String {
        async fn verify(Path((id, code)): Path<(String, String)>) -> StatusCode {
            match (id.as_str(), code.as_str()) {
                ("E1", "C1") => StatusCode::OK,
                ("E1", "bad request") => StatusCode::BAD_REQUEST,
                ("E1", "down") => StatusCode::SERVICE_UNAVAILABLE,
                ("E1", "teapot") => StatusCode::IM_A_TEAPOT,
                _ => StatusCode::NOT_FOUND,
            }
        }

        let app = Router::new().route("/api/event/{id}/code/{code}", get(verify));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}/")
    }

    async fn verify_with(code: &str) -> Result<(), EventApiError> {
        let client = EventApiClientImpl::new(&spawn_event_api().await);
        client
            .verify(&EventId::new("E1"), &VerificationCode::new(code))
            .await
    }

    #[tokio::test]
    async fn test_正しいコードで検証に成功する() {
        assert!(verify_with("C1").await.is_ok());
    }

    #[tokio::test]
    async fn test_一致しないコードはnot_foundになる() {
        assert!(matches!(
            verify_with("expired").await,
            Err(EventApiError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_コードはパスセグメントとしてエンコードされる() {
        assert!(matches!(
            verify_with("bad request").await,
            Err(EventApiError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_503はservice_unavailableになる() {
        assert!(matches!(
            verify_with("down").await,
            Err(EventApiError::ServiceUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_想定外のステータスはunexpectedになる() {
        assert!(matches!(
            verify_with("teapot").await,
            Err(EventApiError::Unexpected(_))
        ));
    }

    #[tokio::test]
    async fn test_接続できなければservice_unavailableになる() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = EventApiClientImpl::new(&format!("http://{addr}"));

        let result = client
            .verify(&EventId::new("E1"), &VerificationCode::new("C1"))
            .await;

        assert!(matches!(result, Err(EventApiError::ServiceUnavailable)));
    }
}
