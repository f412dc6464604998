//! ドメインイベント受け口から通知送信までの統合テスト
//!
//! ルーター → イベントバス → ディスパッチャー → 送信（モック）の経路を通して、
//! 送信可否の判定と送信内容を検証する。
//!
//! ## テストケース
//!
//! - ヘルスチェックがバージョンを返す
//! - 作成イベントで招待先と主催者にメールが届く
//! - 未検証の主催者には参加者追加の通知が届かない
//! - 検証コードの置き場所によらず参加者追加の通知が届く
//! - 不正なボディは 400 になる
//! - ディスパッチャーが停止していると 503 になる

use std::sync::Arc;

use agenda_infra::mock::MockNotificationSender;
use agenda_notifier::{
    absolute_url::AbsoluteUrl,
    app_builder::build_router,
    communicator::Communicator,
    usecase::notification::{
        NotificationComposer,
        NotificationDispatcher,
        NotificationService,
        TemplateRenderer,
    },
};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use pretty_assertions::assert_eq;
use serde_json::{Value as JsonValue, json};
use tokio::task::JoinHandle;
use tower::ServiceExt;

// --- テストヘルパー ---

struct TestApp {
    router:     Router,
    sender:     MockNotificationSender,
    dispatcher: Arc<NotificationDispatcher>,
    task:       JoinHandle<()>,
}

impl TestApp {
    fn new() -> Self {
        let sender = MockNotificationSender::new();
        let service = NotificationService::new(
            Arc::new(sender.clone()),
            TemplateRenderer::new().unwrap(),
        );
        let dispatcher = Arc::new(NotificationDispatcher::new(
            Arc::new(service),
            NotificationComposer::new(AbsoluteUrl::parse("https://agenda.example.com").unwrap()),
        ));
        let communicator = Communicator::new(16);
        let task = tokio::spawn(Arc::clone(&dispatcher).run(communicator.subscribe()));

        Self {
            router: build_router(communicator),
            sender,
            dispatcher,
            task,
        }
    }

    /// ルーターを破棄してバスを閉じ、送信タスクの完了まで待つ
    async fn finish(self) -> MockNotificationSender {
        drop(self.router);
        self.task.await.unwrap();
        self.dispatcher.wait_idle().await;
        self.sender
    }
}

fn event_json(allow_notifications: bool, is_verified: bool) -> JsonValue {
    json!({
        "_id": "E1",
        "title": "Soirée BDE",
        "creator": {
            "name": "Alice",
            "email": "alice@example.com",
            "allowNotifications": allow_notifications,
            "isVerified": is_verified,
            "verificationCode": "C1"
        },
        "isClosed": false,
        "isExample": false,
        "emails": [{ "email": "bob@example.com" }]
    })
}

fn post_event(body: String) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/internal/events")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn parse_body(response: axum::http::Response<Body>) -> JsonValue {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// --- テスト ---

#[tokio::test]
async fn test_ヘルスチェックがバージョンを返す() {
    let app = TestApp::new();

    let response = app
        .router
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_作成イベントで招待先と主催者にメールが届く() {
    let app = TestApp::new();
    let payload = json!({ "type": "event:create", "event": event_json(true, false) });

    let response = app
        .router
        .clone()
        .oneshot(post_event(payload.to_string()))
        .await
        .unwrap();
    let sender = app.finish().await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let mut sent = sender.sent_emails();
    sent.sort_by(|a, b| a.to.cmp(&b.to));
    assert_eq!(sent.len(), 2);

    assert_eq!(sent[0].to, "alice@example.com");
    assert_eq!(
        sent[0].subject,
        "AgendaBDE: Soirée BDE - Vérification de l'adresse e-mail"
    );
    assert!(
        sent[0]
            .html_body
            .contains("https://agenda.example.com/verify/E1/code/C1")
    );

    assert_eq!(sent[1].to, "bob@example.com");
    assert_eq!(sent[1].reply_to.as_deref(), Some("alice@example.com"));
    assert!(sent[1].text_body.contains("https://agenda.example.com/E1"));
}

#[tokio::test]
async fn test_未検証の主催者には参加者追加の通知が届かない() {
    let app = TestApp::new();
    let payload = json!({
        "type": "participant:add",
        "event": event_json(true, false),
        "participant": { "name": "Bob" }
    });

    let response = app
        .router
        .clone()
        .oneshot(post_event(payload.to_string()))
        .await
        .unwrap();
    let sender = app.finish().await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert!(sender.sent_emails().is_empty());
}

#[tokio::test]
async fn test_検証済みの主催者にコメントの通知が届く() {
    let app = TestApp::new();
    let payload = json!({
        "type": "comment:add",
        "event": event_json(true, true),
        "comment": { "author": { "name": "Carol" }, "content": "Super !" }
    });

    let response = app
        .router
        .clone()
        .oneshot(post_event(payload.to_string()))
        .await
        .unwrap();
    let sender = app.finish().await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let sent = sender.sent_emails();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "alice@example.com");
    assert_eq!(sent[0].subject, "AgendaBDE: Soirée BDE - Nouveau Commentaire");
}

#[tokio::test]
async fn test_検証コードが非公開フィールドにしかなくても参加者追加の通知が届く() {
    let app = TestApp::new();
    let payload = json!({
        "type": "participant:add",
        "event": {
            "_id": "E1",
            "title": "Soirée BDE",
            "creator": {
                "name": "Alice",
                "email": "alice@example.com",
                "allowNotifications": true,
                "isVerified": true
            },
            "__private": { "verificationCode": "C1" }
        },
        "participant": { "name": "Bob" }
    });

    let response = app
        .router
        .clone()
        .oneshot(post_event(payload.to_string()))
        .await
        .unwrap();
    let sender = app.finish().await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let sent = sender.sent_emails();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "AgendaBDE: Soirée BDE - Nouveau Participant");
}

#[tokio::test]
async fn test_不正なボディは400になる() {
    let app = TestApp::new();

    let response = app
        .router
        .clone()
        .oneshot(post_event(json!({ "type": "event:delete" }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_ディスパッチャーが停止していると503になる() {
    let app = TestApp::new();
    app.task.abort();
    let _ = app.task.await;

    let payload = json!({ "type": "event:create", "event": event_json(true, false) });
    let response = app
        .router
        .oneshot(post_event(payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
