//! メールアドレス検証コントローラーの統合テスト
//!
//! ## テストケース
//!
//! - 検証に成功すると 5000ms で消える成功トーストが出て、イベント画面へ置き換え遷移する
//! - 検証に失敗するとエラートーストが出て、遷移は同じように行われる
//! - 遷移は検証結果を待たない
//! - 検証失敗は外部サービスのエラーとしてログに残る

use std::{
    io,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use agenda_domain::event::{EventId, VerificationCode};
use agenda_web::{
    client::{EventApiClient, EventApiError},
    controller::{VerificationController, VerificationParams},
    route::{HistoryNavigator, Route},
    toast::{Toast, ToastKind, ToastStore},
};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use tokio::sync::Notify;

// --- テストヘルパー ---

/// 応答を差し替えられるイベント API スタブ
struct StubEventApi {
    result:  Result<(), EventApiError>,
    /// 設定されていれば、通知されるまで応答を保留する
    release: Option<Arc<Notify>>,
}

#[async_trait]
impl EventApiClient for StubEventApi {
    async fn verify(&self, id: &EventId, code: &VerificationCode) -> Result<(), EventApiError> {
        assert_eq!(id.as_str(), "E1");
        assert_eq!(code.as_str(), "C1");
        if let Some(release) = &self.release {
            release.notified().await;
        }
        self.result.clone()
    }
}

struct Setup {
    sut:       VerificationController,
    toasts:    Arc<ToastStore>,
    navigator: Arc<HistoryNavigator>,
}

fn verification_route() -> Route {
    Route::Verification {
        id:   EventId::new("E1"),
        code: VerificationCode::new("C1"),
    }
}

fn setup(api: StubEventApi) -> Setup {
    let toasts = Arc::new(ToastStore::new());
    let navigator = Arc::new(HistoryNavigator::new(verification_route()));
    let sut = VerificationController::new(Arc::new(api), toasts.clone(), navigator.clone());
    Setup {
        sut,
        toasts,
        navigator,
    }
}

fn params() -> VerificationParams {
    VerificationParams::from_route(&verification_route()).unwrap()
}

fn event_e1() -> Route {
    Route::Event {
        id: EventId::new("E1"),
    }
}

// --- テスト ---

#[tokio::test]
async fn test_検証に成功すると成功トーストを出してイベント画面へ置き換え遷移する() {
    // Arrange
    let setup = setup(StubEventApi {
        result:  Ok(()),
        release: None,
    });

    // Act
    setup.sut.activate(params()).await.unwrap();

    // Assert
    let toasts = setup.toasts.active_at(Instant::now());
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Email Verified");
    assert_eq!(
        toasts[0].message,
        "Votre mail a été vérifié. Vous pourrez désormais recevoir des notifications par e-mail \
         pour cet événement"
    );
    assert_eq!(toasts[0].kind, ToastKind::Success);
    assert_eq!(toasts[0].timeout, Some(Duration::from_millis(5000)));

    assert_eq!(setup.navigator.entries(), vec![event_e1()]);
}

#[tokio::test]
async fn test_検証に失敗するとエラートーストを出して同じく遷移する() {
    let setup = setup(StubEventApi {
        result:  Err(EventApiError::NotFound),
        release: None,
    });

    setup.sut.activate(params()).await.unwrap();

    let toasts = setup.toasts.active_at(Instant::now() + Duration::from_secs(3600));
    assert_eq!(
        toasts,
        vec![Toast {
            title:   "Verification Failed".to_string(),
            message: "Your verification code has expired.".to_string(),
            kind:    ToastKind::Error,
            timeout: None,
        }]
    );
    assert_eq!(setup.navigator.current(), Some(event_e1()));
    assert_eq!(setup.navigator.back(), None);
}

#[tokio::test]
async fn test_遷移は検証結果を待たない() {
    let release = Arc::new(Notify::new());
    let setup = setup(StubEventApi {
        result:  Ok(()),
        release: Some(release.clone()),
    });

    let verification = setup.sut.activate(params());

    // 検証 API が応答する前に遷移が済んでいる
    assert_eq!(setup.navigator.current(), Some(event_e1()));
    assert!(setup.toasts.active_at(Instant::now()).is_empty());

    release.notify_one();
    verification.await.unwrap();

    assert_eq!(setup.toasts.active_at(Instant::now()).len(), 1);
}

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_検証失敗は外部サービスのエラーとしてログに残る() {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);
    let setup = setup(StubEventApi {
        result:  Err(EventApiError::ServiceUnavailable),
        release: None,
    });

    setup.sut.activate(params()).await.unwrap();

    let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
    let failed = output
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
        .find(|line| line["event.action"] == "verification.failed")
        .unwrap();
    assert_eq!(failed["event.result"], "failure");
    assert_eq!(failed["error.category"], "external_service");
    assert_eq!(failed["error.kind"], "service_communication");
    assert_eq!(failed["event.entity_id"], "E1");
}

#[test]
fn test_検証リンク以外のルートからはパラメータを取り出せない() {
    assert_eq!(VerificationParams::from_route(&event_e1()), None);
}
