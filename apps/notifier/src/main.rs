//! # Notifier サーバー
//!
//! ドメインイベントを購読し、イベントの主催者・招待先へメール通知を送るサービス。
//!
//! ## 構成
//!
//! ```text
//! POST /internal/events ──→ Communicator（broadcast）──→ NotificationDispatcher
//!                                                            │ 送信依頼ごとに spawn
//!                                                            ↓
//!                                   NotificationService ──→ NotificationSender（SMTP / Noop）
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `NOTIFIER_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `NOTIFIER_PORT` | No | ポート番号（デフォルト: `3100`） |
//! | `NOTIFICATION_BACKEND` | No | `smtp` または `noop`（デフォルト: `noop`） |
//! | `SMTP_SERVICE` | No | 既知のメールサービス名。指定時は `SMTP_HOST` 等より優先 |
//! | `SMTP_HOST` / `SMTP_PORT` / `SMTP_SECURE` | No | SMTP サーバーの接続先 |
//! | `SMTP_USER` / `SMTP_PWD` | No | SMTP 認証情報 |
//! | `SMTP_FROM` | No | 差出人 |
//! | `ABSOLUTE_URL` | No | メール内リンクの基底 URL（デフォルト: `http://localhost:3000`） |
//! | `EVENT_BUS_CAPACITY` | No | イベントバスのバッファ長（デフォルト: `256`） |
//! | `LOG_FORMAT` | No | `json` または `pretty` |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p agenda-notifier
//! ```

use std::{net::SocketAddr, sync::Arc};

use agenda_infra::notification::{
    NoopNotificationSender,
    NotificationSender,
    SmtpNotificationSender,
};
use agenda_notifier::{
    app_builder::build_router,
    communicator::Communicator,
    config::{NotificationBackend, NotifierConfig},
    usecase::notification::{
        NotificationComposer,
        NotificationDispatcher,
        NotificationService,
        TemplateRenderer,
    },
};
use agenda_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Notifier サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("notifier"));
    let _tracing_guard = tracing::info_span!("app", service = "notifier").entered();

    let config = NotifierConfig::from_env()?;

    tracing::info!(
        "Notifier サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let sender: Arc<dyn NotificationSender> = match config.backend {
        NotificationBackend::Smtp => Arc::new(SmtpNotificationSender::new(&config.smtp)?),
        NotificationBackend::Noop => Arc::new(NoopNotificationSender),
    };
    tracing::info!(backend = %config.backend, "通知バックエンドを初期化しました");

    let service = Arc::new(NotificationService::new(sender, TemplateRenderer::new()?));

    // 疎通確認の結果はログに出すだけで、起動を妨げない
    tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.check_connection().await; }
    });

    let communicator = Communicator::new(config.bus_capacity);
    let dispatcher = Arc::new(NotificationDispatcher::new(
        service,
        NotificationComposer::new(config.absolute_url.clone()),
    ));
    let dispatcher_task = tokio::spawn(Arc::clone(&dispatcher).run(communicator.subscribe()));

    let app = build_router(communicator);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Notifier サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // ルーターが破棄されてバスの送信側がなくなると、ディスパッチャーのループが終わる
    dispatcher_task.await?;
    dispatcher.wait_idle().await;
    tracing::info!("送信中の通知をすべて処理し、停止しました");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("シグナルの待ち受けに失敗: {}", e);
    }
}
