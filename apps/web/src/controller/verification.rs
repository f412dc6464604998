//! # メールアドレス検証コントローラー
//!
//! 通知メールの検証リンク（`/verify/{id}/code/{code}`）を開いたときの振る舞い。
//!
//! 1. 検証 API の呼び出しをバックグラウンドで開始する
//! 2. 結果を待たずにイベント画面へ遷移する（履歴は置き換え）
//! 3. 検証結果が返ったらトーストで知らせる
//!
//! 遷移は検証結果を待たないため、トーストは遷移後の画面に表示される。

use std::{sync::Arc, time::Duration};

use agenda_domain::event::{EventId, VerificationCode};
use agenda_shared::{
    event_log::{error, event},
    log_business_event,
};
use tokio::task::JoinHandle;

use crate::{
    client::EventApiClient,
    route::{NavigationOptions, Navigator, Route},
    toast::{Notifier, Toast},
};

const VERIFIED_TIMEOUT: Duration = Duration::from_millis(5000);

/// 検証成功時のトースト
pub fn verified_toast() -> Toast {
    Toast::success(
        "Email Verified",
        "Votre mail a été vérifié. Vous pourrez désormais recevoir des notifications par e-mail \
         pour cet événement",
    )
    .with_timeout(VERIFIED_TIMEOUT)
}

/// 検証失敗時のトースト
pub fn verification_failed_toast() -> Toast {
    Toast::error("Verification Failed", "Your verification code has expired.")
}

/// 検証リンクのルートパラメータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationParams {
    pub id:   EventId,
    pub code: VerificationCode,
}

impl VerificationParams {
    /// 検証リンクのルートからパラメータを取り出す
    pub fn from_route(route: &Route) -> Option<Self> {
        match route {
            Route::Verification { id, code } => Some(Self {
                id:   id.clone(),
                code: code.clone(),
            }),
            Route::Event { .. } => None,
        }
    }
}

/// メールアドレス検証コントローラー
pub struct VerificationController {
    api:       Arc<dyn EventApiClient>,
    notifier:  Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl VerificationController {
    pub fn new(
        api: Arc<dyn EventApiClient>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            notifier,
            navigator,
        }
    }

    /// 検証リンクのルートが有効になったときに呼ぶ
    ///
    /// 検証 API の呼び出しを tokio タスクとして起動し、完了を待たずにイベント画面へ遷移する。
    /// 戻り値のハンドルは検証とトースト表示の完了を表す。待たずに破棄してもよい。
    pub fn activate(&self, params: VerificationParams) -> JoinHandle<()> {
        let VerificationParams { id, code } = params;

        let verification = tokio::spawn({
            let api = Arc::clone(&self.api);
            let notifier = Arc::clone(&self.notifier);
            let id = id.clone();
            async move {
                match api.verify(&id, &code).await {
                    Ok(()) => {
                        log_business_event!(
                            event.category = event::category::VERIFICATION,
                            event.action = event::action::VERIFICATION_SUCCEEDED,
                            event.entity_type = event::entity_type::EVENT,
                            event.entity_id = %id,
                            event.result = event::result::SUCCESS,
                            "メールアドレスの検証に成功"
                        );
                        notifier.notify(verified_toast());
                    }
                    Err(e) => {
                        log_business_event!(
                            event.category = event::category::VERIFICATION,
                            event.action = event::action::VERIFICATION_FAILED,
                            event.entity_type = event::entity_type::EVENT,
                            event.entity_id = %id,
                            event.result = event::result::FAILURE,
                            error.category = error::category::EXTERNAL_SERVICE,
                            error.kind = error::kind::SERVICE_COMMUNICATION,
                            error.message = %e,
                            "メールアドレスの検証に失敗"
                        );
                        notifier.notify(verification_failed_toast());
                    }
                }
            }
        });

        self.navigator
            .go(Route::Event { id }, NavigationOptions::replace());

        verification
    }
}
