//! # ルート
//!
//! 画面のルートと、その間を移動するナビゲーターを定義する。
//!
//! | ルート | パス |
//! |---|---|
//! | [`Route::Event`] | `/{id}` |
//! | [`Route::Verification`] | `/verify/{id}/code/{code}` |
//!
//! パスセグメントはパーセントエンコードする。通知メール内のリンクと同じ形式。

use std::sync::{Mutex, PoisonError};

use agenda_domain::event::{EventId, VerificationCode};

/// 画面のルート
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// イベント画面
    Event { id: EventId },
    /// メールアドレス検証リンク
    Verification { id: EventId, code: VerificationCode },
}

impl Route {
    /// ルートのパスを返す
    pub fn path(&self) -> String {
        match self {
            Route::Event { id } => format!("/{}", urlencoding::encode(id.as_str())),
            Route::Verification { id, code } => format!(
                "/verify/{}/code/{}",
                urlencoding::encode(id.as_str()),
                urlencoding::encode(code.as_str())
            ),
        }
    }

    /// パスからルートを解決する
    ///
    /// どのルートにも一致しなければ `None`。
    pub fn parse(path: &str) -> Option<Self> {
        let segments = path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| urlencoding::decode(segment).ok().map(|s| s.into_owned()))
            .collect::<Option<Vec<_>>>()?;

        match segments.as_slice() {
            [id] if !id.is_empty() => Some(Route::Event {
                id: EventId::new(id.as_str()),
            }),
            [verify, id, code_label, code]
                if verify == "verify" && code_label == "code" && !id.is_empty() && !code.is_empty() =>
            {
                Some(Route::Verification {
                    id:   EventId::new(id.as_str()),
                    code: VerificationCode::new(code.as_str()),
                })
            }
            _ => None,
        }
    }
}

/// 履歴エントリの扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryLocation {
    /// 新しいエントリを積む
    #[default]
    Push,
    /// 現在のエントリを置き換える（戻る操作で元の画面に戻らない）
    Replace,
}

/// ナビゲーションオプション
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationOptions {
    pub location: HistoryLocation,
}

impl NavigationOptions {
    pub fn replace() -> Self {
        Self {
            location: HistoryLocation::Replace,
        }
    }
}

/// 画面遷移を行うナビゲーター
///
/// テスト時にスタブを使用できるようトレイトで定義。
pub trait Navigator: Send + Sync {
    fn go(&self, route: Route, options: NavigationOptions);
}

/// 履歴をメモリ上に持つナビゲーター
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    entries: Mutex<Vec<Route>>,
}

impl HistoryNavigator {
    /// `initial` を表示中の状態で作成する
    pub fn new(initial: Route) -> Self {
        Self {
            entries: Mutex::new(vec![initial]),
        }
    }

    /// 表示中のルート
    pub fn current(&self) -> Option<Route> {
        self.lock().last().cloned()
    }

    /// 履歴（古い順）
    pub fn entries(&self) -> Vec<Route> {
        self.lock().clone()
    }

    /// 1 つ前の画面に戻り、戻った先のルートを返す
    ///
    /// 戻る先がなければ何もせず `None` を返す。
    pub fn back(&self) -> Option<Route> {
        let mut entries = self.lock();
        if entries.len() < 2 {
            return None;
        }
        entries.pop();
        entries.last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Route>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for HistoryNavigator {
    fn go(&self, route: Route, options: NavigationOptions) {
        tracing::debug!(path = %route.path(), location = ?options.location, "画面遷移");

        let mut entries = self.lock();
        if options.location == HistoryLocation::Replace {
            entries.pop();
        }
        entries.push(route);
    }
}
