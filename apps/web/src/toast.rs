//! # トースト通知
//!
//! 画面の隅に表示する一時的な通知。
//!
//! - 成功通知は `timeout` 経過後に自動で消える
//! - `timeout` のない通知（エラー通知）は、ユーザーが閉じるまで残る

use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use uuid::Uuid;

/// トーストの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

/// トースト通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title:   String,
    pub message: String,
    pub kind:    ToastKind,
    /// 自動で消えるまでの時間。`None` なら閉じられるまで表示し続ける
    pub timeout: Option<Duration>,
}

impl Toast {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title:   title.into(),
            message: message.into(),
            kind:    ToastKind::Success,
            timeout: None,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title:   title.into(),
            message: message.into(),
            kind:    ToastKind::Error,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// トーストの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(Uuid);

/// トーストを表示する
///
/// テスト時にスタブを使用できるようトレイトで定義。
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

struct ShownToast {
    id:       ToastId,
    toast:    Toast,
    shown_at: Instant,
}

/// 表示中のトーストを保持するストア
#[derive(Default)]
pub struct ToastStore {
    shown: Mutex<Vec<ShownToast>>,
}

impl ToastStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// トーストを現在時刻で表示する
    pub fn show(&self, toast: Toast) -> ToastId {
        self.show_at(toast, Instant::now())
    }

    /// トーストを `now` の時点で表示したものとして登録する
    pub fn show_at(&self, toast: Toast, now: Instant) -> ToastId {
        let id = ToastId(Uuid::new_v4());
        tracing::debug!(kind = %toast.kind, title = %toast.title, "トーストを表示");

        self.lock().push(ShownToast {
            id,
            toast,
            shown_at: now,
        });
        id
    }

    /// トーストを閉じる
    ///
    /// 既に閉じられていれば `false`。
    pub fn dismiss(&self, id: ToastId) -> bool {
        let mut shown = self.lock();
        let before = shown.len();
        shown.retain(|entry| entry.id != id);
        shown.len() != before
    }

    /// `now` の時点で表示されているトースト（表示順）
    ///
    /// `timeout` を過ぎたトーストはストアからも取り除く。
    pub fn active_at(&self, now: Instant) -> Vec<Toast> {
        let mut shown = self.lock();
        shown.retain(|entry| match entry.toast.timeout {
            Some(timeout) => now.saturating_duration_since(entry.shown_at) < timeout,
            None => true,
        });
        shown.iter().map(|entry| entry.toast.clone()).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ShownToast>> {
        self.shown.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for ToastStore {
    fn notify(&self, toast: Toast) {
        self.show(toast);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_timeoutを過ぎた成功通知は消える() {
        let store = ToastStore::new();
        let start = Instant::now();
        let toast = Toast::success("Saved", "ok").with_timeout(Duration::from_millis(5000));

        store.show_at(toast.clone(), start);

        assert_eq!(
            store.active_at(start + Duration::from_millis(4999)),
            vec![toast]
        );
        assert!(store.active_at(start + Duration::from_millis(5000)).is_empty());
    }

    #[test]
    fn test_timeoutのない通知は閉じるまで残る() {
        let store = ToastStore::new();
        let start = Instant::now();
        let toast = Toast::error("Failed", "ng");

        let id = store.show_at(toast.clone(), start);

        assert_eq!(
            store.active_at(start + Duration::from_secs(3600)),
            vec![toast]
        );
        assert!(store.dismiss(id));
        assert!(store.active_at(start).is_empty());
        assert!(!store.dismiss(id));
    }

    #[test]
    fn test_トーストの種類は小文字で表示される() {
        assert_eq!(ToastKind::Success.to_string(), "success");
        assert_eq!(ToastKind::Error.to_string(), "error");
    }
}
