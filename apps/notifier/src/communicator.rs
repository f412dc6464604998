//! # イベントバス
//!
//! ドメインイベントをプロセス内の購読者へ配信する。
//! `tokio::sync::broadcast` をラップし、プロセス起動時に 1 度だけ構築する。

use agenda_domain::DomainEvent;
use thiserror::Error;
use tokio::sync::broadcast;

/// 配信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// 購読者がいない（通知ディスパッチャーが停止している）
    #[error("イベントの購読者がいません")]
    NoSubscribers,
}

/// イベントバス
///
/// クローンは同じチャネルを共有する。送信側がすべて破棄されると購読者のループは終了する。
#[derive(Debug, Clone)]
pub struct Communicator {
    sender: broadcast::Sender<DomainEvent>,
}

impl Communicator {
    /// バッファ長 `capacity` のバスを作成する
    ///
    /// 購読者がバッファ長を超えて遅れると、古いイベントから取りこぼす。
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// イベントを配信する
    ///
    /// 戻り値は配信先の購読者数。
    pub fn publish(&self, event: DomainEvent) -> Result<usize, PublishError> {
        self.sender
            .send(event)
            .map_err(|_| PublishError::NoSubscribers)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}
