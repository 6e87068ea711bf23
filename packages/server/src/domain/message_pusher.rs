//! MessagePusher trait 定義
//!
//! 接続中のクライアントへのメッセージ送信（通知）のインターフェース。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, value_object::SessionId};

/// Channel feeding one client's outbound WebSocket writer
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Pushes already-serialized messages to connected sessions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントを登録
    async fn register_client(&self, session_id: SessionId, sender: PusherChannel);

    /// クライアントの登録を解除
    async fn unregister_client(&self, session_id: &SessionId);

    /// 特定のクライアントにメッセージを送信
    async fn push_to(&self, session_id: &SessionId, content: &str) -> Result<(), MessagePushError>;

    /// 複数のクライアントにメッセージを送信
    ///
    /// 一部の送信失敗は許容される（ログのみ）。
    async fn broadcast(
        &self,
        targets: Vec<SessionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
