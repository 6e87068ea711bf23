//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - セッションごとの WebSocket 書き込みタスクへの `UnboundedSender` を管理
//! - セッションへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, PusherChannel, SessionId};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(session_id.clone(), tx).await;
/// pusher.push_to(&session_id, "{\"type\":\"message-sent\",...}").await?;
/// ```
pub struct WebSocketMessagePusher {
    /// Key: session_id, Value: 書き込みタスクへのチャンネル
    clients: Mutex<HashMap<String, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Number of registered sessions
    pub async fn count_clients(&self) -> usize {
        self.clients.lock().await.len()
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, session_id: SessionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Session '{}' registered to MessagePusher", session_id);
        clients.insert(session_id.into_string(), sender);
    }

    async fn unregister_client(&self, session_id: &SessionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(session_id.as_str());
        tracing::debug!("Session '{}' unregistered from MessagePusher", session_id);
    }

    async fn push_to(&self, session_id: &SessionId, content: &str) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        let sender = clients
            .get(session_id.as_str())
            .ok_or_else(|| MessagePushError::ClientNotFound(session_id.as_str().to_string()))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to session '{}'", session_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<SessionId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        for target in targets {
            match clients.get(target.as_str()) {
                Some(sender) => {
                    // ブロードキャストでは一部の送信失敗を許容
                    if let Err(e) = sender.send(content.to_string()) {
                        tracing::warn!("Failed to push message to session '{}': {}", target, e);
                    }
                }
                None => {
                    tracing::warn!("Session '{}' not found during broadcast, skipping", target);
                }
            }
        }

        Ok(())
    }
}
