//! UseCase: セッション接続処理
//!
//! WebSocket 接続ごとにセッション ID を払い出し、MessagePusher に登録する。
//! 同じユーザーが複数のタブ（接続）から参加することは許容する。

use std::sync::Arc;

use huddle_shared::time::Clock;

use crate::domain::{MessagePusher, PusherChannel, Session, SessionId, Timestamp, UserId, UserName};

/// セッション接続のユースケース
pub struct ConnectSessionUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectSessionUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            message_pusher,
            clock,
        }
    }

    /// セッション接続を実行
    ///
    /// # Arguments
    ///
    /// * `user_id` - 接続するユーザーの ID（Domain Model）
    /// * `user_name` - 表示名（Domain Model）
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// 新しく払い出したセッション
    pub async fn execute(
        &self,
        user_id: UserId,
        user_name: UserName,
        sender: PusherChannel,
    ) -> Session {
        let session = Session {
            id: SessionId::generate(),
            user_id,
            user_name,
            connected_at: Timestamp::new(self.clock.now_millis()),
        };

        self.message_pusher
            .register_client(session.id.clone(), sender)
            .await;

        tracing::debug!(
            "User '{}' connected with session {}",
            session.user_name,
            session.id
        );

        session
    }
}
