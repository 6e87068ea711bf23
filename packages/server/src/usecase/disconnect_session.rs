//! UseCase: セッション切断処理
//!
//! WebSocket が閉じたとき、そのセッションが参加している全ての Room から退室させ、
//! MessagePusher から登録を解除する。

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomRepository, Session};

use super::leave_meeting::Departure;

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    rooms: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectSessionUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            rooms,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 退室した Room ごとの結果（`user-left` の通知に使う）
    pub async fn execute(&self, session: &Session) -> Vec<Departure> {
        // 1. 送信チャンネルを先に解除（切断済みのセッションには送らない）
        self.message_pusher.unregister_client(&session.id).await;

        // 2. 参加中の Room から退室
        let mut departures = Vec::new();
        for meeting_id in self.rooms.rooms_of_session(&session.id).await {
            match self.rooms.remove_participant(&meeting_id, &session.id).await {
                Ok((participant, remaining)) => departures.push(Departure {
                    meeting_id,
                    participant,
                    remaining,
                }),
                Err(e) => {
                    tracing::warn!(
                        "Failed to remove session {} from meeting {}: {}",
                        session.id,
                        meeting_id,
                        e
                    );
                }
            }
        }

        tracing::debug!(
            "User '{}' disconnected (session {}, left {} rooms)",
            session.user_name,
            session.id,
            departures.len()
        );

        departures
    }
}
