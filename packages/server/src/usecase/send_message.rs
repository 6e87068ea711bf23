//! UseCase: チャットメッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージ送信処理（ブロードキャスト対象選定、メッセージ履歴への追加）
//!
//! ### なぜこのテストが必要か
//! - 送信者を含む Room 全員が `new-message` の送信先になる
//! - Room のチャット履歴に追加され、後から入室した参加者に再送される
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト対象
//! - 異常系：Room に参加していないセッションからの送信

use std::sync::Arc;

use huddle_shared::time::Clock;

use crate::domain::{
    ChatMessage, MeetingId, MessageContent, RoomRepository, Session, SessionId, Timestamp,
};

use super::error::ParticipationError;

/// 送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub message: ChatMessage,
    /// `new-message` の送信先（送信者を含む）
    pub recipients: Vec<SessionId>,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    rooms: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { rooms, clock }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `session` - 送信者のセッション
    /// * `meeting_id` - 送信先の Meeting（Domain Model）
    /// * `content` - メッセージ内容（Domain Model、空でないことは検証済み）
    ///
    /// # Returns
    ///
    /// * `Ok(PostedMessage)` - 保存したメッセージとブロードキャスト対象
    /// * `Err(ParticipationError)` - 送信者がその Room にいない
    pub async fn execute(
        &self,
        session: &Session,
        meeting_id: MeetingId,
        content: MessageContent,
    ) -> Result<PostedMessage, ParticipationError> {
        let not_in_meeting = || ParticipationError::NotInMeeting(meeting_id.as_str().to_string());

        // 1. 送信者が Room にいることを確認
        self.rooms
            .find_participant(&meeting_id, &session.id)
            .await
            .ok_or_else(not_in_meeting)?;

        // 2. Room のチャット履歴に追加
        let message = ChatMessage::new(
            session.user_id.clone(),
            session.user_name.clone(),
            content,
            Timestamp::new(self.clock.now_millis()),
        );
        self.rooms
            .add_message(&meeting_id, message.clone())
            .await
            .map_err(|_| not_in_meeting())?;

        // 3. ブロードキャスト対象を取得（送信者を含む Room の全員）
        let recipients = self
            .rooms
            .get_participants(&meeting_id)
            .await
            .into_iter()
            .map(|p| p.session_id)
            .collect();

        tracing::debug!(
            "Message from '{}' posted to meeting {}",
            session.user_name,
            meeting_id
        );

        Ok(PostedMessage {
            message,
            recipients,
        })
    }
}
