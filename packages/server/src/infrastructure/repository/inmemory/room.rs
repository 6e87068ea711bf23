//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! Meeting ID ごとの `Room` ドメインモデルを HashMap に保持します。
//! Room は最初の参加者が入室したときに作成されます。最後の参加者が退出しても
//! チャット履歴はプロセスが終了するまで保持されます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, MediaKind, MeetingId, Participant, RepositoryError, Room, RoomRepository,
    SessionId,
    entity::{DEFAULT_MESSAGE_CAPACITY, DEFAULT_PARTICIPANT_CAPACITY},
};

/// Capacities applied to every room created by the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSettings {
    pub participant_capacity: usize,
    pub message_capacity: usize,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            participant_capacity: DEFAULT_PARTICIPANT_CAPACITY,
            message_capacity: DEFAULT_MESSAGE_CAPACITY,
        }
    }
}

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<String, Room>>,
    settings: RoomSettings,
}

impl InMemoryRoomRepository {
    pub fn new(settings: RoomSettings) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            settings,
        }
    }

    /// Number of rooms that currently have participants
    pub async fn count_rooms(&self) -> usize {
        self.rooms
            .lock()
            .await
            .values()
            .filter(|room| !room.participants.is_empty())
            .count()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn add_participant(
        &self,
        meeting_id: &MeetingId,
        participant: Participant,
    ) -> Result<Vec<Participant>, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .entry(meeting_id.as_str().to_string())
            .or_insert_with(|| {
                tracing::debug!("Room {} created", meeting_id);
                Room::with_capacity(
                    meeting_id.clone(),
                    self.settings.participant_capacity,
                    self.settings.message_capacity,
                )
            });

        room.add_participant(participant)?;
        Ok(room.participants.clone())
    }

    async fn remove_participant(
        &self,
        meeting_id: &MeetingId,
        session_id: &SessionId,
    ) -> Result<(Participant, Vec<Participant>), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(meeting_id.as_str())
            .ok_or_else(|| RepositoryError::MeetingNotFound(meeting_id.as_str().to_string()))?;

        let removed = room
            .remove_participant(session_id)
            .ok_or_else(|| RepositoryError::ParticipantNotFound(session_id.as_str().to_string()))?;
        let remaining = room.participants.clone();

        // Emptied rooms keep their chat history for the next joiner
        if remaining.is_empty() {
            tracing::debug!("Room {} is empty", meeting_id);
        }

        Ok((removed, remaining))
    }

    async fn rooms_of_session(&self, session_id: &SessionId) -> Vec<MeetingId> {
        let rooms = self.rooms.lock().await;
        rooms
            .values()
            .filter(|room| room.find_participant(session_id).is_some())
            .map(|room| room.meeting_id.clone())
            .collect()
    }

    async fn get_participants(&self, meeting_id: &MeetingId) -> Vec<Participant> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(meeting_id.as_str())
            .map(|room| room.participants.clone())
            .unwrap_or_default()
    }

    async fn find_participant(
        &self,
        meeting_id: &MeetingId,
        session_id: &SessionId,
    ) -> Option<Participant> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(meeting_id.as_str())
            .and_then(|room| room.find_participant(session_id).cloned())
    }

    async fn set_media(
        &self,
        meeting_id: &MeetingId,
        session_id: &SessionId,
        kind: MediaKind,
        on: bool,
    ) -> Result<Participant, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(meeting_id.as_str())
            .ok_or_else(|| RepositoryError::MeetingNotFound(meeting_id.as_str().to_string()))?;

        room.set_media(session_id, kind, on)
            .cloned()
            .ok_or_else(|| RepositoryError::ParticipantNotFound(session_id.as_str().to_string()))
    }

    async fn add_message(
        &self,
        meeting_id: &MeetingId,
        message: ChatMessage,
    ) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(meeting_id.as_str())
            .ok_or_else(|| RepositoryError::MeetingNotFound(meeting_id.as_str().to_string()))?;
        room.add_message(message);
        Ok(())
    }

    async fn get_messages(&self, meeting_id: &MeetingId) -> Vec<ChatMessage> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(meeting_id.as_str())
            .map(|room| room.messages.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageContent, Timestamp, UserId, UserName};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoomRepository の Room 単位の参加者・メッセージ操作
    // - Room の自動作成と、最後の参加者退出後も履歴が残ること
    //
    // 【なぜこのテストが必要か】
    // - UseCase 層が返す参加者リスト（roster）はこの Repository が正となる
    // - Room 間でデータが混ざらないことを保証する必要がある
    // ========================================

    fn meeting(id: &str) -> MeetingId {
        MeetingId::new(id.to_string()).unwrap()
    }

    fn session(id: &str) -> SessionId {
        SessionId::new(id.to_string()).unwrap()
    }

    fn participant(session_id: &str, name: &str) -> Participant {
        Participant::new(
            session(session_id),
            UserId::new(format!("user-{}", name)).unwrap(),
            UserName::new(name.to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    fn message(content: &str) -> ChatMessage {
        ChatMessage::new(
            UserId::new("user-alice".to_string()).unwrap(),
            UserName::new("alice".to_string()).unwrap(),
            MessageContent::new(content.to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    #[tokio::test]
    async fn test_add_participant_creates_room() {
        // テスト項目: 最初の参加者追加で Room が作成され、参加者リストが返される
        // given (前提条件):
        let repo = InMemoryRoomRepository::new(RoomSettings::default());

        // when (操作):
        let roster = repo
            .add_participant(&meeting("1111111111"), participant("s1", "alice"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(roster.len(), 1);
        assert_eq!(repo.count_rooms().await, 1);
    }

    #[tokio::test]
    async fn test_rooms_are_isolated() {
        // テスト項目: 別の Meeting の参加者は混ざらない
        // given (前提条件):
        let repo = InMemoryRoomRepository::new(RoomSettings::default());
        repo.add_participant(&meeting("1111111111"), participant("s1", "alice"))
            .await
            .unwrap();

        // when (操作):
        repo.add_participant(&meeting("2222222222"), participant("s2", "bob"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(repo.get_participants(&meeting("1111111111")).await.len(), 1);
        assert_eq!(repo.get_participants(&meeting("2222222222")).await.len(), 1);
    }

    #[tokio::test]
    async fn test_capacity_from_settings() {
        // テスト項目: 設定した人数制限が Room に適用される
        // given (前提条件):
        let repo = InMemoryRoomRepository::new(RoomSettings {
            participant_capacity: 1,
            message_capacity: 10,
        });
        let id = meeting("1111111111");
        repo.add_participant(&id, participant("s1", "alice"))
            .await
            .unwrap();

        // when (操作):
        let result = repo.add_participant(&id, participant("s2", "bob")).await;

        // then (期待する結果):
        assert_eq!(result, Err(RepositoryError::RoomCapacityExceeded));
    }

    #[tokio::test]
    async fn test_remove_last_participant_keeps_history() {
        // テスト項目: 最後の参加者が退出しても Room のチャット履歴は残る
        // given (前提条件):
        let repo = InMemoryRoomRepository::new(RoomSettings::default());
        let id = meeting("1111111111");
        repo.add_participant(&id, participant("s1", "alice"))
            .await
            .unwrap();
        repo.add_message(&id, message("hello")).await.unwrap();

        // when (操作):
        let (removed, remaining) = repo.remove_participant(&id, &session("s1")).await.unwrap();

        // then (期待する結果):
        assert_eq!(removed.name.as_str(), "alice");
        assert!(remaining.is_empty());
        assert_eq!(repo.count_rooms().await, 0);
        let history = repo.get_messages(&id).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content.as_str(), "hello");
    }

    #[tokio::test]
    async fn test_rejoin_after_empty_keeps_history_limit() {
        // テスト項目: 空になった Room に再入室しても履歴の上限が維持される
        // given (前提条件):
        let repo = InMemoryRoomRepository::new(RoomSettings {
            participant_capacity: 10,
            message_capacity: 2,
        });
        let id = meeting("1111111111");
        repo.add_participant(&id, participant("s1", "alice"))
            .await
            .unwrap();
        repo.add_message(&id, message("one")).await.unwrap();
        repo.remove_participant(&id, &session("s1")).await.unwrap();

        // when (操作):
        repo.add_participant(&id, participant("s2", "bob"))
            .await
            .unwrap();
        repo.add_message(&id, message("two")).await.unwrap();
        repo.add_message(&id, message("three")).await.unwrap();

        // then (期待する結果):
        let history: Vec<String> = repo
            .get_messages(&id)
            .await
            .iter()
            .map(|m| m.content.as_str().to_string())
            .collect();
        assert_eq!(history, vec!["two".to_string(), "three".to_string()]);
        assert_eq!(repo.count_rooms().await, 1);
    }

    #[tokio::test]
    async fn test_remove_unknown_participant_is_error() {
        // テスト項目: 参加していないセッションの削除はエラー
        // given (前提条件):
        let repo = InMemoryRoomRepository::new(RoomSettings::default());
        let id = meeting("1111111111");
        repo.add_participant(&id, participant("s1", "alice"))
            .await
            .unwrap();

        // when (操作):
        let result = repo.remove_participant(&id, &session("s9")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::ParticipantNotFound("s9".to_string()))
        );
    }

    #[tokio::test]
    async fn test_rooms_of_session() {
        // テスト項目: セッションが参加中の Room だけが返される
        // given (前提条件):
        let repo = InMemoryRoomRepository::new(RoomSettings::default());
        repo.add_participant(&meeting("1111111111"), participant("s1", "alice"))
            .await
            .unwrap();
        repo.add_participant(&meeting("2222222222"), participant("s2", "bob"))
            .await
            .unwrap();

        // when (操作):
        let rooms = repo.rooms_of_session(&session("s1")).await;

        // then (期待する結果):
        assert_eq!(rooms, vec![meeting("1111111111")]);
    }

    #[tokio::test]
    async fn test_set_media_updates_participant() {
        // テスト項目: マイク状態の更新が保存される
        // given (前提条件):
        let repo = InMemoryRoomRepository::new(RoomSettings::default());
        let id = meeting("1111111111");
        repo.add_participant(&id, participant("s1", "alice"))
            .await
            .unwrap();

        // when (操作):
        let updated = repo
            .set_media(&id, &session("s1"), MediaKind::Microphone, false)
            .await
            .unwrap();

        // then (期待する結果):
        assert!(!updated.microphone);
        let stored = repo.find_participant(&id, &session("s1")).await.unwrap();
        assert!(!stored.microphone);
        assert!(stored.camera);
    }

    #[tokio::test]
    async fn test_add_message_to_missing_room_is_error() {
        // テスト項目: 存在しない Room へのメッセージ追加はエラー
        // given (前提条件):
        let repo = InMemoryRoomRepository::new(RoomSettings::default());

        // when (操作):
        let result = repo.add_message(&meeting("1111111111"), message("hi")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::MeetingNotFound("1111111111".to_string()))
        );
    }
}
