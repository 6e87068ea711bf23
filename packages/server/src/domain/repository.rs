//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    ChatMessage, MediaKind, Meeting, MeetingHistoryEntry, MeetingId, MeetingRole, Participant,
    RepositoryError, SessionId, UserId,
};

/// Meetings that have been started or scheduled
#[async_trait]
pub trait MeetingRepository: Send + Sync {
    /// Meeting を保存（同じ ID が既に存在する場合はエラー）
    async fn create_meeting(&self, meeting: Meeting) -> Result<(), RepositoryError>;

    /// Meeting を取得
    async fn get_meeting(&self, meeting_id: &MeetingId) -> Option<Meeting>;

    /// ホストが予約した（scheduled）Meeting の数
    async fn count_scheduled_by_host(&self, host_id: &UserId) -> usize;
}

/// Live rooms: participants and chat history per meeting
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 参加者を追加し、追加後の参加者リストを返す（Room がなければ作成）
    async fn add_participant(
        &self,
        meeting_id: &MeetingId,
        participant: Participant,
    ) -> Result<Vec<Participant>, RepositoryError>;

    /// 参加者を削除し、削除した参加者と残りの参加者リストを返す
    async fn remove_participant(
        &self,
        meeting_id: &MeetingId,
        session_id: &SessionId,
    ) -> Result<(Participant, Vec<Participant>), RepositoryError>;

    /// セッションが参加している Room の一覧
    async fn rooms_of_session(&self, session_id: &SessionId) -> Vec<MeetingId>;

    /// Room の参加者リストを取得（Room がなければ空）
    async fn get_participants(&self, meeting_id: &MeetingId) -> Vec<Participant>;

    /// Room 内の参加者を取得
    async fn find_participant(
        &self,
        meeting_id: &MeetingId,
        session_id: &SessionId,
    ) -> Option<Participant>;

    /// 参加者のカメラ／マイク状態を更新し、更新後の参加者を返す
    async fn set_media(
        &self,
        meeting_id: &MeetingId,
        session_id: &SessionId,
        kind: MediaKind,
        on: bool,
    ) -> Result<Participant, RepositoryError>;

    /// メッセージを Room の履歴に追加
    async fn add_message(
        &self,
        meeting_id: &MeetingId,
        message: ChatMessage,
    ) -> Result<(), RepositoryError>;

    /// Room のチャット履歴（古い順）
    async fn get_messages(&self, meeting_id: &MeetingId) -> Vec<ChatMessage>;
}

/// Per-user meeting history
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn add_entry(&self, entry: MeetingHistoryEntry);

    /// 新しい順に最大 `limit` 件
    async fn recent_entries(&self, user_id: &UserId, limit: usize) -> Vec<MeetingHistoryEntry>;

    async fn count_by_role(&self, user_id: &UserId, role: MeetingRole) -> usize;
}
