//! UseCase: ダッシュボード用の Meeting 履歴と統計

use std::sync::Arc;

use crate::domain::{
    HistoryRepository, MeetingHistoryEntry, MeetingRepository, MeetingRole, MeetingStats, UserId,
};

/// 履歴 API が返す最大件数
pub const HISTORY_LIMIT: usize = 10;

pub struct MeetingHistoryUseCase {
    meetings: Arc<dyn MeetingRepository>,
    history: Arc<dyn HistoryRepository>,
}

impl MeetingHistoryUseCase {
    pub fn new(meetings: Arc<dyn MeetingRepository>, history: Arc<dyn HistoryRepository>) -> Self {
        Self { meetings, history }
    }

    /// 新しい順に最大 `HISTORY_LIMIT` 件
    pub async fn history(&self, user_id: &UserId) -> Vec<MeetingHistoryEntry> {
        self.history.recent_entries(user_id, HISTORY_LIMIT).await
    }

    pub async fn stats(&self, user_id: &UserId) -> MeetingStats {
        MeetingStats {
            created: self.history.count_by_role(user_id, MeetingRole::Host).await,
            joined: self
                .history
                .count_by_role(user_id, MeetingRole::Participant)
                .await,
            scheduled: self.meetings.count_scheduled_by_host(user_id).await,
        }
    }
}
