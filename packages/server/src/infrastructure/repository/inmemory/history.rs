//! InMemory History Repository 実装

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{HistoryRepository, MeetingHistoryEntry, MeetingRole, UserId};

pub struct InMemoryHistoryRepository {
    /// 追加順（古い順）
    entries: Mutex<Vec<MeetingHistoryEntry>>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryHistoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn add_entry(&self, entry: MeetingHistoryEntry) {
        self.entries.lock().await.push(entry);
    }

    async fn recent_entries(&self, user_id: &UserId, limit: usize) -> Vec<MeetingHistoryEntry> {
        let entries = self.entries.lock().await;
        let mut recent: Vec<MeetingHistoryEntry> = entries
            .iter()
            .filter(|e| &e.user_id == user_id)
            .cloned()
            .collect();

        // 同時刻のエントリは後から追加されたものを先にする
        recent.reverse();
        recent.sort_by(|a, b| b.joined_at.cmp(&a.joined_at));
        recent.truncate(limit);
        recent
    }

    async fn count_by_role(&self, user_id: &UserId, role: MeetingRole) -> usize {
        let entries = self.entries.lock().await;
        entries
            .iter()
            .filter(|e| &e.user_id == user_id && e.role == role)
            .count()
    }
}
