//! InMemory Meeting Repository 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Meeting, MeetingId, MeetingRepository, MeetingStatus, RepositoryError, UserId,
};

pub struct InMemoryMeetingRepository {
    meetings: Mutex<HashMap<String, Meeting>>,
}

impl InMemoryMeetingRepository {
    pub fn new() -> Self {
        Self {
            meetings: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryMeetingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MeetingRepository for InMemoryMeetingRepository {
    async fn create_meeting(&self, meeting: Meeting) -> Result<(), RepositoryError> {
        let mut meetings = self.meetings.lock().await;
        let key = meeting.id.as_str().to_string();
        if meetings.contains_key(&key) {
            return Err(RepositoryError::DuplicateMeeting(key));
        }
        meetings.insert(key, meeting);
        Ok(())
    }

    async fn get_meeting(&self, meeting_id: &MeetingId) -> Option<Meeting> {
        let meetings = self.meetings.lock().await;
        meetings.get(meeting_id.as_str()).cloned()
    }

    async fn count_scheduled_by_host(&self, host_id: &UserId) -> usize {
        let meetings = self.meetings.lock().await;
        meetings
            .values()
            .filter(|m| &m.host_id == host_id && m.status == MeetingStatus::Scheduled)
            .count()
    }
}
