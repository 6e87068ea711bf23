//! Fixed per-page meeting configuration.

use crate::error::ClientError;

const MEETING_ID_LENGTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingConfig {
    meeting_id: String,
    user_id: String,
    user_name: String,
}

impl MeetingConfig {
    /// Validate and build a config. Dashes in the meeting ID are dropped.
    pub fn new(
        meeting_id: impl AsRef<str>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let meeting_id: String = meeting_id
            .as_ref()
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .collect();
        if meeting_id.len() != MEETING_ID_LENGTH || !meeting_id.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ClientError::InvalidConfig(
                "meeting ID must be 10 digits".to_string(),
            ));
        }

        let user_id = user_id.into().trim().to_string();
        let user_name = user_name.into().trim().to_string();
        if user_id.is_empty() || user_name.is_empty() {
            return Err(ClientError::InvalidConfig(
                "user ID and name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            meeting_id,
            user_id,
            user_name,
        })
    }

    pub fn meeting_id(&self) -> &str {
        &self.meeting_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }
}
