//! UseCase: 絵文字リアクション送信処理
//!
//! リアクションは保存せず、Room の全員に中継するだけ。

use std::sync::Arc;

use huddle_shared::time::Clock;

use crate::domain::{Emoji, MeetingId, Reaction, RoomRepository, Session, SessionId, Timestamp};

use super::error::ParticipationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedReaction {
    pub reaction: Reaction,
    pub recipients: Vec<SessionId>,
}

pub struct SendReactionUseCase {
    rooms: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl SendReactionUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { rooms, clock }
    }

    pub async fn execute(
        &self,
        session: &Session,
        meeting_id: MeetingId,
        emoji: Emoji,
    ) -> Result<PostedReaction, ParticipationError> {
        let participants = self.rooms.get_participants(&meeting_id).await;
        if !participants.iter().any(|p| p.session_id == session.id) {
            return Err(ParticipationError::NotInMeeting(
                meeting_id.as_str().to_string(),
            ));
        }

        let reaction = Reaction::new(
            session.user_name.clone(),
            emoji,
            Timestamp::new(self.clock.now_millis()),
        );
        tracing::debug!(
            "Reaction {} from '{}' in meeting {}",
            reaction.emoji,
            session.user_name,
            meeting_id
        );

        Ok(PostedReaction {
            reaction,
            recipients: participants.into_iter().map(|p| p.session_id).collect(),
        })
    }
}
