//! Outbound side of the real-time channel.

use huddle_shared::protocol::ClientEvent;
use tokio::sync::mpsc;

use crate::error::ChannelError;

/// Fire-and-forget emission of client events
#[cfg_attr(test, mockall::automock)]
pub trait EventChannel: Send + Sync {
    fn emit(&self, event: ClientEvent) -> Result<(), ChannelError>;
}

/// Channel that queues events for a writer task
pub struct QueuedChannel {
    tx: mpsc::UnboundedSender<ClientEvent>,
}

impl QueuedChannel {
    /// Create the channel and the receiver the writer task drains
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ClientEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventChannel for QueuedChannel {
    fn emit(&self, event: ClientEvent) -> Result<(), ChannelError> {
        self.tx.send(event).map_err(|_| ChannelError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_queues_in_order() {
        // テスト項目: 送信したイベントが順番通りにキューに入る
        // given (前提条件):
        let (channel, mut rx) = QueuedChannel::new();

        // when (操作):
        channel
            .emit(ClientEvent::JoinMeeting {
                meeting_id: "1234567890".to_string(),
            })
            .unwrap();
        channel
            .emit(ClientEvent::LeaveMeeting {
                meeting_id: "1234567890".to_string(),
            })
            .unwrap();

        // then (期待する結果):
        assert!(matches!(rx.try_recv(), Ok(ClientEvent::JoinMeeting { .. })));
        assert!(matches!(rx.try_recv(), Ok(ClientEvent::LeaveMeeting { .. })));
    }

    #[test]
    fn test_emit_after_writer_gone() {
        // テスト項目: 受信側が閉じた後の送信は Closed エラー
        // given (前提条件):
        let (channel, rx) = QueuedChannel::new();
        drop(rx);

        // when (操作):
        let result = channel.emit(ClientEvent::LeaveMeeting {
            meeting_id: "1234567890".to_string(),
        });

        // then (期待する結果):
        assert_eq!(result, Err(ChannelError::Closed));
    }
}
