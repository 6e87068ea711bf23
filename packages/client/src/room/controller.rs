//! The meeting room state machine.

use std::sync::Arc;

use huddle_shared::{
    protocol::{ChatHistory, ClientEvent, NewMessage, NewReaction, RosterChange, ServerEvent},
    time::{Clock, stored_timestamp_to_local_clock},
};
use rand::{Rng, seq::SliceRandom};

use super::{
    channel::EventChannel,
    config::MeetingConfig,
    media::{MediaDevices, MediaStream, TrackKind},
    render::{format_elapsed, render_message},
    view::{ChatEntry, ControlState, FloatingReaction, NoticeKind, Preview, RemoteParticipant, RoomView},
};

/// Floating reactions are removed this long after they appear
pub const REACTION_LIFETIME_MS: i64 = 3000;

/// Pool for the one-click reaction button
pub const QUICK_REACTIONS: [&str; 6] = ["👍", "👏", "😂", "😮", "❤️", "🎉"];

// Reactions float somewhere between these horizontal positions (percent)
const REACTION_LEFT_MIN: f64 = 10.0;
const REACTION_LEFT_MAX: f64 = 90.0;

pub struct MeetingRoom<V: RoomView> {
    config: MeetingConfig,
    channel: Arc<dyn EventChannel>,
    devices: Arc<dyn MediaDevices>,
    clock: Arc<dyn Clock>,
    view: V,
    timer_started_at: Option<i64>,
    camera_stream: Option<MediaStream>,
    screen_stream: Option<MediaStream>,
    camera_on: bool,
    mic_on: bool,
    chat_visible: bool,
    emoji_picker_visible: bool,
    roster: Vec<RemoteParticipant>,
    reactions: Vec<FloatingReaction>,
    next_reaction_id: u64,
    left: bool,
}

impl<V: RoomView> MeetingRoom<V> {
    pub fn new(
        config: MeetingConfig,
        channel: Arc<dyn EventChannel>,
        devices: Arc<dyn MediaDevices>,
        clock: Arc<dyn Clock>,
        view: V,
    ) -> Self {
        Self {
            config,
            channel,
            devices,
            clock,
            view,
            timer_started_at: None,
            camera_stream: None,
            screen_stream: None,
            camera_on: true,
            mic_on: true,
            chat_visible: true,
            emoji_picker_visible: false,
            roster: Vec::new(),
            reactions: Vec::new(),
            next_reaction_id: 0,
            left: false,
        }
    }

    /// Start the timer, acquire local media, then announce presence
    pub async fn start(&mut self) {
        self.timer_started_at = Some(self.clock.now_millis());
        self.view.render_timer(&format_elapsed(0));
        self.render_controls();

        self.acquire_media().await;

        self.emit(ClientEvent::JoinMeeting {
            meeting_id: self.meeting_id(),
        });
    }

    async fn acquire_media(&mut self) {
        match self.devices.get_user_media().await {
            Ok(stream) => {
                self.view.set_preview(&Preview::Camera {
                    stream_id: stream.id().to_string(),
                    muted: true,
                });
                self.camera_stream = Some(stream);
                self.view
                    .show_notice(NoticeKind::Success, "Camera and microphone connected");
            }
            Err(e) => {
                tracing::warn!("media capture failed: {}", e);
                self.camera_on = false;
                self.mic_on = false;
                self.render_controls();
                self.view.show_notice(
                    NoticeKind::Warning,
                    "Could not access camera or microphone. You can still chat.",
                );
            }
        }
    }

    pub fn on_connect(&mut self) {
        self.view
            .show_notice(NoticeKind::Success, "Connected to meeting server");
    }

    pub fn on_disconnect(&mut self) {
        self.view
            .show_notice(NoticeKind::Warning, "Disconnected from meeting server");
    }

    pub fn handle_server_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::UserJoined(change) | ServerEvent::UserLeft(change) => {
                self.rebuild_roster(change)
            }
            ServerEvent::NewMessage(message) => self.append_message(message),
            ServerEvent::MessageSent(ack) => {
                tracing::debug!("message acknowledged: {} ({})", ack.status, ack.message);
            }
            ServerEvent::NewReaction(reaction) => self.spawn_reaction(reaction),
            ServerEvent::CameraToggled(toggled) => {
                self.patch_participant(&toggled.user_id, TrackKind::Video, toggled.camera_on)
            }
            ServerEvent::MicrophoneToggled(toggled) => {
                self.patch_participant(&toggled.user_id, TrackKind::Audio, toggled.mic_on)
            }
            ServerEvent::ChatHistory(history) => self.replay_history(history),
            ServerEvent::Error(notice) => {
                self.view.show_notice(NoticeKind::Warning, &notice.message);
            }
        }
    }

    fn rebuild_roster(&mut self, change: RosterChange) {
        let own_id = self.config.user_id();
        self.roster = change
            .participants
            .iter()
            .filter(|p| p.id != own_id)
            .map(RemoteParticipant::from)
            .collect();
        self.view.render_roster(&self.roster);
        self.view.show_notice(NoticeKind::Info, &change.message);
    }

    fn append_message(&mut self, message: NewMessage) {
        self.view.append_chat(ChatEntry {
            html: render_message(&message.message),
            user_name: message.user_name,
            text: message.message,
            timestamp: message.timestamp,
        });
        self.view.scroll_chat_to_bottom();
    }

    fn replay_history(&mut self, history: ChatHistory) {
        for message in history.messages {
            let timestamp = stored_timestamp_to_local_clock(&message.timestamp)
                .unwrap_or(message.timestamp);
            self.view.append_chat(ChatEntry {
                html: render_message(&message.message),
                user_name: message.user_name,
                text: message.message,
                timestamp,
            });
        }
        self.view.scroll_chat_to_bottom();
    }

    fn spawn_reaction(&mut self, reaction: NewReaction) {
        let id = self.next_reaction_id;
        self.next_reaction_id += 1;

        let floating = FloatingReaction {
            id,
            emoji: reaction.emoji,
            user_name: reaction.user_name,
            left_percent: rand::thread_rng().gen_range(REACTION_LEFT_MIN..REACTION_LEFT_MAX),
            expires_at: self.clock.now_millis() + REACTION_LIFETIME_MS,
        };
        self.view.spawn_reaction(&floating);
        self.reactions.push(floating);
    }

    fn patch_participant(&mut self, user_id: &str, kind: TrackKind, on: bool) {
        for participant in self.roster.iter_mut().filter(|p| p.id == user_id) {
            match kind {
                TrackKind::Video => participant.camera = on,
                TrackKind::Audio => participant.microphone = on,
            }
        }
        self.view.update_participant_media(user_id, kind, on);
    }

    /// Send a chat message. Blank input is ignored.
    pub fn send_message(&mut self, text: &str) {
        let message = text.trim();
        if message.is_empty() {
            return;
        }
        self.emit(ClientEvent::SendMessage {
            meeting_id: self.meeting_id(),
            message: message.to_string(),
        });
        self.view.clear_message_input();
    }

    /// Send a reaction picked at random from `QUICK_REACTIONS`
    pub fn send_quick_reaction(&mut self) -> &'static str {
        let emoji = QUICK_REACTIONS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(QUICK_REACTIONS[0]);
        self.send_reaction(emoji);
        emoji
    }

    pub fn send_reaction(&mut self, emoji: &str) {
        if emoji.trim().is_empty() {
            return;
        }
        self.emit(ClientEvent::SendReaction {
            meeting_id: self.meeting_id(),
            emoji: emoji.to_string(),
        });
        self.close_emoji_picker();
    }

    pub fn toggle_camera(&mut self) {
        self.camera_on = !self.camera_on;
        if let Some(stream) = &self.camera_stream {
            stream.set_enabled(TrackKind::Video, self.camera_on);
        }
        self.render_controls();
        self.emit(ClientEvent::ToggleCamera {
            meeting_id: self.meeting_id(),
            camera_on: self.camera_on,
        });
    }

    pub fn toggle_microphone(&mut self) {
        self.mic_on = !self.mic_on;
        if let Some(stream) = &self.camera_stream {
            stream.set_enabled(TrackKind::Audio, self.mic_on);
        }
        self.render_controls();
        self.emit(ClientEvent::ToggleMicrophone {
            meeting_id: self.meeting_id(),
            mic_on: self.mic_on,
        });
    }

    /// Replace the local preview with a screen capture
    pub async fn start_screen_share(&mut self) {
        if self.screen_stream.is_some() {
            return;
        }
        match self.devices.get_display_media().await {
            Ok(stream) => {
                self.view.set_preview(&Preview::Screen {
                    stream_id: stream.id().to_string(),
                });
                self.screen_stream = Some(stream);
                self.render_controls();
                self.view
                    .show_notice(NoticeKind::Success, "Screen sharing started");
            }
            Err(e) => {
                tracing::warn!("screen capture failed: {}", e);
                self.view
                    .show_notice(NoticeKind::Warning, "Could not start screen sharing");
            }
        }
    }

    /// Stop the screen capture and go back to the camera preview
    pub fn stop_screen_share(&mut self) {
        let Some(stream) = self.screen_stream.take() else {
            return;
        };
        stream.stop_all();

        let preview = match &self.camera_stream {
            Some(camera) => Preview::Camera {
                stream_id: camera.id().to_string(),
                muted: true,
            },
            None => Preview::None,
        };
        self.view.set_preview(&preview);
        self.render_controls();
        self.view.show_notice(NoticeKind::Info, "Screen sharing stopped");
    }

    /// The capture was ended from outside, e.g. the host's "stop sharing" bar
    pub fn on_screen_share_ended(&mut self) {
        self.stop_screen_share();
    }

    pub fn toggle_chat(&mut self) {
        self.chat_visible = !self.chat_visible;
        self.view.set_chat_visible(self.chat_visible);
    }

    pub fn toggle_emoji_picker(&mut self) {
        self.emoji_picker_visible = !self.emoji_picker_visible;
        self.view.set_emoji_picker_visible(self.emoji_picker_visible);
    }

    /// Click outside the picker
    pub fn close_emoji_picker(&mut self) {
        if self.emoji_picker_visible {
            self.emoji_picker_visible = false;
            self.view.set_emoji_picker_visible(false);
        }
    }

    /// Advance the elapsed-time display and expire floating reactions
    pub fn tick(&mut self) {
        let now = self.clock.now_millis();
        if let Some(started_at) = self.timer_started_at {
            self.view.render_timer(&format_elapsed(now - started_at));
        }

        let (expired, alive): (Vec<_>, Vec<_>) = std::mem::take(&mut self.reactions)
            .into_iter()
            .partition(|r| r.expires_at <= now);
        self.reactions = alive;
        for reaction in expired {
            self.view.remove_reaction(reaction.id);
        }
    }

    /// Announce departure, stop the timer and release every capture track.
    /// Calling it again does nothing.
    pub fn leave(&mut self) {
        if self.left {
            return;
        }
        self.left = true;

        self.emit(ClientEvent::LeaveMeeting {
            meeting_id: self.meeting_id(),
        });
        self.timer_started_at = None;
        self.release_media();
    }

    /// Stop every local capture track without announcing a departure.
    /// Tracks already released are not stopped again.
    pub fn release_media(&mut self) {
        if let Some(stream) = self.camera_stream.take() {
            stream.stop_all();
        }
        if let Some(stream) = self.screen_stream.take() {
            stream.stop_all();
        }
    }

    fn render_controls(&mut self) {
        let controls = self.controls();
        self.view.render_controls(&controls);
    }

    fn emit(&self, event: ClientEvent) {
        if let Err(e) = self.channel.emit(event) {
            tracing::warn!("dropped outbound event: {}", e);
        }
    }

    fn meeting_id(&self) -> String {
        self.config.meeting_id().to_string()
    }

    pub fn config(&self) -> &MeetingConfig {
        &self.config
    }

    pub fn controls(&self) -> ControlState {
        ControlState {
            camera_on: self.camera_on,
            mic_on: self.mic_on,
            screen_sharing: self.screen_stream.is_some(),
        }
    }

    pub fn roster(&self) -> &[RemoteParticipant] {
        &self.roster
    }

    pub fn is_chat_visible(&self) -> bool {
        self.chat_visible
    }

    pub fn is_emoji_picker_visible(&self) -> bool {
        self.emoji_picker_visible
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer_started_at.is_some()
    }

    pub fn has_left(&self) -> bool {
        self.left
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ChannelError, MediaError};
    use crate::room::{
        channel::{MockEventChannel, QueuedChannel},
        media::{MediaTrack, MockMediaDevices, SyntheticTrack},
        view::HeadlessView,
    };
    use huddle_shared::{
        protocol::{
            CameraToggled, ErrorNotice, HistoryMessage, MicrophoneToggled, ParticipantInfo,
        },
        time::ManualClock,
    };
    use tokio::sync::mpsc::UnboundedReceiver;

    const MEETING_ID: &str = "1234567890";
    const START: i64 = 1672531200000;

    struct Fixture {
        room: MeetingRoom<HeadlessView>,
        events: UnboundedReceiver<ClientEvent>,
        clock: Arc<ManualClock>,
        audio: Arc<SyntheticTrack>,
        video: Arc<SyntheticTrack>,
        screen: Arc<SyntheticTrack>,
    }

    impl Fixture {
        fn drain(&mut self) -> Vec<ClientEvent> {
            let mut events = Vec::new();
            while let Ok(event) = self.events.try_recv() {
                events.push(event);
            }
            events
        }
    }

    fn devices(
        audio: Arc<SyntheticTrack>,
        video: Arc<SyntheticTrack>,
        screen: Arc<SyntheticTrack>,
    ) -> MockMediaDevices {
        let mut devices = MockMediaDevices::new();
        devices.expect_get_user_media().returning(move || {
            let tracks: Vec<Arc<dyn MediaTrack>> = vec![audio.clone(), video.clone()];
            Ok(MediaStream::new("camera-0", tracks))
        });
        devices.expect_get_display_media().returning(move || {
            let tracks: Vec<Arc<dyn MediaTrack>> = vec![screen.clone()];
            Ok(MediaStream::new("screen-0", tracks))
        });
        devices
    }

    fn fixture() -> Fixture {
        let audio = SyntheticTrack::new(TrackKind::Audio);
        let video = SyntheticTrack::new(TrackKind::Video);
        let screen = SyntheticTrack::new(TrackKind::Video);
        let (channel, events) = QueuedChannel::new();
        let clock = Arc::new(ManualClock::new(START));
        let room = MeetingRoom::new(
            MeetingConfig::new(MEETING_ID, "u-me", "Me").unwrap(),
            Arc::new(channel),
            Arc::new(devices(audio.clone(), video.clone(), screen.clone())),
            clock.clone(),
            HeadlessView::new(),
        );
        Fixture {
            room,
            events,
            clock,
            audio,
            video,
            screen,
        }
    }

    async fn started() -> Fixture {
        let mut f = fixture();
        f.room.start().await;
        f.drain();
        f
    }

    fn info(id: &str, name: &str) -> ParticipantInfo {
        ParticipantInfo {
            id: id.to_string(),
            name: name.to_string(),
            joined_at: "2023-01-01T00:00:00+00:00".to_string(),
            camera: true,
            microphone: true,
        }
    }

    fn joined(participants: Vec<ParticipantInfo>) -> ServerEvent {
        ServerEvent::UserJoined(RosterChange {
            user_name: "Bob".to_string(),
            message: "Bob joined the meeting".to_string(),
            participants,
        })
    }

    fn reaction(emoji: &str) -> ServerEvent {
        ServerEvent::NewReaction(NewReaction {
            id: "r1".to_string(),
            user_name: "Bob".to_string(),
            emoji: emoji.to_string(),
            timestamp: "2023-01-01T00:00:00+00:00".to_string(),
        })
    }

    #[tokio::test]
    async fn test_start_acquires_media_then_joins() {
        // テスト項目: 開始時にメディアを取得してから参加を通知する
        // given (前提条件):
        let mut f = fixture();

        // when (操作):
        f.room.start().await;

        // then (期待する結果):
        assert_eq!(
            f.drain(),
            vec![ClientEvent::JoinMeeting {
                meeting_id: MEETING_ID.to_string()
            }]
        );
        let view = f.room.view();
        assert_eq!(
            view.preview,
            Preview::Camera {
                stream_id: "camera-0".to_string(),
                muted: true
            }
        );
        assert_eq!(view.last_notice().unwrap().kind, NoticeKind::Success);
        assert_eq!(view.timer, "00:00:00");
        assert!(f.room.is_timer_running());
    }

    #[tokio::test]
    async fn test_media_denied_degrades() {
        // テスト項目: メディア取得拒否時はカメラ・マイクがオフになり参加は継続する
        // given (前提条件):
        let (channel, mut events) = QueuedChannel::new();
        let mut devices = MockMediaDevices::new();
        devices
            .expect_get_user_media()
            .times(1)
            .returning(|| Err(MediaError::PermissionDenied("blocked".to_string())));
        let mut room = MeetingRoom::new(
            MeetingConfig::new(MEETING_ID, "u-me", "Me").unwrap(),
            Arc::new(channel),
            Arc::new(devices),
            Arc::new(ManualClock::new(START)),
            HeadlessView::new(),
        );

        // when (操作):
        room.start().await;

        // then (期待する結果):
        let controls = room.controls();
        assert!(!controls.camera_on);
        assert!(!controls.mic_on);
        assert_eq!(room.view().controls, controls);
        assert_eq!(room.view().last_notice().unwrap().kind, NoticeKind::Warning);
        assert_eq!(room.view().preview, Preview::None);
        assert!(matches!(
            events.try_recv(),
            Ok(ClientEvent::JoinMeeting { .. })
        ));
    }

    #[tokio::test]
    async fn test_roster_rebuild_excludes_self() {
        // テスト項目: 参加者一覧の更新で自分以外が全件描き直される
        // given (前提条件):
        let mut f = started().await;
        f.room
            .handle_server_event(joined(vec![info("u-me", "Me"), info("u-old", "Old")]));

        // when (操作):
        f.room.handle_server_event(ServerEvent::UserLeft(RosterChange {
            user_name: "Old".to_string(),
            message: "Old left the meeting".to_string(),
            participants: vec![info("u-me", "Me"), info("u-bob", "Bob")],
        }));

        // then (期待する結果):
        let view = f.room.view();
        assert_eq!(view.roster.len(), 1);
        assert_eq!(view.roster[0].id, "u-bob");
        assert_eq!(view.last_notice().unwrap().text, "Old left the meeting");
        assert_eq!(f.room.roster(), view.roster.as_slice());
    }

    #[tokio::test]
    async fn test_remote_toggles_patch_only_target() {
        // テスト項目: 他の参加者のカメラ・マイク切り替えが該当者だけに反映される
        // given (前提条件):
        let mut f = started().await;
        f.room
            .handle_server_event(joined(vec![info("u-bob", "Bob"), info("u-eve", "Eve")]));

        // when (操作):
        f.room
            .handle_server_event(ServerEvent::CameraToggled(CameraToggled {
                user_id: "u-bob".to_string(),
                user_name: "Bob".to_string(),
                camera_on: false,
            }));
        f.room
            .handle_server_event(ServerEvent::MicrophoneToggled(MicrophoneToggled {
                user_id: "u-eve".to_string(),
                user_name: "Eve".to_string(),
                mic_on: false,
            }));

        // then (期待する結果):
        let roster = &f.room.view().roster;
        assert!(!roster[0].camera && roster[0].microphone);
        assert!(roster[1].camera && !roster[1].microphone);
    }

    #[tokio::test]
    async fn test_new_message_is_rendered_and_scrolled() {
        // テスト項目: 受信メッセージが描画されチャット欄が最下部へスクロールする
        // given (前提条件):
        let mut f = started().await;

        // when (操作):
        f.room
            .handle_server_event(ServerEvent::NewMessage(NewMessage {
                id: "m1".to_string(),
                user_name: "Bob".to_string(),
                message: "hi :) https://example.com".to_string(),
                timestamp: "09:00:00".to_string(),
            }));

        // then (期待する結果):
        let view = f.room.view();
        assert_eq!(view.chat.len(), 1);
        assert!(view.chat[0].html.starts_with("hi 😊 <a href=\"https://example.com\""));
        assert_eq!(view.chat[0].timestamp, "09:00:00");
        assert_eq!(view.chat_scrolls, 1);
    }

    #[tokio::test]
    async fn test_history_replay_converts_timestamps() {
        // テスト項目: 履歴の一括再生で保存時刻がローカル時刻表示に変換される
        // given (前提条件):
        let mut f = started().await;
        let history = ChatHistory {
            messages: vec![
                HistoryMessage {
                    user_name: "Bob".to_string(),
                    message: "first".to_string(),
                    timestamp: "2023-01-01T00:00:00+00:00".to_string(),
                },
                HistoryMessage {
                    user_name: "Eve".to_string(),
                    message: "second".to_string(),
                    timestamp: "not a time".to_string(),
                },
            ],
        };

        // when (操作):
        f.room.handle_server_event(ServerEvent::ChatHistory(history));

        // then (期待する結果):
        let view = f.room.view();
        assert_eq!(view.chat.len(), 2);
        assert_eq!(
            Some(view.chat[0].timestamp.clone()),
            stored_timestamp_to_local_clock("2023-01-01T00:00:00+00:00")
        );
        assert_eq!(view.chat[1].timestamp, "not a time");
        assert_eq!(view.chat_scrolls, 1);
    }

    #[tokio::test]
    async fn test_reaction_floats_then_expires() {
        // テスト項目: リアクションは 3000 ms 後に消える
        // given (前提条件):
        let mut f = started().await;
        f.room.handle_server_event(reaction("🎉"));
        let left = f.room.view().reactions[0].left_percent;

        // when (操作):
        f.clock.advance(REACTION_LIFETIME_MS - 1);
        f.room.tick();
        let alive = f.room.view().reactions.len();
        f.clock.advance(1);
        f.room.tick();

        // then (期待する結果):
        assert!((REACTION_LEFT_MIN..REACTION_LEFT_MAX).contains(&left));
        assert_eq!(alive, 1);
        assert!(f.room.view().reactions.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_surfaces_warning() {
        // テスト項目: サーバーのエラー通知が警告として表示される
        // given (前提条件):
        let mut f = started().await;

        // when (操作):
        f.room.handle_server_event(ServerEvent::Error(ErrorNotice {
            message: "Meeting not found".to_string(),
        }));

        // then (期待する結果):
        let notice = f.room.view().last_notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Warning);
        assert_eq!(notice.text, "Meeting not found");
    }

    #[tokio::test]
    async fn test_send_message_trims_and_ignores_blank() {
        // テスト項目: 空白のみの入力は送信されず、通常の入力は trim して送信される
        // given (前提条件):
        let mut f = started().await;

        // when (操作):
        f.room.send_message("   ");
        f.room.send_message("  hello  ");

        // then (期待する結果):
        assert_eq!(
            f.drain(),
            vec![ClientEvent::SendMessage {
                meeting_id: MEETING_ID.to_string(),
                message: "hello".to_string()
            }]
        );
        assert_eq!(f.room.view().input_clears, 1);
    }

    #[tokio::test]
    async fn test_send_message_is_optimistic_on_closed_channel() {
        // テスト項目: 送信に失敗しても入力欄はクリアされる
        // given (前提条件):
        let mut channel = MockEventChannel::new();
        channel
            .expect_emit()
            .returning(|_| Err(ChannelError::Closed));
        let mut room = MeetingRoom::new(
            MeetingConfig::new(MEETING_ID, "u-me", "Me").unwrap(),
            Arc::new(channel),
            Arc::new(MockMediaDevices::new()),
            Arc::new(ManualClock::new(START)),
            HeadlessView::new(),
        );

        // when (操作):
        room.send_message("hello");

        // then (期待する結果):
        assert_eq!(room.view().input_clears, 1);
    }

    #[tokio::test]
    async fn test_quick_reaction_comes_from_pool() {
        // テスト項目: クイックリアクションは固定の候補から選ばれる
        // given (前提条件):
        let mut f = started().await;

        // when (操作):
        let emoji = f.room.send_quick_reaction();

        // then (期待する結果):
        assert!(QUICK_REACTIONS.contains(&emoji));
        assert_eq!(
            f.drain(),
            vec![ClientEvent::SendReaction {
                meeting_id: MEETING_ID.to_string(),
                emoji: emoji.to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_picked_reaction_closes_picker() {
        // テスト項目: 絵文字ピッカーから選ぶと送信されピッカーが閉じる
        // given (前提条件):
        let mut f = started().await;
        f.room.toggle_emoji_picker();
        assert!(f.room.view().emoji_picker_visible);

        // when (操作):
        f.room.send_reaction("👏");

        // then (期待する結果):
        assert!(!f.room.is_emoji_picker_visible());
        assert!(!f.room.view().emoji_picker_visible);
        assert_eq!(f.drain().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_camera_only_touches_video() {
        // テスト項目: カメラ切り替えは映像トラックだけを無効化しサーバーに通知する
        // given (前提条件):
        let mut f = started().await;

        // when (操作):
        f.room.toggle_camera();

        // then (期待する結果):
        assert!(!f.video.is_enabled());
        assert!(f.audio.is_enabled());
        assert_eq!(f.room.view().controls.camera_icon(), "fa-video-slash");
        assert_eq!(
            f.drain(),
            vec![ClientEvent::ToggleCamera {
                meeting_id: MEETING_ID.to_string(),
                camera_on: false
            }]
        );
    }

    #[tokio::test]
    async fn test_toggle_microphone_twice_restores() {
        // テスト項目: マイクを 2 回切り替えると元に戻る
        // given (前提条件):
        let mut f = started().await;

        // when (操作):
        f.room.toggle_microphone();
        let muted = !f.audio.is_enabled();
        f.room.toggle_microphone();

        // then (期待する結果):
        assert!(muted);
        assert!(f.audio.is_enabled());
        assert!(f.video.is_enabled());
        assert_eq!(f.room.view().controls.mic_icon(), "fa-microphone");
        assert_eq!(f.drain().len(), 2);
    }

    #[tokio::test]
    async fn test_screen_share_swaps_preview_and_back() {
        // テスト項目: 画面共有でプレビューが切り替わり、終了でカメラに戻る
        // given (前提条件):
        let mut f = started().await;

        // when (操作):
        f.room.start_screen_share().await;
        let sharing = f.room.view().preview.clone();
        f.room.on_screen_share_ended();

        // then (期待する結果):
        assert_eq!(
            sharing,
            Preview::Screen {
                stream_id: "screen-0".to_string()
            }
        );
        assert_eq!(
            f.room.view().preview,
            Preview::Camera {
                stream_id: "camera-0".to_string(),
                muted: true
            }
        );
        assert_eq!(f.screen.stop_count(), 1);
        assert!(!f.room.controls().screen_sharing);
    }

    #[tokio::test]
    async fn test_chat_and_picker_toggles() {
        // テスト項目: チャット欄と絵文字ピッカーの表示切り替え
        // given (前提条件):
        let mut f = started().await;

        // when (操作):
        f.room.toggle_chat();
        f.room.toggle_emoji_picker();
        f.room.close_emoji_picker();

        // then (期待する結果):
        assert!(!f.room.is_chat_visible());
        assert!(!f.room.view().chat_visible);
        assert!(!f.room.view().emoji_picker_visible);
    }

    #[tokio::test]
    async fn test_tick_shows_elapsed_time() {
        // テスト項目: 経過時間が 1 秒単位で表示される
        // given (前提条件):
        let mut f = started().await;

        // when (操作):
        f.clock.advance(61_500);
        f.room.tick();

        // then (期待する結果):
        assert_eq!(f.room.view().timer, "00:01:01");
    }

    #[tokio::test]
    async fn test_leave_stops_every_track_once() {
        // テスト項目: 退出で全トラックが 1 回だけ停止しタイマーも止まる
        // given (前提条件):
        let mut f = started().await;
        f.room.start_screen_share().await;

        // when (操作):
        f.room.leave();
        f.room.leave();
        f.clock.advance(5_000);
        f.room.tick();

        // then (期待する結果):
        assert_eq!(f.audio.stop_count(), 1);
        assert_eq!(f.video.stop_count(), 1);
        assert_eq!(f.screen.stop_count(), 1);
        assert!(!f.room.is_timer_running());
        assert!(f.room.has_left());
        assert_eq!(f.room.view().timer, "00:00:00");
        assert_eq!(
            f.drain(),
            vec![ClientEvent::LeaveMeeting {
                meeting_id: MEETING_ID.to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_release_media_without_leaving() {
        // テスト項目: 接続断時の解放では退出を通知せずに全トラックを 1 回だけ停止する
        // given (前提条件):
        let mut f = started().await;
        f.room.start_screen_share().await;
        f.drain();

        // when (操作):
        f.room.on_disconnect();
        f.room.release_media();
        f.room.leave();

        // then (期待する結果):
        assert_eq!(f.audio.stop_count(), 1);
        assert_eq!(f.video.stop_count(), 1);
        assert_eq!(f.screen.stop_count(), 1);
        assert!(!f.room.controls().screen_sharing);
        assert_eq!(
            f.room.view().last_notice().map(|n| n.text.as_str()),
            Some("Disconnected from meeting server")
        );
        assert_eq!(
            f.drain(),
            vec![ClientEvent::LeaveMeeting {
                meeting_id: MEETING_ID.to_string()
            }]
        );
    }
}
