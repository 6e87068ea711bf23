//! One WebSocket connection to a meeting.

use std::{sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use huddle_shared::{protocol::ServerEvent, time::SystemClock};
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, protocol::Message},
};

use crate::{
    error::ClientError,
    room::{MeetingConfig, MeetingRoom, QueuedChannel, SyntheticMediaDevices},
};

use super::{
    command::{Command, parse_command},
    formatter::MessageFormatter,
    ui::redisplay_prompt,
    view::TerminalView,
};

const TICK_INTERVAL: Duration = Duration::from_secs(1);
/// How long queued events (the final leave) may take to flush on exit
const FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

type Room = MeetingRoom<TerminalView>;

enum SessionEnd {
    UserExit,
    ConnectionLost,
}

/// Build the WebSocket URL carrying the user identity as query parameters
pub fn build_connect_url(base: &str, config: &MeetingConfig) -> String {
    format!(
        "{}?user_id={}&user_name={}",
        base,
        encode_query_component(config.user_id()),
        encode_query_component(config.user_name())
    )
}

fn encode_query_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// Run the meeting over one connection until the user leaves or the
/// connection drops.
///
/// `input_rx` carries lines typed at the prompt; it outlives the session so
/// the readline thread survives reconnects.
pub async fn run_client_session(
    url: &str,
    config: &MeetingConfig,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let url = build_connect_url(url, config);

    let (ws_stream, _response) = match connect_async(&url).await {
        Ok(result) => result,
        Err(WsError::Http(response)) if response.status().is_client_error() => {
            return Err(ClientError::Rejected(format!("HTTP {}", response.status())));
        }
        Err(e) => return Err(ClientError::ConnectionError(e.to_string())),
    };

    tracing::info!("Connected to meeting {}", config.meeting_id());
    println!(
        "\nYou are '{}' in meeting {}. Type messages and press Enter to send. Type /help for commands.\n",
        config.user_name(),
        config.meeting_id()
    );

    let (mut write, mut read) = ws_stream.split();
    let (channel, mut outbound_rx) = QueuedChannel::new();

    let mut room = MeetingRoom::new(
        config.clone(),
        Arc::new(channel),
        Arc::new(SyntheticMediaDevices::new()),
        Arc::new(SystemClock),
        TerminalView::new(config.user_name()),
    );
    room.on_connect();
    room.start().await;
    let room = Arc::new(Mutex::new(room));

    // Writer: drains the room's outbound queue until every sender is gone
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(event) = outbound_rx.recv().await {
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize event: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send event: {}", e);
                write_error = true;
                break;
            }
        }

        if !write_error {
            write.close().await.ok();
        }
        write_error
    });

    let room_for_read = room.clone();
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<ServerEvent>(text.as_str()) {
                        Ok(event) => room_for_read.lock().await.handle_server_event(event),
                        Err(e) => tracing::warn!("Unrecognized server event: {}", e),
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    let room_for_tick = room.clone();
    let tick_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        loop {
            interval.tick().await;
            room_for_tick.lock().await.tick();
        }
    });

    let mut read_done = false;
    let mut write_done = false;
    let end = loop {
        tokio::select! {
            read_result = &mut read_task => {
                read_done = true;
                break if read_result.unwrap_or(false) {
                    SessionEnd::ConnectionLost
                } else {
                    SessionEnd::UserExit
                };
            }
            write_result = &mut write_task => {
                write_done = true;
                break if write_result.unwrap_or(false) {
                    SessionEnd::ConnectionLost
                } else {
                    SessionEnd::UserExit
                };
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    break SessionEnd::UserExit;
                };
                let mut room = room.lock().await;
                if !dispatch(&mut room, parse_command(&line)).await {
                    break SessionEnd::UserExit;
                }
                redisplay_prompt(room.config().user_name());
            }
        }
    };

    {
        let mut room = room.lock().await;
        match end {
            SessionEnd::UserExit => room.leave(),
            SessionEnd::ConnectionLost => {
                room.on_disconnect();
                // The next attempt captures afresh
                room.release_media();
            }
        }
    }

    // Release every handle on the room so the writer sees its queue close
    tick_task.abort();
    let _ = tick_task.await;
    if !read_done {
        read_task.abort();
        let _ = read_task.await;
    }
    drop(room);

    if !write_done {
        if tokio::time::timeout(FLUSH_TIMEOUT, &mut write_task)
            .await
            .is_err()
        {
            tracing::warn!("Timed out flushing outbound events");
            write_task.abort();
        }
    }

    match end {
        SessionEnd::UserExit => Ok(()),
        SessionEnd::ConnectionLost => Err(ClientError::ConnectionError(
            "Connection lost".to_string(),
        )),
    }
}

/// Apply one command to the room. Returns `false` when the user leaves.
async fn dispatch(room: &mut Room, command: Command) -> bool {
    match command {
        Command::Message(text) => room.send_message(&text),
        Command::React(Some(emoji)) => room.send_reaction(&emoji),
        Command::React(None) => {
            room.send_quick_reaction();
        }
        Command::Camera => room.toggle_camera(),
        Command::Mic => room.toggle_microphone(),
        Command::Share => room.start_screen_share().await,
        Command::Unshare => room.stop_screen_share(),
        Command::Chat => room.toggle_chat(),
        Command::Emoji => room.toggle_emoji_picker(),
        Command::Status => {
            let status = MessageFormatter::format_status(room.view().timer(), &room.controls());
            print!("{}", status);
        }
        Command::Help => println!("{}", MessageFormatter::format_help()),
        Command::Unknown(name) => print!("{}", MessageFormatter::format_unknown_command(&name)),
        Command::Leave => return false,
    }
    true
}
