//! Parsing of terminal input lines.

/// What a line typed at the prompt asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text is sent as a chat message
    Message(String),
    /// `/react` picks a random quick reaction, `/react 🎉` sends that emoji
    React(Option<String>),
    Camera,
    Mic,
    Share,
    Unshare,
    Chat,
    Emoji,
    Status,
    Help,
    Leave,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Message(line.to_string());
    };

    let (name, argument) = match rest.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (rest, ""),
    };

    match name {
        "react" if argument.is_empty() => Command::React(None),
        "react" => Command::React(Some(argument.to_string())),
        "camera" | "cam" => Command::Camera,
        "mic" => Command::Mic,
        "share" => Command::Share,
        "unshare" => Command::Unshare,
        "chat" => Command::Chat,
        "emoji" => Command::Emoji,
        "status" => Command::Status,
        "help" => Command::Help,
        "leave" | "quit" => Command::Leave,
        _ => Command::Unknown(name.to_string()),
    }
}
