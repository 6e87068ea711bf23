//! Value objects
//!
//! 生の文字列をドメインに入れる前に検証する。構築に成功した値は常に有効。

use super::error::ValueObjectError;

/// Length of a meeting ID in digits
pub const MEETING_ID_LENGTH: usize = 10;

const USER_ID_MAX_LENGTH: usize = 64;
const USER_NAME_MAX_LENGTH: usize = 100;
const MESSAGE_CONTENT_MAX_LENGTH: usize = 2000;
const EMOJI_MAX_LENGTH: usize = 16;
const MEETING_TITLE_MAX_LENGTH: usize = 200;

/// Accessors and `TryFrom<String>` shared by the string-backed value objects
macro_rules! string_value_object {
    ($name:ident) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

/// Trim, then check the value is non-empty and not longer than `max` characters
fn validate_text(
    value: String,
    field: &'static str,
    max: usize,
) -> Result<String, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValueObjectError::Empty(field));
    }
    if trimmed.chars().count() > max {
        return Err(ValueObjectError::TooLong { field, max });
    }
    Ok(trimmed.to_string())
}

/// 10-digit meeting identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MeetingId(String);

impl MeetingId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.len() == MEETING_ID_LENGTH && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(value))
        } else {
            Err(ValueObjectError::InvalidMeetingId(value))
        }
    }

    /// Parse an ID typed by a user, e.g. `123-456-7890`.
    ///
    /// Dashes and surrounding whitespace are dropped before validation.
    pub fn parse_user_input(input: &str) -> Result<Self, ValueObjectError> {
        let digits: String = input.trim().chars().filter(|c| *c != '-').collect();
        Self::new(digits)
    }
}

string_value_object!(MeetingId);

/// Identifier of an account
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text(value, "user_id", USER_ID_MAX_LENGTH).map(Self)
    }
}

string_value_object!(UserId);

/// Display name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text(value, "user_name", USER_NAME_MAX_LENGTH).map(Self)
    }
}

string_value_object!(UserName);

/// One WebSocket connection. A user may hold several.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::Empty("session_id"));
        }
        Ok(Self(value))
    }

    /// Generate a fresh random session ID
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

string_value_object!(SessionId);

/// Chat message body (trimmed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text(value, "message", MESSAGE_CONTENT_MAX_LENGTH).map(Self)
    }
}

string_value_object!(MessageContent);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emoji(String);

impl Emoji {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text(value, "emoji", EMOJI_MAX_LENGTH).map(Self)
    }
}

string_value_object!(Emoji);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingTitle(String);

impl MeetingTitle {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_text(value, "title", MEETING_TITLE_MAX_LENGTH).map(Self)
    }

    /// Title used when the host did not give one
    pub fn default_for(meeting_id: &MeetingId) -> Self {
        Self(format!("Meeting {}", meeting_id.as_str()))
    }
}

string_value_object!(MeetingTitle);

/// Unix timestamp (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
