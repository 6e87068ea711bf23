//! Factories for generated identifiers.

use rand::Rng;

use super::{
    error::ValueObjectError,
    value_object::{MEETING_ID_LENGTH, MeetingId},
};

/// Generates random 10-digit meeting IDs
pub struct MeetingIdFactory;

impl MeetingIdFactory {
    pub fn generate() -> Result<MeetingId, ValueObjectError> {
        let mut rng = rand::thread_rng();
        let digits: String = (0..MEETING_ID_LENGTH)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();

        MeetingId::new(digits)
    }
}
