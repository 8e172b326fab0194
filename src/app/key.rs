//! Bounded identifier for a tracked sensor/room.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::KeyError;

/// Maximum key length in bytes.
pub const ROOM_KEY_MAX: usize = 32;

/// Identifies one independently tracked [`MoldRiskState`](crate::risk::MoldRiskState).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomKey(heapless::String<ROOM_KEY_MAX>);

impl RoomKey {
    pub fn new(key: &str) -> Result<Self, KeyError> {
        if key.is_empty() {
            return Err(KeyError::Empty);
        }
        let mut s = heapless::String::new();
        s.push_str(key)
            .map_err(|()| KeyError::TooLong { max: ROOM_KEY_MAX })?;
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RoomKey {
    type Error = KeyError;

    fn try_from(key: &str) -> Result<Self, Self::Error> {
        Self::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_short_keys() {
        let k = RoomKey::new("room-101").unwrap();
        assert_eq!(k.as_str(), "room-101");
        assert_eq!(k.to_string(), "room-101");
    }

    #[test]
    fn rejects_empty_and_long_keys() {
        assert_eq!(RoomKey::new(""), Err(KeyError::Empty));
        let long = "x".repeat(ROOM_KEY_MAX + 1);
        assert_eq!(
            RoomKey::new(&long),
            Err(KeyError::TooLong { max: ROOM_KEY_MAX })
        );
        assert!(RoomKey::new(&"x".repeat(ROOM_KEY_MAX)).is_ok());
    }
}
