//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Room name value object.
///
/// Rooms are identified by a unique, case-sensitive name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomName(String);

impl RoomName {
    /// Create a new RoomName.
    ///
    /// # Arguments
    ///
    /// * `name` - The room name string
    ///
    /// # Returns
    ///
    /// A Result containing the RoomName or an error if validation fails
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::RoomNameEmpty);
        }
        let len = name.len();
        if len > 100 {
            return Err(ValueObjectError::RoomNameTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomName {
    type Error = ValueObjectError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Username value object.
///
/// The relay performs no credential validation; the username is handed in
/// by the outer authentication surface and treated as an opaque identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Create a new Username.
    ///
    /// # Arguments
    ///
    /// * `name` - The username string
    ///
    /// # Returns
    ///
    /// A Result containing the Username or an error if validation fails
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::UsernameEmpty);
        }
        let len = name.len();
        if len > 100 {
            return Err(ValueObjectError::UsernameTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValueObjectError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message text value object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageText(String);

impl MessageText {
    /// Create a new MessageText.
    ///
    /// # Arguments
    ///
    /// * `text` - The message text string
    ///
    /// # Returns
    ///
    /// A Result containing the MessageText or an error if validation fails
    pub fn new(text: String) -> Result<Self, ValueObjectError> {
        if text.is_empty() {
            return Err(ValueObjectError::MessageTextEmpty);
        }
        let len = text.len();
        if len > 10000 {
            return Err(ValueObjectError::MessageTextTooLong {
                max: 10000,
                actual: len,
            });
        }
        Ok(Self(text))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageText {
    type Error = ValueObjectError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_name_new_success() {
        // given:
        let name = "General".to_string();

        // when:
        let result = RoomName::new(name);

        // then:
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "General");
    }

    #[test]
    fn test_room_name_new_empty_fails() {
        // given:
        let name = "".to_string();

        // when:
        let result = RoomName::new(name);

        // then:
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), ValueObjectError::RoomNameEmpty);
    }

    #[test]
    fn test_room_name_new_too_long_fails() {
        // given:
        let name = "a".repeat(101);

        // when:
        let result = RoomName::new(name);

        // then:
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::RoomNameTooLong {
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn test_room_name_case_sensitive_equality() {
        // given:
        let general = RoomName::new("General".to_string()).unwrap();
        let lower = RoomName::new("general".to_string()).unwrap();
        let same = RoomName::new("General".to_string()).unwrap();

        // then:
        assert_eq!(general, same);
        assert_ne!(general, lower);
    }

    #[test]
    fn test_username_new_success() {
        // given:
        let name = "alice".to_string();

        // when:
        let result = Username::new(name);

        // then:
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_username_new_empty_fails() {
        // when:
        let result = Username::new("".to_string());

        // then:
        assert_eq!(result.unwrap_err(), ValueObjectError::UsernameEmpty);
    }

    #[test]
    fn test_message_text_new_success() {
        // when:
        let result = MessageText::new("Hello, world!".to_string());

        // then:
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "Hello, world!");
    }

    #[test]
    fn test_message_text_new_empty_fails() {
        // when:
        let result = MessageText::new("".to_string());

        // then:
        assert_eq!(result.unwrap_err(), ValueObjectError::MessageTextEmpty);
    }

    #[test]
    fn test_message_text_new_too_long_fails() {
        // given:
        let text = "a".repeat(10001);

        // when:
        let result = MessageText::new(text);

        // then:
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::MessageTextTooLong {
                max: 10000,
                actual: 10001
            }
        );
    }
}
