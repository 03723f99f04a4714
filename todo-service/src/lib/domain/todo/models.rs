use std::fmt;

use crate::domain::todo::errors::DescriptionError;
use crate::domain::todo::errors::PriorityError;
use crate::domain::todo::errors::TitleError;
use crate::domain::user::models::UserId;

/// Todo entity, always owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: Title,
    pub description: Description,
    pub priority: Priority,
    pub complete: bool,
    pub owner_id: UserId,
}

/// Todo unique identifier type (database-assigned)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 255;

    pub fn new(title: String) -> Result<Self, TitleError> {
        let length = title.chars().count();
        if length < Self::MIN_LENGTH {
            Err(TitleError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(TitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 100;

    pub fn new(description: String) -> Result<Self, DescriptionError> {
        let length = description.chars().count();
        if (Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            Ok(Self(description))
        } else {
            Err(DescriptionError::InvalidLength {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
                actual: length,
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Priority from 1 (lowest) to 5 (highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority(i16);

impl Priority {
    const MIN: i16 = 1;
    const MAX: i16 = 5;

    pub fn new(priority: i64) -> Result<Self, PriorityError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&priority) {
            Ok(Self(priority as i16))
        } else {
            Err(PriorityError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: priority,
            })
        }
    }

    pub fn value(&self) -> i16 {
        self.0
    }
}

/// Todo fields to persist; the id is assigned by storage.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: Title,
    pub description: Description,
    pub priority: Priority,
    pub complete: bool,
    pub owner_id: UserId,
}

/// Validated todo content used for both create and full update.
///
/// Carries no owner: ownership always comes from the authenticated caller.
#[derive(Debug, Clone)]
pub struct TodoCommand {
    pub title: Title,
    pub description: Description,
    pub priority: Priority,
    pub complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_validation() {
        assert!(Title::new("Learn Axum".to_string()).is_ok());
        assert_eq!(
            Title::new("ab".to_string()),
            Err(TitleError::TooShort { min: 3, actual: 2 })
        );
    }

    #[test]
    fn test_description_validation() {
        assert!(Description::new("Need to learn everyday".to_string()).is_ok());
        assert!(Description::new("ab".to_string()).is_err());
        assert!(Description::new("x".repeat(101)).is_err());
        assert!(Description::new("x".repeat(100)).is_ok());
    }

    #[test]
    fn test_priority_range() {
        assert_eq!(Priority::new(1).unwrap().value(), 1);
        assert_eq!(Priority::new(5).unwrap().value(), 5);
        assert!(Priority::new(0).is_err());
        assert!(Priority::new(6).is_err());
        assert!(Priority::new(i64::from(i16::MAX) + 1).is_err());
    }
}
