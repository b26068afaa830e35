//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, trimmed
//! non-empty strings) so that once a value reaches the domain layer it can be
//! treated as trusted.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i64` backing this identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ProjectId, "Unique identifier for a project.");
id_newtype!(RequirementId, "Unique identifier for a requirement.");
id_newtype!(TaskId, "Unique identifier for a task.");
id_newtype!(SprintId, "Unique identifier for a sprint within a timeline.");
id_newtype!(TimelineId, "Unique identifier for a project timeline.");
id_newtype!(UserId, "Unique identifier for a user account.");
id_newtype!(MemberId, "Unique identifier for a department member record.");
id_newtype!(DepartmentId, "Unique identifier for a department.");

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Macro to generate numeric-code enums matching the backend's state codes.
///
/// The backend stores workflow states as small integers; these enums
/// serialize as those codes and refuse unknown ones at the wire boundary.
macro_rules! code_enum {
    ($name:ident, $doc:expr, { $($variant:ident = $code:literal),+ $(,)? }) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(try_from = "i64", into = "i64")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Returns the backend's numeric code for this state.
            pub const fn code(self) -> i64 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }

        impl TryFrom<i64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                match value {
                    $($code => Ok(Self::$variant),)+
                    other => Err(TypeConstraintError::InvalidValue(format!(
                        "unknown {} code: {other}",
                        stringify!($name),
                    ))),
                }
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.code()
            }
        }
    };
}

code_enum!(ProjectStatus, "Lifecycle state of a project.", {
    Planning = 0,
    Active = 1,
    Paused = 2,
    Closed = 3,
});

code_enum!(RequirementStatus, "Workflow state of a requirement.", {
    Draft = 0,
    Submitted = 1,
    UnderReview = 2,
    Approved = 3,
    Rejected = 4,
});

code_enum!(Priority, "Requirement priority as graded by the submitter.", {
    Low = 0,
    Medium = 1,
    High = 2,
    Urgent = 3,
});

code_enum!(TaskStatus, "Execution state of a timeline task.", {
    Todo = 0,
    InProgress = 1,
    Done = 2,
    Blocked = 3,
});

code_enum!(Role, "Access role granted to a user account.", {
    Viewer = 0,
    Member = 1,
    Manager = 2,
    Admin = 3,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_newtype_rejects_non_positive() {
        assert!(ProjectId::new(1).is_ok());
        assert_eq!(ProjectId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ProjectId::new(-3), Err(TypeConstraintError::NonPositiveId));
    }

    #[test]
    fn non_empty_string_trims() {
        let s = NonEmptyString::new("  hello ").unwrap();
        assert_eq!(s.as_str(), "hello");
        assert_eq!(
            NonEmptyString::new("   "),
            Err(TypeConstraintError::EmptyString)
        );
    }

    #[test]
    fn status_codes_round_trip() {
        assert_eq!(
            RequirementStatus::try_from(2),
            Ok(RequirementStatus::UnderReview)
        );
        assert_eq!(RequirementStatus::Approved.code(), 3);
        assert!(RequirementStatus::try_from(99).is_err());
    }
}
