// models/src/identifiers.rs

use core::ops::Deref;
use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use internment::Intern;

use crate::errors::{ValidationError, ValidationResult};

/// A vertex identifier. Identifiers are short strings (255 bytes max) taken
/// verbatim from the `actor`/`target` fields of the input stream. They are
/// interned: the same actor shows up in event after event, so cloning an id
/// and comparing two of them should cost a pointer, not a string.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct VertexId(pub Intern<String>);

impl VertexId {
    /// Creates a new vertex identifier.
    ///
    /// # Arguments
    /// * `value`: The identifier value. The value must be between 1 and 255
    ///   bytes in length (inclusive).
    ///
    /// # Errors
    /// Returns a `ValidationError` if the `value` is not between 1 and 255
    /// bytes in length (inclusive).
    pub fn new(value: String) -> ValidationResult<Self> {
        if value.is_empty() || value.len() > u8::MAX as usize {
            return Err(ValidationError::InvalidIdentifierLength);
        }

        Ok(Self(Intern::new(value)))
    }
}

impl AsRef<str> for VertexId {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl Deref for VertexId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.deref()
    }
}

impl FromStr for VertexId {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        Self::new(s.to_string())
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<VertexId> for String {
    fn from(value: VertexId) -> Self {
        value.0.to_string()
    }
}

impl PartialOrd for VertexId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VertexId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}
