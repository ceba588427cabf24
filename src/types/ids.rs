use super::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Describes one kind of TestRail entity identifier.
pub trait IdKind {
    /// Entity name used in error messages.
    const NAME: &'static str;
    /// Letter TestRail prints in front of the number in its UI (`R12`, `C7`).
    const PREFIX: char;
}

/// Strong typing for IDs with phantom types
pub struct Id<T> {
    value: u64,
    _phantom: PhantomData<T>,
}

macro_rules! id_kind {
    ($marker:ident, $alias:ident, $name:literal, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $marker;

        impl IdKind for $marker {
            const NAME: &'static str = $name;
            const PREFIX: char = $prefix;
        }

        pub type $alias = Id<$marker>;
    };
}

id_kind!(ProjectMarker, ProjectId, "project", 'P');
id_kind!(SuiteMarker, SuiteId, "suite", 'S');
id_kind!(RunMarker, RunId, "run", 'R');
id_kind!(PlanMarker, PlanId, "plan", 'R');
id_kind!(CaseMarker, CaseId, "case", 'C');
id_kind!(TestMarker, TestId, "test", 'T');
id_kind!(MilestoneMarker, MilestoneId, "milestone", 'M');

impl<T: IdKind> Id<T> {
    /// Creates an ID from a raw positive number.
    pub fn new(value: u64) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::InvalidId {
                kind: T::NAME,
                input: value.to_string(),
            });
        }
        Ok(Self::from_raw(value))
    }

    /// Parses `"12"` or the prefixed display form `"R12"`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        lazy_static::lazy_static! {
            static ref ID_REGEX: Regex = Regex::new(r"^([A-Za-z]?)(\d+)$")
                .expect("Failed to compile TestRail ID regex - this is a bug in the code");
        }

        let invalid = || ValidationError::InvalidId {
            kind: T::NAME,
            input: input.to_string(),
        };

        let captures = ID_REGEX.captures(input.trim()).ok_or_else(invalid)?;
        let prefix = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        if !prefix.is_empty() && !prefix.eq_ignore_ascii_case(&T::PREFIX.to_string()) {
            return Err(invalid());
        }

        let value = captures[2].parse::<u64>().map_err(|_| invalid())?;
        Self::new(value).map_err(|_| invalid())
    }
}

impl<T> Id<T> {
    fn from_raw(value: u64) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    /// Returns the numeric value sent to the API.
    pub fn value(&self) -> u64 {
        self.value
    }
}

// Manual impls so the marker type needs no bounds.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: IdKind> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::PREFIX, self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T: IdKind> TryFrom<u64> for Id<T> {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T: IdKind> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
