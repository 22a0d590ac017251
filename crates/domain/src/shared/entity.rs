use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

pub trait Entity<T: PartialEq> {
    fn id(&self) -> T;
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// Identifier of an order, a product or a customer in the store.
///
/// The store hands out plain integer identifiers, so this is a thin
/// wrapper that keeps them from being mixed up with timestamps and counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ID(i64);

impl ID {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }

    pub fn inner(self) -> i64 {
        self.0
    }

    pub fn inner_ref(&self) -> &i64 {
        &self.0
    }
}

impl From<i64> for ID {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for ID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug)]
pub enum InvalidIDError {
    #[error("ID: {0} is malformed")]
    Malformed(String),
}

impl FromStr for ID {
    type Err = InvalidIDError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| InvalidIDError::Malformed(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_ids() {
        assert_eq!("100".parse::<ID>().unwrap(), ID::new(100));
        assert_eq!(" 7 ".parse::<ID>().unwrap(), ID::new(7));
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!("".parse::<ID>().is_err());
        assert!("abc".parse::<ID>().is_err());
        assert!("1.5".parse::<ID>().is_err());
    }

    #[test]
    fn serializes_as_plain_number() {
        let id = ID::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let id: ID = serde_json::from_str("43").unwrap();
        assert_eq!(id.inner(), 43);
    }
}
