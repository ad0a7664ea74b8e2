//! Serde impls for card types.
//!
//! `CardKind` serializes to its SCREAMING_SNAKE name and reads back.
//! `Card` serializes to its compact token (`"B5"`, `"W"`) and deliberately
//! has no `Deserialize`: a token names a face, not an identity, and
//! identities only exist inside a live deck.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::cards_types::{Card, CardKind};

impl Serialize for CardKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CardKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "BLUE" => Ok(CardKind::Blue),
            "RED" => Ok(CardKind::Red),
            "GREEN" => Ok(CardKind::Green),
            "YELLOW" => Ok(CardKind::Yellow),
            "WIZARD" => Ok(CardKind::Wizard),
            "JESTER" => Ok(CardKind::Jester),
            other => Err(de::Error::custom(format!("unknown card kind: {other}"))),
        }
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
