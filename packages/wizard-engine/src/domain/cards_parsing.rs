//! Card token formatting and parsing.
//!
//! Tokens are the compact text form used in logs, serialized output and
//! test fixtures: `B5`, `R13`, `W`, `J`. A token names a face, not a
//! physical card, so parsing yields `(CardKind, rank)` pairs; resolving
//! them against real cards goes through [`crate::domain::dealing::find_card`].

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use super::cards_types::{
    Card, CardKind, JESTER_RANK, MAX_SUITED_RANK, MIN_SUITED_RANK, WIZARD_RANK,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CardTokenError {
    #[error("empty card token")]
    Empty,
    #[error("unknown kind in token `{0}`")]
    UnknownKind(String),
    #[error("unreadable rank in token `{0}`")]
    BadRank(String),
    #[error("rank {rank} out of range in token `{token}`")]
    RankOutOfRange { token: String, rank: u8 },
}

impl Display for CardKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            CardKind::Blue => "BLUE",
            CardKind::Red => "RED",
            CardKind::Green => "GREEN",
            CardKind::Yellow => "YELLOW",
            CardKind::Wizard => "WIZARD",
            CardKind::Jester => "JESTER",
        };
        f.write_str(name)
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.kind {
            CardKind::Wizard => f.write_str("W"),
            CardKind::Jester => f.write_str("J"),
            CardKind::Blue => write!(f, "B{}", self.rank),
            CardKind::Red => write!(f, "R{}", self.rank),
            CardKind::Green => write!(f, "G{}", self.rank),
            CardKind::Yellow => write!(f, "Y{}", self.rank),
        }
    }
}

/// Parse a single token into its face.
pub fn parse_card_token(token: &str) -> Result<(CardKind, u8), CardTokenError> {
    let mut chars = token.chars();
    let head = chars.next().ok_or(CardTokenError::Empty)?;
    let rest = chars.as_str();

    let kind = match head {
        'W' if rest.is_empty() => return Ok((CardKind::Wizard, WIZARD_RANK)),
        'J' if rest.is_empty() => return Ok((CardKind::Jester, JESTER_RANK)),
        'B' => CardKind::Blue,
        'R' => CardKind::Red,
        'G' => CardKind::Green,
        'Y' => CardKind::Yellow,
        _ => return Err(CardTokenError::UnknownKind(token.to_string())),
    };

    let rank: u8 = rest
        .parse()
        .map_err(|_| CardTokenError::BadRank(token.to_string()))?;
    if !(MIN_SUITED_RANK..=MAX_SUITED_RANK).contains(&rank) {
        return Err(CardTokenError::RankOutOfRange {
            token: token.to_string(),
            rank,
        });
    }
    Ok((kind, rank))
}

/// Parse a batch of tokens, failing on the first bad one.
pub fn try_parse_card_tokens<I>(tokens: I) -> Result<Vec<(CardKind, u8)>, CardTokenError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|t| parse_card_token(t.as_ref()))
        .collect()
}
