use serde::{Deserialize, Serialize};

use super::board::Mark;
use crate::error::SetupError;

/// Which of the two players a turn belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    /// Get the other seat
    pub fn other(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Player {
    name: String,
    mark: Mark,
}

impl Player {
    /// Create a player, rejecting blank names and names that are just a number.
    pub fn new(name: impl Into<String>, mark: Mark) -> Result<Self, SetupError> {
        let name = name.into();
        let trimmed = name.trim();
        if !is_valid_name(trimmed) {
            return Err(SetupError::InvalidName(name));
        }
        Ok(Player {
            name: trimmed.to_string(),
            mark,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }
}

/// A name must have visible characters and must not read as a nonzero integer.
pub fn is_valid_name(name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() {
        return false;
    }
    !matches!(leading_integer(name), Some(n) if n != 0)
}

/// Integer formed by an optional sign and the leading digits, if any.
fn leading_integer(s: &str) -> Option<i64> {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    // Overflowing digit strings are still numbers
    Some(digits.parse::<i64>().map(|n| sign * n).unwrap_or(sign * i64::MAX))
}
