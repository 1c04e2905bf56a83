//! Collectible coin tokens
//!
//! A token is identified by the cell that minted it and its 1-based serial
//! within that cell, written `i:j#n`.

use crate::board::Cell;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque coin identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Mint the token with `serial` for `cell`
    pub fn mint(cell: &Cell, serial: u32) -> Self {
        Self(format!("{}:{}#{}", cell.i, cell.j, serial))
    }

    /// Wrap an existing identifier
    pub fn from_id(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Origin cell and serial, if the identifier is well formed
    pub fn origin(&self) -> Option<(Cell, u32)> {
        let (coords, serial) = self.0.split_once('#')?;
        let (i, j) = coords.split_once(':')?;
        Some((
            Cell::new(i.parse().ok()?, j.parse().ok()?),
            serial.parse().ok()?,
        ))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// All tokens minted for a cell holding `amount` coins
pub fn mint_all(cell: &Cell, amount: u32) -> Vec<Token> {
    (1..=amount).map(|n| Token::mint(cell, n)).collect()
}
