//! Coin transfers between a cache and the player, and conservation checks
//!
//! Coins only ever move: a transfer pops one coin from the source stack and
//! pushes it onto the destination. Nothing is minted or destroyed here.

use crate::cache::{Geocache, Token};
use crate::session::state::Inventory;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Which way a coin moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferDirection {
    /// Cache to inventory
    Collect,
    /// Inventory to cache
    Deposit,
}

impl fmt::Display for TransferDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collect => write!(f, "collect"),
            Self::Deposit => write!(f, "deposit"),
        }
    }
}

/// Result of a single transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// This coin changed hands
    Moved(Token),
    /// Nothing to move; no state changed
    SourceEmpty,
}

impl TransferOutcome {
    pub fn moved(&self) -> Option<&Token> {
        match self {
            Self::Moved(token) => Some(token),
            Self::SourceEmpty => None,
        }
    }
}

/// Move the top coin of the source onto the destination
pub fn transfer(
    cache: &mut Geocache,
    inventory: &mut Inventory,
    direction: TransferDirection,
) -> TransferOutcome {
    let token = match direction {
        TransferDirection::Collect => cache.pop(),
        TransferDirection::Deposit => inventory.pop(),
    };

    let Some(token) = token else {
        return TransferOutcome::SourceEmpty;
    };

    match direction {
        TransferDirection::Collect => inventory.push(token.clone()),
        TransferDirection::Deposit => cache.push(token.clone()),
    }
    TransferOutcome::Moved(token)
}

/// Count of every coin across a set of containers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenCensus {
    /// Coins seen, counting duplicates
    pub total: usize,
    /// Coins seen more than once
    pub duplicates: Vec<Token>,
}

impl TokenCensus {
    /// Count the coins in `containers`
    pub fn take<'a, I>(containers: I) -> Self
    where
        I: IntoIterator<Item = &'a [Token]>,
    {
        let mut seen = HashSet::new();
        let mut census = Self::default();

        for container in containers {
            for token in container {
                census.total += 1;
                if !seen.insert(token) {
                    census.duplicates.push(token.clone());
                }
            }
        }

        census
    }

    /// No coin lives in two places
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty()
    }
}
