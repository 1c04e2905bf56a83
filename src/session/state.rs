//! Player state persistence

use crate::board::LatLng;
use crate::cache::Token;
use crate::error::{GeocoinError, GeocoinResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coins carried by the player, in pickup order (last is on top)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    tokens: Vec<Token>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Coin that a deposit would give away next
    pub fn top(&self) -> Option<&Token> {
        self.tokens.last()
    }

    pub(crate) fn pop(&mut self) -> Option<Token> {
        self.tokens.pop()
    }

    pub(crate) fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }
}

impl FromIterator<Token> for Inventory {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

/// One point of the movement trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub position: LatLng,
    pub at: DateTime<Utc>,
}

/// Persisted player record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Current position
    pub position: LatLng,

    /// Carried coins
    #[serde(default)]
    pub inventory: Inventory,

    /// Positions visited, oldest first (starts with the spawn point)
    #[serde(default)]
    pub history: Vec<TrailPoint>,

    /// When the player record was last changed
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl PlayerState {
    /// A fresh player standing at `start`
    pub fn new(start: LatLng) -> Self {
        let now = Utc::now();
        Self {
            position: start,
            inventory: Inventory::new(),
            history: vec![TrailPoint {
                position: start,
                at: now,
            }],
            updated_at: now,
        }
    }

    /// Move to `position`, extending the trail if the position changed
    ///
    /// The trail keeps at most `limit` points, dropping the oldest first.
    pub fn relocate(&mut self, position: LatLng, limit: usize) -> bool {
        if position == self.position {
            return false;
        }

        let now = Utc::now();
        self.position = position;
        self.history.push(TrailPoint { position, at: now });
        let excess = self.history.len().saturating_sub(limit.max(1));
        self.history.drain(..excess);
        self.updated_at = now;
        true
    }

    /// Mark the record as changed
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Serialize for durable storage
    pub fn to_json(&self) -> GeocoinResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored player record
    pub fn from_json(content: &str) -> GeocoinResult<Self> {
        let state: Self = serde_json::from_str(content)
            .map_err(|e| GeocoinError::malformed("player state", e.to_string()))?;
        if !state.position.is_finite() {
            return Err(GeocoinError::malformed(
                "player state",
                "position is not finite",
            ));
        }
        Ok(state)
    }
}
