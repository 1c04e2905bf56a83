//! Materialized caches and the rules that generate them

use crate::board::{Cell, CellRef};
use crate::cache::token::{mint_all, Token};
use crate::luck::{coin_key, luck, spawn_key};
use serde::Serialize;
use std::fmt;

/// Identity of one materialization of a cache
///
/// A cache that is evicted and later recreated gets a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CacheId(pub u64);

impl fmt::Display for CacheId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A cache holding coins, bound to one cell while it is in view
#[derive(Debug)]
pub struct Geocache {
    id: CacheId,
    cell: CellRef,
    tokens: Vec<Token>,
}

impl Geocache {
    pub fn new(id: CacheId, cell: CellRef, tokens: Vec<Token>) -> Self {
        Self { id, cell, tokens }
    }

    pub fn id(&self) -> CacheId {
        self.id
    }

    /// Canonical cell handle
    pub fn cell_ref(&self) -> &CellRef {
        &self.cell
    }

    pub fn cell(&self) -> Cell {
        *self.cell
    }

    /// Coins in stack order (last is on top)
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Coin that a collect would take next
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

/// Procedural rules deciding where caches exist and what they start with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRules {
    /// Probability that a cell holds a cache
    pub spawn_probability: f64,
    /// Initial coin count is `floor(luck * coin_scale)`
    pub coin_scale: u32,
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self {
            spawn_probability: 0.1,
            coin_scale: 100,
        }
    }
}

impl SpawnRules {
    /// Whether `cell` holds a cache
    pub fn spawns(&self, cell: &Cell) -> bool {
        luck(&spawn_key(cell.i, cell.j)) < self.spawn_probability
    }

    /// Number of coins `cell` starts with
    pub fn initial_amount(&self, cell: &Cell) -> u32 {
        (luck(&coin_key(cell.i, cell.j)) * f64::from(self.coin_scale)).floor() as u32
    }

    /// The fresh, never-touched contents of `cell`
    pub fn fresh_tokens(&self, cell: &Cell) -> Vec<Token> {
        mint_all(cell, self.initial_amount(cell))
    }
}
