//! Coordinate grid
//!
//! Partitions the latitude/longitude plane into square cells of
//! `tile_width` degrees and enumerates the visibility window around a
//! position. Cells handed out by the board are canonical: the same `(i, j)`
//! always yields the same shared `CellRef`.

pub mod registry;

pub use registry::CellRegistry;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A position in the continuous plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Rectangle covered by a cell, south-west to north-east
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    /// Whether `point` lies inside the rectangle (south/west edges inclusive)
    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat < self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng < self.north_east.lng
    }
}

/// Integer grid coordinates of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub i: i32,
    pub j: i32,
}

/// Shared handle to a canonical cell
pub type CellRef = Arc<Cell>;

impl Cell {
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// Stable serialization used as the cache store key ("i,j")
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Offset by `(di, dj)` cells, or `None` past the edge of the grid
    pub fn offset(&self, di: i32, dj: i32) -> Option<Self> {
        Some(Self::new(self.i.checked_add(di)?, self.j.checked_add(dj)?))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.i, self.j)
    }
}

impl FromStr for Cell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (i, j) = s
            .split_once(',')
            .ok_or_else(|| format!("invalid cell key '{s}': expected 'i,j'"))?;
        let i = i
            .trim()
            .parse()
            .map_err(|e| format!("invalid cell key '{s}': {e}"))?;
        let j = j
            .trim()
            .parse()
            .map_err(|e| format!("invalid cell key '{s}': {e}"))?;
        Ok(Self::new(i, j))
    }
}

/// The grid: cell geometry plus the canonical registry
#[derive(Debug)]
pub struct Board {
    tile_width: f64,
    visibility_radius: i32,
    registry: CellRegistry,
}

impl Board {
    /// Create a board with an unbounded canonical registry
    pub fn new(tile_width: f64, visibility_radius: u32) -> Self {
        Self::with_retention(tile_width, visibility_radius, 0)
    }

    /// Create a board whose registry keeps cells seen in the last `retention` windows
    pub fn with_retention(tile_width: f64, visibility_radius: u32, retention: u64) -> Self {
        Self {
            tile_width,
            visibility_radius: i32::try_from(visibility_radius).unwrap_or(i32::MAX),
            registry: CellRegistry::with_retention(retention),
        }
    }

    pub fn tile_width(&self) -> f64 {
        self.tile_width
    }

    pub fn visibility_radius(&self) -> i32 {
        self.visibility_radius
    }

    /// Canonical registry (read-only view)
    pub fn registry(&self) -> &CellRegistry {
        &self.registry
    }

    /// Canonical handle for an arbitrary cell
    pub fn canonical(&mut self, cell: Cell) -> CellRef {
        self.registry.canonical(cell)
    }

    /// Grid coordinates of the cell containing `point`, without registering
    pub fn locate(&self, point: LatLng) -> Cell {
        // float -> int casts saturate, so this is total for any input
        Cell::new(
            (point.lat / self.tile_width).floor() as i32,
            (point.lng / self.tile_width).floor() as i32,
        )
    }

    /// Whether the whole window around `point` lies on the grid
    ///
    /// Past the edge, `locate` clamps and the window would wrap onto
    /// cells it already covers.
    pub fn window_fits(&self, point: LatLng) -> bool {
        let r = f64::from(self.visibility_radius);
        let fits = |coord: f64| {
            let index = (coord / self.tile_width).floor();
            index.is_finite()
                && index - r >= f64::from(i32::MIN)
                && index + r - 1.0 <= f64::from(i32::MAX)
        };
        fits(point.lat) && fits(point.lng)
    }

    /// Canonical cell containing `point`
    pub fn cell_for_point(&mut self, point: LatLng) -> CellRef {
        let cell = self.locate(point);
        self.registry.canonical(cell)
    }

    /// Rectangle covered by `cell`
    pub fn cell_bounds(&self, cell: &Cell) -> Bounds {
        let w = self.tile_width;
        Bounds {
            south_west: LatLng::new(f64::from(cell.i) * w, f64::from(cell.j) * w),
            north_east: LatLng::new(
                (f64::from(cell.i) + 1.0) * w,
                (f64::from(cell.j) + 1.0) * w,
            ),
        }
    }

    /// Canonical cells of the visibility window around `point`
    ///
    /// Covers `origin - r <= i < origin + r` (and likewise for `j`), row-major
    /// by `i` then `j`. That is exactly `(2r)^2` distinct cells whenever
    /// [`Board::window_fits`] holds; cells past the grid edge are left out.
    pub fn cells_near_point(&mut self, point: LatLng) -> Vec<CellRef> {
        self.registry.open_window();
        let origin = self.locate(point);
        let r = self.visibility_radius;

        let side = usize::try_from(r).unwrap_or(0) * 2;
        let mut cells = Vec::with_capacity(side * side);
        for di in -r..r {
            for dj in -r..r {
                if let Some(cell) = origin.offset(di, dj) {
                    cells.push(self.registry.canonical(cell));
                }
            }
        }

        self.registry.prune();
        cells
    }
}
