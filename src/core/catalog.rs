//! Shape catalog - piece definitions with precomputed rotations.
//!
//! Shapes are loaded once at startup from a static JSON table (embedded in
//! the crate), parsed as plain structured data and validated before the
//! simulation is allowed to run. Each entry carries exactly 4 rotation
//! variants; a variant is a small row-major matrix of cell values where 0
//! is empty and a nonzero value is the shape's tag.

use std::fmt;

use serde::Deserialize;

use crate::core::rng::SimpleRng;
use crate::types::{Cell, EMPTY};

/// One rotation variant: a row-major matrix of cell values
pub type RotationMatrix = Vec<Vec<Cell>>;

/// Embedded default shape table (7 entries)
const BUILTIN_SHAPES: &str = include_str!("../../data/shapes.json");

/// Malformed catalog data. Fatal at startup; the simulation must not run
/// with a bad shape table.
#[derive(Debug)]
pub enum CatalogError {
    /// The table failed to parse as JSON
    Parse(serde_json::Error),
    /// The table contains no entries
    Empty,
    /// An entry does not have exactly 4 rotation variants
    VariantCount { shape: usize, found: usize },
    /// An entry's variants are empty, ragged, or of inconsistent size
    MatrixShape { shape: usize },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse(err) => write!(f, "shape table is not valid JSON: {err}"),
            CatalogError::Empty => write!(f, "shape table has no entries"),
            CatalogError::VariantCount { shape, found } => {
                write!(f, "shape {shape} has {found} rotation variants, expected 4")
            }
            CatalogError::MatrixShape { shape } => {
                write!(f, "shape {shape} has empty, ragged, or inconsistent rotation matrices")
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err)
    }
}

/// Raw catalog entry as it appears in the JSON table
#[derive(Debug, Deserialize)]
struct RawShape {
    name: String,
    rotations: Vec<RotationMatrix>,
}

/// An immutable catalog entry: a named shape with its 4 rotation variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapePattern {
    name: String,
    variants: [RotationMatrix; 4],
}

impl ShapePattern {
    /// Build a pattern from explicit variants, validating the same
    /// constraints the catalog loader enforces.
    pub fn new(name: impl Into<String>, variants: Vec<RotationMatrix>) -> Result<Self, CatalogError> {
        Self::validated(name.into(), variants, 0)
    }

    fn validated(
        name: String,
        variants: Vec<RotationMatrix>,
        shape: usize,
    ) -> Result<Self, CatalogError> {
        let variants: [RotationMatrix; 4] = variants
            .try_into()
            .map_err(|v: Vec<RotationMatrix>| CatalogError::VariantCount {
                shape,
                found: v.len(),
            })?;

        let rows = variants[0].len();
        let cols = variants[0].first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(CatalogError::MatrixShape { shape });
        }
        for matrix in &variants {
            if matrix.len() != rows || matrix.iter().any(|row| row.len() != cols) {
                return Err(CatalogError::MatrixShape { shape });
            }
        }

        Ok(Self { name, variants })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The matrix for a rotation index; indices wrap modulo 4
    pub fn variant(&self, rotation: usize) -> &RotationMatrix {
        &self.variants[rotation % 4]
    }

    /// Iterate the nonzero cells of one variant as (dx, dy, value)
    pub fn cells(&self, rotation: usize) -> impl Iterator<Item = (i8, i8, Cell)> + '_ {
        self.variant(rotation).iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &val)| val != EMPTY)
                .map(move |(dx, &val)| (dx as i8, dy as i8, val))
        })
    }
}

/// The loaded, validated shape table
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    shapes: Vec<ShapePattern>,
}

impl ShapeCatalog {
    /// Load the embedded default table
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_SHAPES)
    }

    /// Parse and validate a shape table from JSON text
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawShape> = serde_json::from_str(text)?;
        if raw.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut shapes = Vec::with_capacity(raw.len());
        for (index, entry) in raw.into_iter().enumerate() {
            shapes.push(ShapePattern::validated(entry.name, entry.rotations, index)?);
        }
        Ok(Self { shapes })
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ShapePattern> {
        self.shapes.get(index)
    }

    /// Pick an entry uniformly at random
    pub fn choose(&self, rng: &mut SimpleRng) -> &ShapePattern {
        &self.shapes[rng.next_range(self.shapes.len() as u32) as usize]
    }
}
