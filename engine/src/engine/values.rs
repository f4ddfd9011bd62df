// engine/src/engine/values.rs
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize, Serializer};

use crate::engine::cell::Cell;
use crate::engine::grid::GridSpec;

/// A table entry: a number, or no value at all (obstacles).
///
/// Serialized untagged: `Defined(x)` as the number, `Undefined` as `null`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Defined(f64),
    Undefined,
}

impl CellValue {
    #[inline]
    pub fn as_f64(self) -> Option<f64> {
        match self {
            CellValue::Defined(v) => Some(v),
            CellValue::Undefined => None,
        }
    }

    /// Bootstrap rule: an undefined next-state contributes 0.0.
    #[inline]
    pub fn or_zero(self) -> f64 {
        self.as_f64().unwrap_or(0.0)
    }

    #[inline]
    pub fn is_undefined(self) -> bool {
        matches!(self, CellValue::Undefined)
    }
}

/// Square, row-major table of `CellValue`s.
///
/// Serialized as a list of rows.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueTable {
    size: usize,
    cells: Vec<CellValue>,
}

impl ValueTable {
    /// Initial snapshot: end pinned, obstacles undefined, everything else 0.0.
    pub fn initial(spec: &GridSpec, terminal_value: f64) -> Self {
        let mut t = Self {
            size: spec.size(),
            cells: vec![CellValue::Defined(0.0); spec.size() * spec.size()],
        };
        t.pin(spec, terminal_value);
        t
    }

    /// Re-apply the fixed entries (end and obstacles).
    pub fn pin(&mut self, spec: &GridSpec, terminal_value: f64) {
        for &cell in spec.obstacles() {
            self.set(cell, CellValue::Undefined);
        }
        self.set(spec.end(), CellValue::Defined(terminal_value));
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> CellValue {
        self.cells[cell.index(self.size)]
    }

    #[inline]
    pub fn value(&self, cell: Cell) -> Option<f64> {
        self.get(cell).as_f64()
    }

    #[inline]
    pub fn set(&mut self, cell: Cell, v: CellValue) {
        let i = cell.index(self.size);
        self.cells[i] = v;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.cells.chunks(self.size)
    }

    /// `(cell, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, CellValue)> + '_ {
        let n = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| (Cell::new(i / n, i % n), v))
    }

    /// Largest absolute change over cells defined in both tables.
    pub fn max_abs_diff(&self, other: &ValueTable) -> f64 {
        debug_assert_eq!(self.size, other.size);
        self.cells
            .iter()
            .zip(&other.cells)
            .filter_map(|(a, b)| Some((a.as_f64()? - b.as_f64()?).abs()))
            .fold(0.0, f64::max)
    }
}

impl Serialize for ValueTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}
