//! Grid layout of generated variants

use multiples_params::{Parameter, RangeMap};

/// Column count when fewer than two parameters are swept
pub const DEFAULT_COLUMNS: usize = 4;

/// Columns of the variant grid
///
/// With two or more parameters this is the sample count configured for
/// parameter 1, so each row shows one value of parameter 0. Otherwise, or
/// when that count does not parse, it is `default`.
#[must_use]
pub fn column_count(params: &[Parameter], ranges: &RangeMap, default: usize) -> usize {
    let default = default.max(1);
    if params.len() < 2 {
        return default;
    }
    ranges
        .get(&params[1].id())
        .and_then(|range| range.sample_count())
        .unwrap_or(default)
}

/// Fixed-width row layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    columns: usize,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS)
    }
}

impl GridLayout {
    /// Layout with `columns` cells per row (at least one)
    #[inline]
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
        }
    }

    /// Layout for the given parameters
    #[inline]
    #[must_use]
    pub fn for_params(params: &[Parameter], ranges: &RangeMap, default: usize) -> Self {
        Self::new(column_count(params, ranges, default))
    }

    /// Cells per row
    #[inline]
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows needed for `cells` cells
    #[inline]
    #[must_use]
    pub fn row_count(&self, cells: usize) -> usize {
        cells.div_ceil(self.columns)
    }

    /// Split `items` into rows; the last row may be shorter
    pub fn rows<'a, T>(&self, items: &'a [T]) -> impl Iterator<Item = &'a [T]> + 'a {
        items.chunks(self.columns)
    }
}
