//! Sweep strategies
//!
//! A [`SweepStrategy`] turns the swept parameters into value tuples; tuple
//! `i` holds one formatted value per parameter, in parameter order. Turning
//! tuples into code is left to the generator so every strategy shares the
//! same splicing path.

use crate::error::SweepError;
use crate::sampling::SampleSpec;
use multiples_params::{Parameter, RangeMap};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

/// How parameters beyond the second are combined with the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepMode {
    /// Extra parameters cycle through their samples in lock-step
    #[default]
    Cyclic,
    /// Every parameter is crossed with every other one
    CrossProduct,
}

impl SweepMode {
    /// Configuration name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cyclic => "cyclic",
            Self::CrossProduct => "cross_product",
        }
    }
}

impl Display for SweepMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SweepMode {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cyclic" => Ok(Self::Cyclic),
            "cross_product" | "cross-product" => Ok(Self::CrossProduct),
            other => Err(SweepError::UnknownMode(other.to_string())),
        }
    }
}

/// Produces the value tuples of a sweep
pub trait SweepStrategy: Send + Sync + Debug {
    /// Strategy name for logging
    fn name(&self) -> &'static str;

    /// Value tuples, one per variant, in presentation order
    ///
    /// `count` is the fallback sample count per axis; a parameter's range
    /// configuration may override it.
    ///
    /// # Errors
    /// Returns error if the sweep would exceed the strategy's cell limit
    fn value_tuples(
        &self,
        params: &[Parameter],
        ranges: &RangeMap,
        count: usize,
    ) -> Result<Vec<Vec<String>>, SweepError>;
}

fn axis(param: &Parameter, ranges: &RangeMap, count: usize) -> SampleSpec {
    SampleSpec::resolve(param.value(), count, ranges.get(&param.id()))
}

fn check_cells(cells: Option<usize>, max_cells: usize) -> Result<usize, SweepError> {
    match cells {
        Some(cells) if cells <= max_cells => Ok(cells),
        _ => Err(SweepError::TooManyCells {
            cells: cells.unwrap_or(usize::MAX),
            max: max_cells,
        }),
    }
}

/// Single parameter, `2 * count` samples in one run
#[derive(Debug, Clone, Copy)]
pub struct LinearSweep {
    max_cells: usize,
}

impl LinearSweep {
    /// Run limited to `max_cells` variants
    #[inline]
    #[must_use]
    pub fn new(max_cells: usize) -> Self {
        Self { max_cells }
    }
}

impl SweepStrategy for LinearSweep {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn value_tuples(
        &self,
        params: &[Parameter],
        ranges: &RangeMap,
        count: usize,
    ) -> Result<Vec<Vec<String>>, SweepError> {
        let Some(param) = params.first() else {
            return Ok(Vec::new());
        };
        let spec = axis(param, ranges, count.saturating_mul(2));
        check_cells(Some(spec.count), self.max_cells)?;
        Ok(spec.samples().into_iter().map(|value| vec![value]).collect())
    }
}

/// Two parameters crossed, parameter 0 on rows and parameter 1 on columns
#[derive(Debug, Clone, Copy)]
pub struct GridSweep {
    max_cells: usize,
}

impl GridSweep {
    /// Grid limited to `max_cells` variants
    #[inline]
    #[must_use]
    pub fn new(max_cells: usize) -> Self {
        Self { max_cells }
    }
}

impl SweepStrategy for GridSweep {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn value_tuples(
        &self,
        params: &[Parameter],
        ranges: &RangeMap,
        count: usize,
    ) -> Result<Vec<Vec<String>>, SweepError> {
        let [first, second, ..] = params else {
            return LinearSweep::new(self.max_cells).value_tuples(params, ranges, count);
        };
        let rows = axis(first, ranges, count);
        let cols = axis(second, ranges, count);
        check_cells(rows.count.checked_mul(cols.count), self.max_cells)?;
        Ok(cross(&rows.samples(), &cols.samples()))
    }
}

/// The grid of the first two parameters, every further parameter cycling
/// through its own samples in lock-step
///
/// Slot `i` of the grid receives sample `i % n` of an extra parameter with
/// `n` samples. The grid never grows past the first two axes, so extra
/// parameters are not crossed with anything and only their first grid-size
/// samples are ever formatted.
#[derive(Debug, Clone, Copy)]
pub struct CyclicSweep {
    max_cells: usize,
}

impl CyclicSweep {
    /// Cyclic sweep limited to `max_cells` variants
    #[inline]
    #[must_use]
    pub fn new(max_cells: usize) -> Self {
        Self { max_cells }
    }
}

impl SweepStrategy for CyclicSweep {
    fn name(&self) -> &'static str {
        "cyclic"
    }

    fn value_tuples(
        &self,
        params: &[Parameter],
        ranges: &RangeMap,
        count: usize,
    ) -> Result<Vec<Vec<String>>, SweepError> {
        let mut tuples = GridSweep::new(self.max_cells).value_tuples(params, ranges, count)?;
        for extra in params.iter().skip(2) {
            let values = axis(extra, ranges, count).first_samples(tuples.len());
            for (i, tuple) in tuples.iter_mut().enumerate() {
                tuple.push(values[i % values.len()].clone());
            }
        }
        Ok(tuples)
    }
}

/// True N-way product of every parameter's samples
///
/// Grows exponentially with the parameter count and is therefore bounded by
/// `max_cells`.
#[derive(Debug, Clone, Copy)]
pub struct CrossProductSweep {
    max_cells: usize,
}

impl CrossProductSweep {
    /// Product limited to `max_cells` variants
    #[inline]
    #[must_use]
    pub fn new(max_cells: usize) -> Self {
        Self { max_cells }
    }
}

impl SweepStrategy for CrossProductSweep {
    fn name(&self) -> &'static str {
        "cross_product"
    }

    fn value_tuples(
        &self,
        params: &[Parameter],
        ranges: &RangeMap,
        count: usize,
    ) -> Result<Vec<Vec<String>>, SweepError> {
        if params.len() < 2 {
            return LinearSweep::new(self.max_cells).value_tuples(params, ranges, count);
        }

        let specs: Vec<SampleSpec> = params.iter().map(|p| axis(p, ranges, count)).collect();
        let cells = specs
            .iter()
            .try_fold(1usize, |acc, spec| acc.checked_mul(spec.count));
        check_cells(cells, self.max_cells)?;

        let axes: Vec<Vec<String>> = specs.iter().map(SampleSpec::samples).collect();

        let mut tuples: Vec<Vec<String>> = vec![Vec::with_capacity(params.len())];
        for values in &axes {
            tuples = tuples
                .into_iter()
                .flat_map(|prefix| {
                    values.iter().map(move |value| {
                        let mut tuple = prefix.clone();
                        tuple.push(value.clone());
                        tuple
                    })
                })
                .collect();
        }
        Ok(tuples)
    }
}

// Row-major: the first axis is the outer loop.
fn cross(rows: &[String], cols: &[String]) -> Vec<Vec<String>> {
    rows.iter()
        .flat_map(|r| cols.iter().map(move |c| vec![r.clone(), c.clone()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiples_params::{NumberType, RangeConfig};
    use multiples_text::TextSpan;
    use pretty_assertions::assert_eq;

    fn params(values: &[&str]) -> Vec<Parameter> {
        let mut offset = 0;
        values
            .iter()
            .map(|v| {
                let p = Parameter::new(TextSpan::new(offset, offset + v.len()), *v);
                offset += v.len() + 2;
                p
            })
            .collect()
    }

    fn int_range(params: &[Parameter], index: usize, start: &str, end: &str, count: &str) -> RangeMap {
        let mut ranges = RangeMap::new();
        ranges.insert(
            params[index].id(),
            RangeConfig::new(start, end, count, NumberType::Int),
        );
        ranges
    }

    #[test]
    fn grid_is_row_major() {
        let ps = params(&["1", "2"]);
        let mut ranges = int_range(&ps, 0, "0", "1", "2");
        ranges.extend(int_range(&ps, 1, "10", "30", "3"));

        let tuples = GridSweep::new(100).value_tuples(&ps, &ranges, 4).unwrap();
        let flat: Vec<String> = tuples.iter().map(|t| t.join(",")).collect();
        assert_eq!(flat, vec!["0,10", "0,20", "0,30", "1,10", "1,20", "1,30"]);
    }

    #[test]
    fn cyclic_reuses_extra_samples() {
        let ps = params(&["1", "2", "3"]);
        let mut ranges = int_range(&ps, 0, "0", "1", "2");
        ranges.extend(int_range(&ps, 1, "0", "1", "2"));
        ranges.extend(int_range(&ps, 2, "7", "9", "3"));

        let tuples = CyclicSweep::new(100).value_tuples(&ps, &ranges, 2).unwrap();
        let extra: Vec<&str> = tuples.iter().map(|t| t[2].as_str()).collect();
        assert_eq!(tuples.len(), 4);
        assert_eq!(extra, vec!["7", "8", "9", "7"]);
    }

    #[test]
    fn cross_product_crosses_everything() {
        let ps = params(&["1", "2", "3"]);
        let mut ranges = int_range(&ps, 0, "0", "1", "2");
        ranges.extend(int_range(&ps, 1, "0", "1", "2"));
        ranges.extend(int_range(&ps, 2, "0", "1", "2"));

        let tuples = CrossProductSweep::new(100).value_tuples(&ps, &ranges, 2).unwrap();
        assert_eq!(tuples.len(), 8);
        assert_eq!(tuples[0], vec!["0", "0", "0"]);
        assert_eq!(tuples[1], vec!["0", "0", "1"]);
        assert_eq!(tuples[7], vec!["1", "1", "1"]);

        let err = CrossProductSweep::new(7).value_tuples(&ps, &ranges, 2).unwrap_err();
        assert!(matches!(err, SweepError::TooManyCells { cells: 8, max: 7 }));
    }

    #[test]
    fn linear_doubles_the_count() {
        let ps = params(&["10"]);
        let tuples = LinearSweep::new(100).value_tuples(&ps, &RangeMap::new(), 3).unwrap();
        assert_eq!(tuples.len(), 6);
        assert!(tuples.iter().all(|t| t.len() == 1));
    }

    #[test]
    fn linear_run_is_bounded_before_sampling() {
        let ps = params(&["10"]);
        let ranges = int_range(&ps, 0, "0", "1", "100000");
        let err = LinearSweep::new(50).value_tuples(&ps, &ranges, 4).unwrap_err();
        assert!(matches!(err, SweepError::TooManyCells { cells: 100_000, max: 50 }));

        let err = LinearSweep::new(5).value_tuples(&ps, &RangeMap::new(), 3).unwrap_err();
        assert!(matches!(err, SweepError::TooManyCells { cells: 6, max: 5 }));
    }

    #[test]
    fn cyclic_extra_axis_only_fills_the_grid() {
        let ps = params(&["1", "2", "3"]);
        let mut ranges = int_range(&ps, 0, "0", "1", "2");
        ranges.extend(int_range(&ps, 1, "0", "1", "2"));
        ranges.extend(int_range(&ps, 2, "0", "999999", "1000000"));

        let tuples = CyclicSweep::new(10).value_tuples(&ps, &ranges, 2).unwrap();
        let extra: Vec<&str> = tuples.iter().map(|t| t[2].as_str()).collect();
        assert_eq!(extra, vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn mode_parses_config_names() {
        assert_eq!("cyclic".parse::<SweepMode>().unwrap(), SweepMode::Cyclic);
        assert_eq!("cross_product".parse::<SweepMode>().unwrap(), SweepMode::CrossProduct);
        assert!("spiral".parse::<SweepMode>().is_err());
    }
}
