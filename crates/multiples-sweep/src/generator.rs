//! Variant generation
//!
//! [`generate`] picks a [`SweepStrategy`] by parameter count and sweep mode,
//! then splices every value tuple into the base code.

use crate::error::SweepError;
use crate::layout::DEFAULT_COLUMNS;
use crate::strategy::{
    CrossProductSweep, CyclicSweep, GridSweep, LinearSweep, SweepMode, SweepStrategy,
};
use multiples_params::{ParamError, Parameter, RangeMap};
use multiples_text::{splice, Change};
use serde::{Deserialize, Serialize};

/// Default upper bound on generated variants
pub const DEFAULT_MAX_CELLS: usize = 4096;

/// One generated program
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    /// Base code with every value spliced in
    pub code: String,
    /// Spliced values, one per parameter in parameter order
    pub values: Vec<String>,
}

/// Sweep generation options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SweepOptions {
    /// Fallback samples per axis (the grid column count)
    pub count: usize,
    /// How parameters beyond the second are combined
    pub mode: SweepMode,
    /// Upper bound on generated variants
    pub max_cells: usize,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            count: DEFAULT_COLUMNS,
            mode: SweepMode::default(),
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl SweepOptions {
    /// Set the fallback sample count
    #[inline]
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the sweep mode
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: SweepMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the variant limit
    #[inline]
    #[must_use]
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// Strategy used for `param_count` parameters
    #[must_use]
    pub fn strategy(&self, param_count: usize) -> Box<dyn SweepStrategy> {
        match (param_count, self.mode) {
            (0 | 1, _) => Box::new(LinearSweep::new(self.max_cells)),
            (2, _) => Box::new(GridSweep::new(self.max_cells)),
            (_, SweepMode::Cyclic) => Box::new(CyclicSweep::new(self.max_cells)),
            (_, SweepMode::CrossProduct) => Box::new(CrossProductSweep::new(self.max_cells)),
        }
    }
}

/// Generate every variant of `code`
///
/// Returns an empty list when nothing is swept.
///
/// # Errors
/// Returns error if a parameter span cannot be spliced into `code` or the
/// sweep exceeds `options.max_cells`
pub fn generate(
    code: &str,
    params: &[Parameter],
    ranges: &RangeMap,
    options: &SweepOptions,
) -> Result<Vec<Variant>, SweepError> {
    if params.is_empty() {
        return Ok(Vec::new());
    }

    let strategy = options.strategy(params.len());
    let tuples = strategy.value_tuples(params, ranges, options.count.max(1))?;
    let variants = tuples
        .into_iter()
        .map(|values| {
            let code = apply_values(code, params, values.as_slice())?;
            Ok(Variant { code, values })
        })
        .collect::<Result<Vec<_>, SweepError>>()?;

    tracing::debug!(
        strategy = strategy.name(),
        params = params.len(),
        variants = variants.len(),
        "generated sweep"
    );
    Ok(variants)
}

/// Sweep a single parameter over `2 * count` samples
///
/// # Errors
/// Returns error if the span cannot be spliced into `code`
pub fn generate_1d(
    code: &str,
    param: &Parameter,
    ranges: &RangeMap,
    count: usize,
) -> Result<Vec<Variant>, SweepError> {
    generate(
        code,
        std::slice::from_ref(param),
        ranges,
        &SweepOptions::default().with_count(count),
    )
}

/// Cross the first two parameters
///
/// # Errors
/// Returns error if fewer than two parameters are given or a span cannot
/// be spliced into `code`
pub fn generate_2d(
    code: &str,
    params: &[Parameter],
    ranges: &RangeMap,
    count: usize,
) -> Result<Vec<Variant>, SweepError> {
    let pair = params.get(..2).ok_or(ParamError::ValueCountMismatch {
        expected: 2,
        actual: params.len(),
    })?;
    generate(code, pair, ranges, &SweepOptions::default().with_count(count))
}

/// Grid of the first two parameters with the rest cycling in lock-step
///
/// # Errors
/// Returns error if a span cannot be spliced into `code`
pub fn generate_xd(
    code: &str,
    params: &[Parameter],
    ranges: &RangeMap,
    count: usize,
) -> Result<Vec<Variant>, SweepError> {
    let options = SweepOptions::default()
        .with_count(count)
        .with_mode(SweepMode::Cyclic);
    generate(code, params, ranges, &options)
}

/// Splice `values` into `code` at the parameters' spans
///
/// `values[i]` replaces the literal of `params[i]`.
///
/// # Errors
/// Returns error if the value count differs from the parameter count or
/// the spans are not valid, non-overlapping ranges of `code`
pub fn apply_values<S: AsRef<str>>(
    code: &str,
    params: &[Parameter],
    values: &[S],
) -> Result<String, SweepError> {
    if values.len() != params.len() {
        return Err(ParamError::ValueCountMismatch {
            expected: params.len(),
            actual: values.len(),
        }
        .into());
    }

    let substitutions: Vec<Change> = params
        .iter()
        .zip(values)
        .map(|(param, value)| Change::replace(param.span(), value.as_ref()))
        .collect();
    Ok(splice(code, &substitutions)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiples_params::{NumberType, RangeConfig};
    use multiples_text::{NumberLiterals, TextSpan};
    use pretty_assertions::assert_eq;

    fn literals(code: &str) -> Vec<Parameter> {
        NumberLiterals::new(code).map(|m| Parameter::from_match(&m)).collect()
    }

    #[test]
    fn no_params_no_variants() {
        let out = generate("x = 1;", &[], &RangeMap::new(), &SweepOptions::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn one_param_gives_twice_count_variants() {
        let code = "circle(0,0,50);";
        let radius = Parameter::locate(code, TextSpan::new(11, 13)).unwrap();

        let out = generate_1d(code, &radius, &RangeMap::new(), 4).unwrap();
        let codes: Vec<&str> = out.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(
            codes,
            vec![
                "circle(0,0,25.00);",
                "circle(0,0,35.71);",
                "circle(0,0,46.43);",
                "circle(0,0,57.14);",
                "circle(0,0,67.86);",
                "circle(0,0,78.57);",
                "circle(0,0,89.29);",
                "circle(0,0,100.00);",
            ]
        );
        assert_eq!(out[0].values, vec!["25.00"]);
    }

    #[test]
    fn two_params_give_count_squared_variants() {
        let code = "rect(10, 20);";
        let params = literals(code);
        let out = generate_2d(code, &params, &RangeMap::new(), 4).unwrap();

        assert_eq!(out.len(), 16);
        assert_eq!(out[0].code, "rect(5.00, 10.00);");
        assert_eq!(out[1].code, "rect(5.00, 20.00);");
        assert_eq!(out[4].code, "rect(10.00, 10.00);");
        assert_eq!(out[15].code, "rect(20.00, 40.00);");
    }

    #[test]
    fn replacements_of_different_length_do_not_corrupt_later_spans() {
        let code = "f(1, 2, 3)";
        let params = literals(code);
        let out = apply_values(code, &params, &["100", "2000", "30000"]).unwrap();
        assert_eq!(out, "f(100, 2000, 30000)");
    }

    #[test]
    fn xd_cycles_extra_parameters() {
        let code = "f(1, 2, 3, 4)";
        let params = literals(code);
        let mut ranges = RangeMap::new();
        for p in &params {
            ranges.insert(p.id(), RangeConfig::new("0", "3", "4", NumberType::Int));
        }
        let out = generate_xd(code, &params, &ranges, 4).unwrap();

        assert_eq!(out.len(), 16);
        for (i, variant) in out.iter().enumerate() {
            let cycled = (i % 4).to_string();
            assert_eq!(variant.values[2], cycled);
            assert_eq!(variant.values[3], cycled);
        }
    }

    #[test]
    fn value_count_must_match() {
        let code = "f(1, 2)";
        let err = apply_values(code, &literals(code), &["9"]).unwrap_err();
        assert_eq!(
            err,
            SweepError::Params(ParamError::ValueCountMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn stale_spans_are_rejected() {
        let params = literals("f(1, 2)");
        let err = apply_values("f(1)", &params, &["3", "4"]).unwrap_err();
        assert!(matches!(err, SweepError::Splice(_)));
    }

    #[test]
    fn cell_limit_applies_to_every_mode() {
        let code = "f(1, 2)";
        let options = SweepOptions::default().with_count(10).with_max_cells(50);
        let err = generate(code, &literals(code), &RangeMap::new(), &options).unwrap_err();
        assert_eq!(err, SweepError::TooManyCells { cells: 100, max: 50 });
    }

    #[test]
    fn cell_limit_applies_to_a_single_parameter() {
        let code = "circle(0,0,50);";
        let radius = literals(code).remove(2);
        let mut ranges = RangeMap::new();
        ranges.insert(
            radius.id(),
            RangeConfig::new("0", "1", "100000", NumberType::Float),
        );

        let options = SweepOptions::default().with_max_cells(50);
        let err = generate(code, std::slice::from_ref(&radius), &ranges, &options).unwrap_err();
        assert_eq!(err, SweepError::TooManyCells { cells: 100_000, max: 50 });
    }
}
