use super::config::BinSpec;
use super::error::EngineError;

/// Generates `steps` evenly spaced values from `start` to `end`, endpoints
/// included.
///
/// The final value is pinned to `end` exactly rather than left to
/// accumulated rounding, so threshold comparisons at the ladder's edge
/// behave the same however many steps were requested. Zero steps yield an
/// empty sequence and one step yields `[start]`.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (steps - 1) as f64;
            let mut values: Vec<f64> = (0..steps).map(|i| start + step * i as f64).collect();
            values[steps - 1] = end;
            values
        }
    }
}

/// Builds the descending threshold ladder from a bin specification.
///
/// The ladder is `[+inf, start, linspace(start, end, steps)...]`: the
/// infinite sentinel makes the first bin capture every atom above the
/// finite range, and the repeated `start` makes the first generated bin
/// the baseline bin `(start, +inf]`. Consecutive pairs `(ladder[i],
/// ladder[i-1]]` are the half-open bins the binner tallies, so the ladder
/// must never increase.
///
/// # Errors
///
/// Returns [`EngineError::Configuration`] when `start` or `end` is not
/// finite, or when `end` exceeds `start` (an ascending ladder).
pub fn build_thresholds(spec: &BinSpec) -> Result<Vec<f64>, EngineError> {
    if !spec.start.is_finite() || !spec.end.is_finite() {
        return Err(EngineError::Configuration(format!(
            "phi bin bounds must be finite (start: {}, end: {})",
            spec.start, spec.end
        )));
    }
    if spec.end > spec.start {
        return Err(EngineError::Configuration(format!(
            "phi bins must descend from start to end (start: {}, end: {})",
            spec.start, spec.end
        )));
    }

    let mut thresholds = vec![f64::INFINITY, spec.start];
    thresholds.extend(linspace(spec.start, spec.end, spec.steps));
    Ok(thresholds)
}
