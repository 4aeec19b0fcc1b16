//! FILENAME: core/engine/src/function.rs
//! PURPOSE: Numeric analysis of a compiled single-variable function.
//! CONTEXT: A `CompiledFunction` wraps a postfix program from the parser crate.
//! Every numeric result here is an `Option<f64>`: `None` is the "undefined"
//! marker for a point where the function is not finite. A single undefined
//! sample never aborts a batch; grids keep the gap, integrals skip it.
//!
//! OPERATIONS:
//! - sample:       n equally spaced points over [lo, hi], both ends included
//! - derivative:   central difference (f(x0+h) - f(x0-h)) / 2h
//! - integral:     composite trapezoid, gaps contribute nothing
//! - range:        finite min/max with default and padding fallbacks
//! - tangent:      f(x0) + f'(x0)(x - x0) over the grid

use crate::config::NumericConfig;
use crate::error::{EngineError, EngineResult};
use crate::evaluator::eval_math;
use parser::{compile_function, MathProgram};
use serde::{Deserialize, Serialize};

/// Smallest grid that still includes both endpoints.
pub const MIN_POINTS: usize = 2;

// ============================================================================
// COMPILED FUNCTION
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFunction {
    program: MathProgram,
}

impl CompiledFunction {
    pub fn compile(expression: &str) -> EngineResult<Self> {
        Ok(CompiledFunction {
            program: compile_function(expression)?,
        })
    }

    pub fn source(&self) -> &str {
        self.program.source()
    }

    pub fn program(&self) -> &MathProgram {
        &self.program
    }

    /// Value at `x`, or `None` when the result is not finite.
    pub fn evaluate(&self, x: f64) -> Option<f64> {
        let y = eval_math(&self.program, x);
        y.is_finite().then_some(y)
    }

    /// Samples the function over `[lo, hi]` with `n` points.
    pub fn sample(&self, lo: f64, hi: f64, n: usize, config: &NumericConfig) -> EngineResult<SampledFunction> {
        require_finite("x_min", lo)?;
        require_finite("x_max", hi)?;
        if lo >= hi {
            return Err(EngineError::InvalidDomain { lo, hi });
        }
        if n < MIN_POINTS || n > config.max_points {
            return Err(EngineError::InvalidPointCount {
                requested: n,
                min: MIN_POINTS,
                max: config.max_points,
            });
        }

        let xs = linspace(lo, hi, n);
        let ys: Vec<Option<f64>> = xs.iter().map(|&x| self.evaluate(x)).collect();

        log::trace!(
            "sampled {:?} at {} points, {} undefined",
            self.source(),
            n,
            ys.iter().filter(|y| y.is_none()).count()
        );

        Ok(SampledFunction { xs, ys })
    }

    /// Central difference with step `h`.
    pub fn derivative(&self, x0: f64, h: f64) -> Option<f64> {
        let ahead = self.evaluate(x0 + h)?;
        let behind = self.evaluate(x0 - h)?;
        let slope = (ahead - behind) / (2.0 * h);
        slope.is_finite().then_some(slope)
    }

    /// Composite trapezoid over `samples` points between `a` and `b`.
    /// `a > b` gives the negated area; `a == b` gives zero.
    pub fn integral(&self, a: f64, b: f64, samples: usize) -> Option<f64> {
        if !a.is_finite() || !b.is_finite() {
            return None;
        }
        if a == b {
            return Some(0.0);
        }

        let xs = linspace(a, b, samples.max(MIN_POINTS));
        let ys: Vec<Option<f64>> = xs.iter().map(|&x| self.evaluate(x)).collect();

        let mut sum = 0.0;
        for i in 0..xs.len() - 1 {
            // Gap: skip this sub-interval
            if let (Some(y1), Some(y2)) = (ys[i], ys[i + 1]) {
                sum += 0.5 * (y1 + y2) * (xs[i + 1] - xs[i]);
            }
        }

        sum.is_finite().then_some(sum)
    }
}

fn require_finite(name: &str, value: f64) -> EngineResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::NonFiniteInput {
            name: name.to_string(),
        })
    }
}

/// `n` equally spaced values from `lo` to `hi`. The first value is exactly `lo`
/// and the last exactly `hi`. The span `hi - lo` is never formed, so bounds near
/// the ends of the f64 range still give a finite grid.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let last = (n - 1) as f64;
            let mut xs: Vec<f64> = (0..n)
                .map(|i| {
                    let t = i as f64 / last;
                    lo * (1.0 - t) + hi * t
                })
                .collect();
            xs[n - 1] = hi;
            xs
        }
    }
}

// ============================================================================
// SAMPLED DATA
// ============================================================================

/// A grid and its values. Both sequences always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledFunction {
    pub xs: Vec<f64>,
    /// `None` marks an undefined sample.
    pub ys: Vec<Option<f64>>,
}

impl SampledFunction {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn undefined_count(&self) -> usize {
        self.ys.iter().filter(|y| y.is_none()).count()
    }
}

/// Vertical extent used to scale a plot. Always satisfies `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRange {
    pub min: f64,
    pub max: f64,
}

pub fn display_range(ys: &[Option<f64>], config: &NumericConfig) -> DisplayRange {
    let mut finite = ys.iter().flatten().copied();
    let Some(first) = finite.next() else {
        let (min, max) = config.default_range;
        return DisplayRange { min, max };
    };

    let (min, max) = finite.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
    if min == max {
        DisplayRange {
            min: min - config.range_padding,
            max: max + config.range_padding,
        }
    } else {
        DisplayRange { min, max }
    }
}

/// Tangent samples over `xs`, or `None` when the point or the slope is undefined.
pub fn tangent_line(xs: &[f64], x0: f64, value: Option<f64>, slope: Option<f64>) -> Option<Vec<f64>> {
    let (fx0, dfx0) = (value?, slope?);
    Some(xs.iter().map(|&x| fx0 + dfx0 * (x - x0)).collect())
}

// ============================================================================
// ANALYSIS BUNDLE
// ============================================================================

/// Inputs of one function analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisParams {
    pub x_min: f64,
    pub x_max: f64,
    pub points: usize,
    pub x0: f64,
    pub a: f64,
    pub b: f64,
    pub show_tangent: bool,
    pub show_area: bool,
}

/// Everything a caller needs to draw and report one analysis. Callers keep
/// the latest one as their "last result" for redraws and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionAnalysis {
    pub expression: String,
    pub params: AnalysisParams,
    pub xs: Vec<f64>,
    pub ys: Vec<Option<f64>>,
    pub value: Option<f64>,
    pub derivative: Option<f64>,
    pub integral: Option<f64>,
    pub range: DisplayRange,
    pub tangent: Option<Vec<f64>>,
}

impl FunctionAnalysis {
    /// Toggles the tangent overlay, recomputing it from the stored results.
    pub fn set_tangent_visible(&mut self, visible: bool) {
        self.params.show_tangent = visible;
        self.tangent = if visible {
            tangent_line(&self.xs, self.params.x0, self.value, self.derivative)
        } else {
            None
        };
    }

    pub fn set_area_visible(&mut self, visible: bool) {
        self.params.show_area = visible;
    }
}

impl CompiledFunction {
    /// Runs the full analysis (grid, point value, slope, area, range).
    pub fn analyze(&self, params: &AnalysisParams, config: &NumericConfig) -> EngineResult<FunctionAnalysis> {
        require_finite("x0", params.x0)?;
        require_finite("a", params.a)?;
        require_finite("b", params.b)?;

        let sampled = self.sample(params.x_min, params.x_max, params.points, config)?;

        let value = self.evaluate(params.x0);
        let derivative = self.derivative(params.x0, config.derivative_step);
        let integral = self.integral(params.a, params.b, config.integral_samples);
        let range = display_range(&sampled.ys, config);

        let mut analysis = FunctionAnalysis {
            expression: self.source().to_string(),
            params: params.clone(),
            xs: sampled.xs,
            ys: sampled.ys,
            value,
            derivative,
            integral,
            range,
            tangent: None,
        };
        analysis.set_tangent_visible(params.show_tangent);

        log::debug!(
            "analyzed {:?}: f(x0)={:?} f'(x0)={:?} integral={:?}",
            analysis.expression,
            value,
            derivative,
            integral
        );
        Ok(analysis)
    }
}

/// Compiles `expression` and analyzes it in one step.
pub fn analyze_function(
    expression: &str,
    params: &AnalysisParams,
    config: &NumericConfig,
) -> EngineResult<FunctionAnalysis> {
    CompiledFunction::compile(expression)?.analyze(params, config)
}
