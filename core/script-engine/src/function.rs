//! FILENAME: core/script-engine/src/function.rs
//! PURPOSE: Script for a function analysis.
//! CONTEXT: The compiled postfix program is rendered back to a fully
//! parenthesized elementwise expression, so precedence in the script cannot
//! drift from the parser's. Numeric constants (derivative step, integral
//! sample count, range fallback and padding) come from the same config the
//! engine used.

use crate::{matlab_number, quoted, Script, ScriptKind};
use engine::{AnalysisParams, NumericConfig};
use parser::{ArithOperator, MathInstruction, MathProgram};

const SAFE_EVAL_HELPER: &str = r#"function y = safe_eval(f, x)
% Evaluates f elementwise; non-finite or complex values become NaN.
y = f(x);
if isscalar(y)
    y = y * ones(size(x));
end
bad = ~isfinite(y) | imag(y) ~= 0;
y = real(y);
y(bad) = NaN;
end"#;

fn elementwise(op: ArithOperator) -> &'static str {
    match op {
        ArithOperator::Add => "+",
        ArithOperator::Subtract => "-",
        ArithOperator::Multiply => ".*",
        ArithOperator::Divide => "./",
        ArithOperator::Power => ".^",
    }
}

/// Renders a program as a vectorized MATLAB expression in `x`.
pub fn render_vectorized(program: &MathProgram) -> String {
    let mut stack: Vec<String> = Vec::new();

    for instruction in program.instructions() {
        let rendered = match *instruction {
            MathInstruction::Number(n) => matlab_number(n),
            MathInstruction::X => "x".to_string(),
            MathInstruction::Pi => "pi".to_string(),
            MathInstruction::Negate => {
                let operand = stack.pop().unwrap_or_default();
                format!("(-{})", operand)
            }
            MathInstruction::Call(func) => {
                let operand = stack.pop().unwrap_or_default();
                format!("{}({})", func.name(), operand)
            }
            MathInstruction::Binary(op) => {
                let right = stack.pop().unwrap_or_default();
                let left = stack.pop().unwrap_or_default();
                format!("({} {} {})", left, elementwise(op), right)
            }
        };
        stack.push(rendered);
    }

    stack.pop().unwrap_or_default()
}

pub fn function_script(program: &MathProgram, params: &AnalysisParams, config: &NumericConfig) -> Script {
    let (fallback_min, fallback_max) = config.default_range;
    let padding = matlab_number(config.range_padding);

    let mut lines = vec![
        "% ===== Trivium: function analysis =====".to_string(),
        format!("f = @(x) {};", render_vectorized(program)),
        format!(
            "x = linspace({}, {}, {});",
            matlab_number(params.x_min),
            matlab_number(params.x_max),
            params.points
        ),
        "y = safe_eval(f, x);".to_string(),
        String::new(),
        "% Point evaluation".to_string(),
        format!("x0 = {};", matlab_number(params.x0)),
        "fx0 = safe_eval(f, x0);".to_string(),
        String::new(),
        "% Central difference".to_string(),
        format!("h = {};", matlab_number(config.derivative_step)),
        "dfx0 = (safe_eval(f, x0 + h) - safe_eval(f, x0 - h)) / (2*h);".to_string(),
        String::new(),
        "% Trapezoid rule; sub-intervals touching an undefined sample are skipped".to_string(),
        format!("a = {}; b = {};", matlab_number(params.a), matlab_number(params.b)),
        "if a == b".to_string(),
        "    I = 0;".to_string(),
        "else".to_string(),
        format!("    xi = linspace(a, b, {});", config.integral_samples.max(2)),
        "    yi = safe_eval(f, xi);".to_string(),
        "    ok = isfinite(yi(1:end-1)) & isfinite(yi(2:end));".to_string(),
        "    seg = 0.5 * (yi(1:end-1) + yi(2:end)) .* diff(xi);".to_string(),
        "    I = sum(seg(ok));".to_string(),
        "end".to_string(),
        "if ~isfinite(I)".to_string(),
        "    I = NaN;".to_string(),
        "end".to_string(),
        String::new(),
        "% Display range over finite samples".to_string(),
        "yf = y(isfinite(y));".to_string(),
        "if isempty(yf)".to_string(),
        format!(
            "    ymin = {}; ymax = {};",
            matlab_number(fallback_min),
            matlab_number(fallback_max)
        ),
        "else".to_string(),
        "    ymin = min(yf); ymax = max(yf);".to_string(),
        "    if ymin == ymax".to_string(),
        format!("        ymin = ymin - {}; ymax = ymax + {};", padding, padding),
        "    end".to_string(),
        "end".to_string(),
        String::new(),
        "fprintf('f(x0) = %.6f\\n', fx0);".to_string(),
        "fprintf('f''(x0) = %.6f\\n', dfx0);".to_string(),
        "fprintf('Integral = %.6f\\n', I);".to_string(),
        String::new(),
        "% Plot".to_string(),
        "figure; plot(x, y, 'LineWidth', 2); grid on; hold on;".to_string(),
        "ylim([ymin ymax]);".to_string(),
        "plot(x0, fx0, 'o', 'MarkerSize', 8, 'LineWidth', 2);".to_string(),
    ];

    if params.show_tangent {
        lines.push("yt = fx0 + dfx0 * (x - x0);".to_string());
        lines.push("plot(x, yt, '--', 'LineWidth', 1.5);".to_string());
    }
    if params.show_area {
        lines.push("xa = linspace(min(a, b), max(a, b), 200);".to_string());
        lines.push("ya = safe_eval(f, xa);".to_string());
        lines.push("ya(~isfinite(ya)) = 0;".to_string());
        lines.push("area(xa, ya, 'FaceAlpha', 0.2, 'EdgeColor', 'none');".to_string());
    }

    lines.extend([
        format!("title({});", quoted(&format!("f(x) = {}", program.source()))),
        "xlabel('x'); ylabel('f(x)'); hold off;".to_string(),
        String::new(),
        "% ===== Local functions =====".to_string(),
        SAFE_EVAL_HELPER.to_string(),
    ]);

    Script::new(ScriptKind::Function, lines)
}
