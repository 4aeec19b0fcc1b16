//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the Trivium evaluation engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.
//! Every operation here is a synchronous pure function of its inputs.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod function;
pub mod sets;
pub mod truth_table;

// Re-export commonly used types at the crate root
pub use config::NumericConfig;
pub use error::{EngineError, EngineResult, EvalError};
pub use evaluator::{eval_math, eval_rpn};
pub use function::{
    analyze_function, display_range, linspace, tangent_line, AnalysisParams, CompiledFunction,
    DisplayRange, FunctionAnalysis, SampledFunction,
};
pub use sets::{
    apply, complement, compute_set_operation, compute_universe, format_number, outside_universe,
    regions, Element, FiniteSet, SetOperation, SetOperationResult, SetRegions, UniverseComplements,
};
pub use truth_table::{
    build_truth_table, check_equivalence, compile_for, enumerate_assignments, Assignment,
    Counterexample, Equivalence, TruthRow, TruthTable, VariableCount,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integration_test_logic_workflow() {
        let count = VariableCount::try_from(2u8).unwrap();
        let table = build_truth_table("A -> B", count).unwrap();
        assert_eq!(table.rows.len(), 4);

        let eq = check_equivalence("A -> B", "~B -> ~A", count).unwrap();
        assert!(eq.equivalent);
    }

    #[test]
    fn integration_test_function_workflow() {
        let config = NumericConfig::default();
        let f = CompiledFunction::compile("exp(x) - 1").unwrap();
        let sampled = f.sample(0.0, 1.0, 11, &config).unwrap();
        let range = display_range(&sampled.ys, &config);
        assert_eq!(range.min, 0.0);
        assert!((range.max - (std::f64::consts::E - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn integration_test_set_workflow() {
        let result = compute_set_operation("1,2,3", "3,4", SetOperation::from_selector("setxor"));
        assert_eq!(result.result.to_string(), "{ 1, 2, 4 }");
    }
}
