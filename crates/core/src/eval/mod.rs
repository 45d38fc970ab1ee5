//! Evaluation of napkin-math calculations.
//!
//! Two forms are supported:
//! - operation pipelines, an ordered list of steps such as
//!   `[{"func": "multiply", "args": ["{users}", 12], "name": "yearly"}]`,
//!   evaluated leniently by [`evaluate`];
//! - free-form arithmetic expressions such as `users * price / 12`,
//!   evaluated strictly by [`evaluate_expression`].

pub mod evaluator;
pub mod expression;
pub mod types;

pub use evaluator::{
    EvalError, decode_operations, decode_steps, evaluate, evaluate_json, evaluate_value,
    try_evaluate, try_evaluate_steps,
};
pub use expression::{Expr, ExprError, evaluate_expression, parse_expression};
pub use types::{OpFunc, Operand, Operation};
