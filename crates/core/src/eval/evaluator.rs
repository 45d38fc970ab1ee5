//! Operation pipeline evaluator.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::types::{OpFunc, Operand, Operation};
use crate::namespace::Namespace;

/// Why an operation pipeline could not be computed.
#[derive(Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("malformed operations: {0}")]
    Malformed(String),

    #[error("step {step}: malformed operation: {reason}")]
    MalformedStep { step: usize, reason: String },

    #[error("step {step} ({func}): missing argument {index}")]
    MissingArgument { step: usize, func: String, index: usize },

    #[error("step {step} ({func}): argument {index} is not a number: {value}")]
    NotANumber { step: usize, func: String, index: usize, value: String },

    #[error("step {step} (sqrt): square root of negative number {value}")]
    NegativeSqrt { step: usize, value: f64 },

    #[error("step {step} (power): {base} ** {exponent} is not a finite number")]
    PowerDomain { step: usize, base: f64, exponent: f64 },
}

/// Split an `operations` field into raw, not yet decoded steps. The field
/// is a JSON-encoded string or an already structured sequence. Absent, null
/// and empty yield `Ok(None)`.
pub fn decode_steps(value: Option<&serde_yaml::Value>) -> Result<Option<Vec<Value>>, EvalError> {
    let raw: Value = match value {
        None | Some(serde_yaml::Value::Null) => return Ok(None),
        Some(serde_yaml::Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(serde_yaml::Value::String(s)) => {
            serde_json::from_str(s).map_err(|e| EvalError::Malformed(e.to_string()))?
        }
        Some(other) => serde_yaml::from_value(other.clone())
            .map_err(|e| EvalError::Malformed(e.to_string()))?,
    };
    match raw {
        Value::Array(steps) if steps.is_empty() => Ok(None),
        Value::Array(steps) => Ok(Some(steps)),
        other => Err(EvalError::Malformed(format!("expected a list of steps, got {other}"))),
    }
}

/// Decode an `operations` field into steps, failing on the first step that
/// does not describe an operation.
pub fn decode_operations(
    value: Option<&serde_yaml::Value>,
) -> Result<Option<Vec<Operation>>, EvalError> {
    let Some(steps) = decode_steps(value)? else {
        return Ok(None);
    };
    let ops = steps
        .iter()
        .enumerate()
        .map(|(step, raw)| decode_step(step, raw))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(ops))
}

fn decode_step(step: usize, raw: &Value) -> Result<Operation, EvalError> {
    Operation::deserialize(raw)
        .map_err(|e| EvalError::MalformedStep { step, reason: e.to_string() })
}

/// Run `operations` in order against `ns`.
///
/// Returns `Ok(None)` for an empty pipeline, or when no step produced a
/// value (only unknown functions). Steps that completed before an error
/// keep their bindings in `ns`.
pub fn try_evaluate(operations: &[Operation], ns: &mut Namespace) -> Result<Option<f64>, EvalError> {
    let mut result: Option<f64> = None;
    for (step, op) in operations.iter().enumerate() {
        result = run_step(step, op, result, ns)?;
    }
    Ok(result)
}

/// [`try_evaluate`] over raw steps, each decoded just before it runs, so a
/// malformed step only fails once the steps before it have bound their names.
pub fn try_evaluate_steps(steps: &[Value], ns: &mut Namespace) -> Result<Option<f64>, EvalError> {
    let mut result: Option<f64> = None;
    for (step, raw) in steps.iter().enumerate() {
        let op = decode_step(step, raw)?;
        result = run_step(step, &op, result, ns)?;
    }
    Ok(result)
}

fn run_step(
    step: usize,
    op: &Operation,
    previous: Option<f64>,
    ns: &mut Namespace,
) -> Result<Option<f64>, EvalError> {
    let result = apply(step, op, previous, ns)?;
    if let Some(ref name) = op.name {
        ns.bind(name.clone(), result);
    }
    Ok(result)
}

/// Run `operations` against `ns`, collapsing any failure to `None`.
pub fn evaluate(operations: &[Operation], ns: &mut Namespace) -> Option<f64> {
    if operations.is_empty() {
        return None;
    }
    match try_evaluate(operations, ns) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("calculation not computable: {e}");
            None
        }
    }
}

/// Decode a JSON-encoded pipeline and run it against `ns`.
pub fn evaluate_json(json: &str, ns: &mut Namespace) -> Option<f64> {
    evaluate_value(Some(&serde_yaml::Value::String(json.to_string())), ns)
}

/// Decode an `operations` field (see [`decode_steps`]) and run it.
pub fn evaluate_value(value: Option<&serde_yaml::Value>, ns: &mut Namespace) -> Option<f64> {
    let outcome = match decode_steps(value) {
        Ok(Some(steps)) => try_evaluate_steps(&steps, ns),
        Ok(None) => return None,
        Err(e) => Err(e),
    };
    outcome.unwrap_or_else(|e| {
        tracing::warn!("calculation not computable: {e}");
        None
    })
}

/// A resolved operand.
#[derive(Debug, Clone, PartialEq)]
enum Arg {
    Number(f64),
    Null,
    Other(Value),
}

impl Arg {
    fn is_zero(&self) -> bool {
        matches!(self, Arg::Number(n) if *n == 0.0)
    }

    fn describe(&self) -> String {
        match self {
            Arg::Number(n) => n.to_string(),
            Arg::Null => "null".to_string(),
            Arg::Other(v) => v.to_string(),
        }
    }
}

fn resolve(operand: &Operand, previous: Option<f64>, ns: &Namespace) -> Arg {
    match operand {
        Operand::Result => previous.map_or(Arg::Null, Arg::Number),
        Operand::Variable(name) => match ns.binding(name) {
            Some(Some(v)) => Arg::Number(v),
            Some(None) => Arg::Null,
            None => Arg::Number(0.0),
        },
        Operand::Literal(Value::Number(n)) => n.as_f64().map_or(Arg::Null, Arg::Number),
        Operand::Literal(Value::Bool(b)) => Arg::Number(if *b { 1.0 } else { 0.0 }),
        Operand::Literal(Value::Null) => Arg::Null,
        Operand::Literal(other) => Arg::Other(other.clone()),
    }
}

fn apply(
    step: usize,
    op: &Operation,
    previous: Option<f64>,
    ns: &Namespace,
) -> Result<Option<f64>, EvalError> {
    if op.func.arity() == 0 {
        tracing::debug!("skipping unknown operation '{}' at step {step}", op.func.as_str());
        return Ok(previous);
    }

    let args = op
        .args
        .iter()
        .take(op.func.arity())
        .map(|a| resolve(a, previous, ns))
        .collect::<Vec<_>>();
    if args.len() < op.func.arity() {
        return Err(EvalError::MissingArgument {
            step,
            func: op.func.as_str().to_string(),
            index: args.len(),
        });
    }

    let num = |index: usize| -> Result<f64, EvalError> {
        match &args[index] {
            Arg::Number(n) => Ok(*n),
            other => Err(EvalError::NotANumber {
                step,
                func: op.func.as_str().to_string(),
                index,
                value: other.describe(),
            }),
        }
    };

    let value = match op.func {
        OpFunc::Add => num(0)? + num(1)?,
        OpFunc::Subtract => num(0)? - num(1)?,
        OpFunc::Multiply => num(0)? * num(1)?,
        OpFunc::Divide if args[1].is_zero() => {
            tracing::debug!("division by zero at step {step} yields 0");
            0.0
        }
        OpFunc::Divide => num(0)? / num(1)?,
        OpFunc::Power => {
            let (base, exponent) = (num(0)?, num(1)?);
            let value = base.powf(exponent);
            if !value.is_finite() && base.is_finite() && exponent.is_finite() {
                return Err(EvalError::PowerDomain { step, base, exponent });
            }
            value
        }
        OpFunc::Sqrt => {
            let a = num(0)?;
            if a < 0.0 {
                return Err(EvalError::NegativeSqrt { step, value: a });
            }
            a.sqrt()
        }
        OpFunc::Percent => num(0)? * num(1)? / 100.0,
        OpFunc::PercentOf if args[1].is_zero() => {
            tracing::debug!("percentOf with zero base at step {step} yields 0");
            0.0
        }
        OpFunc::PercentOf => num(0)? / num(1)? * 100.0,
        OpFunc::Unknown(_) | OpFunc::Missing => return Ok(previous),
    };

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn ops(v: serde_json::Value) -> Vec<Operation> {
        serde_json::from_value(v).unwrap()
    }

    fn run(v: serde_json::Value) -> Option<f64> {
        evaluate(&ops(v), &mut Namespace::new())
    }

    #[test]
    fn empty_and_absent_are_not_computable() {
        let mut ns = Namespace::new();
        assert_eq!(evaluate(&[], &mut ns), None);
        assert_eq!(evaluate_value(None, &mut ns), None);
        assert_eq!(evaluate_value(Some(&serde_yaml::Value::Null), &mut ns), None);
        assert_eq!(evaluate_json("[]", &mut ns), None);
    }

    #[rstest]
    #[case("add", json!([2, 3]), 5.0)]
    #[case("subtract", json!([2, 3]), -1.0)]
    #[case("multiply", json!([4, 2.5]), 10.0)]
    #[case("divide", json!([10, 4]), 2.5)]
    #[case("divide", json!([10, 0]), 0.0)]
    #[case("power", json!([2, 10]), 1024.0)]
    #[case("sqrt", json!([81]), 9.0)]
    #[case("percent", json!([200, 15]), 30.0)]
    #[case("percentOf", json!([5, 20]), 25.0)]
    #[case("percentOf", json!([5, 0]), 0.0)]
    fn single_step(#[case] func: &str, #[case] args: serde_json::Value, #[case] expected: f64) {
        let result = run(json!([{"func": func, "args": args}]));
        assert_eq!(result, Some(expected));
    }

    #[test]
    fn result_chaining_and_back_reference() {
        let result = run(json!([
            {"func": "add", "args": [2, 3], "name": "x"},
            {"func": "multiply", "args": ["result", "{x}"]}
        ]));
        assert_eq!(result, Some(25.0));
    }

    #[test]
    fn unknown_first_step_leaves_no_result() {
        assert_eq!(run(json!([{"func": "unknownOp", "args": [1, 2]}])), None);
    }

    #[test]
    fn unknown_step_keeps_running_result() {
        let result = run(json!([
            {"func": "add", "args": [1, 1]},
            {"func": "median", "args": [9, 9]},
            {"func": "multiply", "args": ["result", 10]}
        ]));
        assert_eq!(result, Some(20.0));
    }

    #[test]
    fn missing_variable_reads_as_zero() {
        assert_eq!(run(json!([{"func": "add", "args": ["{nope}", 7]}])), Some(7.0));
    }

    #[test]
    fn result_in_first_step_fails() {
        let mut ns = Namespace::new();
        let err = try_evaluate(&ops(json!([{"func": "add", "args": ["result", 1]}])), &mut ns);
        assert!(matches!(err, Err(EvalError::NotANumber { index: 0, .. })));
    }

    #[test]
    fn divide_guard_checks_divisor_first() {
        assert_eq!(run(json!([{"func": "divide", "args": ["result", 0]}])), Some(0.0));
    }

    #[test]
    fn negative_sqrt_is_not_computable() {
        let mut ns = Namespace::new();
        let steps = ops(json!([{"func": "sqrt", "args": [-4]}]));
        assert!(matches!(
            try_evaluate(&steps, &mut ns),
            Err(EvalError::NegativeSqrt { step: 0, .. })
        ));
        assert_eq!(evaluate(&steps, &mut ns), None);
    }

    #[test]
    fn power_domain_error() {
        assert_eq!(run(json!([{"func": "power", "args": [-8, 0.5]}])), None);
        assert_eq!(run(json!([{"func": "power", "args": [0, -1]}])), None);
    }

    #[test]
    fn string_literals_are_not_numbers() {
        assert_eq!(run(json!([{"func": "add", "args": ["5", 1]}])), None);
    }

    #[test]
    fn missing_argument_fails() {
        assert_eq!(run(json!([{"func": "add", "args": [1]}])), None);
        assert_eq!(run(json!([{"func": "sqrt"}])), None);
    }

    #[test]
    fn bindings_survive_later_failure() {
        let mut ns = Namespace::new();
        let steps = ops(json!([
            {"func": "add", "args": [1, 2], "name": "partial"},
            {"func": "sqrt", "args": [-1]}
        ]));
        assert_eq!(evaluate(&steps, &mut ns), None);
        assert_eq!(ns.get("partial"), Some(3.0));
    }

    #[test]
    fn bindings_survive_later_malformed_step() {
        let mut ns = Namespace::new();
        let json = r#"[{"func": "add", "args": [1, 2], "name": "x"}, "garbage"]"#;
        assert_eq!(evaluate_json(json, &mut ns), None);
        assert_eq!(ns.get("x"), Some(3.0));

        let mut ns = Namespace::new();
        let json = r#"[{"func": "add", "args": [1, 2], "name": "x"}, {"func": "add", "args": 5}]"#;
        assert_eq!(evaluate_json(json, &mut ns), None);
        assert_eq!(ns.get("x"), Some(3.0));
    }

    #[test]
    fn malformed_step_reports_its_position() {
        let steps = decode_steps(Some(&serde_yaml::Value::String(
            r#"[{"func": "add", "args": [1, 2]}, 7]"#.into(),
        )))
        .unwrap()
        .unwrap();
        let err = try_evaluate_steps(&steps, &mut Namespace::new()).unwrap_err();
        assert!(matches!(err, EvalError::MalformedStep { step: 1, .. }));
    }

    #[test]
    fn bindings_persist_across_calls() {
        let mut ns: Namespace = [("users", 100.0)].into_iter().collect();
        evaluate_json(r#"[{"func": "multiply", "args": ["{users}", 12], "name": "yearly"}]"#, &mut ns);
        let share = evaluate_json(r#"[{"func": "percentOf", "args": ["{yearly}", 2400]}]"#, &mut ns);
        assert_eq!(share, Some(50.0));
    }

    #[test]
    fn unknown_named_step_binds_null() {
        let mut ns = Namespace::new();
        let steps = ops(json!([
            {"func": "later", "args": [], "name": "pending"},
            {"func": "add", "args": ["{pending}", 1]}
        ]));
        assert_eq!(evaluate(&steps, &mut ns), None);
        assert_eq!(ns.binding("pending"), Some(None));
    }

    #[test]
    fn malformed_json_is_not_computable() {
        let mut ns = Namespace::new();
        assert_eq!(evaluate_json("[{\"func\": ", &mut ns), None);
        assert_eq!(evaluate_json(r#"["add"]"#, &mut ns), None);
        assert!(matches!(
            decode_operations(Some(&serde_yaml::Value::String("nope".into()))),
            Err(EvalError::Malformed(_))
        ));
        assert!(matches!(
            decode_operations(Some(&serde_yaml::Value::String(r#"{"func": "add"}"#.into()))),
            Err(EvalError::Malformed(_))
        ));
        assert!(matches!(
            decode_operations(Some(&serde_yaml::Value::String(r#"["add"]"#.into()))),
            Err(EvalError::MalformedStep { step: 0, .. })
        ));
    }

    #[test]
    fn yaml_sequence_operations() {
        let yaml: serde_yaml::Value = serde_yaml::from_str(
            "- func: multiply\n  args: ['{a}', 3]\n  name: tripled\n- func: add\n  args: [result, 1]\n",
        )
        .unwrap();
        let mut ns: Namespace = [("a", 2.0)].into_iter().collect();
        assert_eq!(evaluate_value(Some(&yaml), &mut ns), Some(7.0));
        assert_eq!(ns.get("tripled"), Some(6.0));
    }
}
