//! Operation pipeline types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One step of a calculation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub func: OpFunc,
    #[serde(default)]
    pub args: Vec<Operand>,
    /// Binds this step's result in the namespace when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Operation {
    pub fn new(func: OpFunc, args: Vec<Operand>) -> Self {
        Self { func, args, name: None }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Arithmetic function of a step.
///
/// Names that are not recognised are kept as [`OpFunc::Unknown`] and
/// evaluate as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum OpFunc {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Sqrt,
    Percent,
    PercentOf,
    Unknown(String),
    #[default]
    Missing,
}

impl OpFunc {
    pub fn as_str(&self) -> &str {
        match self {
            OpFunc::Add => "add",
            OpFunc::Subtract => "subtract",
            OpFunc::Multiply => "multiply",
            OpFunc::Divide => "divide",
            OpFunc::Power => "power",
            OpFunc::Sqrt => "sqrt",
            OpFunc::Percent => "percent",
            OpFunc::PercentOf => "percentOf",
            OpFunc::Unknown(name) => name,
            OpFunc::Missing => "",
        }
    }

    /// Number of operands consumed.
    pub fn arity(&self) -> usize {
        match self {
            OpFunc::Sqrt => 1,
            OpFunc::Unknown(_) | OpFunc::Missing => 0,
            _ => 2,
        }
    }
}

impl From<&str> for OpFunc {
    fn from(s: &str) -> Self {
        match s {
            "add" => OpFunc::Add,
            "subtract" => OpFunc::Subtract,
            "multiply" => OpFunc::Multiply,
            "divide" => OpFunc::Divide,
            "power" => OpFunc::Power,
            "sqrt" => OpFunc::Sqrt,
            "percent" => OpFunc::Percent,
            "percentOf" => OpFunc::PercentOf,
            other => OpFunc::Unknown(other.to_string()),
        }
    }
}

impl From<Value> for OpFunc {
    fn from(v: Value) -> Self {
        match v {
            Value::String(s) => OpFunc::from(s.as_str()),
            Value::Null => OpFunc::Missing,
            other => OpFunc::Unknown(other.to_string()),
        }
    }
}

impl From<OpFunc> for Value {
    fn from(f: OpFunc) -> Self {
        match f {
            OpFunc::Missing => Value::Null,
            other => Value::String(other.as_str().to_string()),
        }
    }
}

/// An argument of a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Operand {
    /// `"result"`: the previous step's output.
    Result,
    /// `"{name}"`: a namespace lookup.
    Variable(String),
    /// Anything else, used as written.
    Literal(Value),
}

impl Operand {
    pub fn number(n: f64) -> Self {
        Operand::Literal(serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number))
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Operand::Variable(name.into())
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        match v {
            Value::String(s) if s == "result" => Operand::Result,
            Value::String(s) if s.len() >= 2 && s.starts_with('{') && s.ends_with('}') => {
                Operand::Variable(s[1..s.len() - 1].to_string())
            }
            other => Operand::Literal(other),
        }
    }
}

impl From<Operand> for Value {
    fn from(op: Operand) -> Self {
        match op {
            Operand::Result => Value::String("result".to_string()),
            Operand::Variable(name) => Value::String(format!("{{{name}}}")),
            Operand::Literal(v) => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_forms() {
        let ops: Vec<Operand> = serde_json::from_str(r#"["result", "{x}", 3, "text", "{}"]"#).unwrap();
        assert_eq!(ops[0], Operand::Result);
        assert_eq!(ops[1], Operand::variable("x"));
        assert_eq!(ops[2], Operand::Literal(serde_json::json!(3)));
        assert_eq!(ops[3], Operand::Literal(serde_json::json!("text")));
        assert_eq!(ops[4], Operand::variable(""));
    }

    #[test]
    fn unknown_func_is_kept() {
        let op: Operation = serde_json::from_str(r#"{"func": "median", "args": [1]}"#).unwrap();
        assert_eq!(op.func, OpFunc::Unknown("median".into()));

        let op: Operation = serde_json::from_str(r#"{"args": [1]}"#).unwrap();
        assert_eq!(op.func, OpFunc::Missing);
    }

    #[test]
    fn serializes_back_to_wire_form() {
        let op = Operation::new(OpFunc::PercentOf, vec![Operand::Result, Operand::variable("n")])
            .named("share");
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"func": "percentOf", "args": ["result", "{n}"], "name": "share"})
        );
    }
}
