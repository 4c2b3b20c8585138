//! Four-function calculator behind `POST /api/calculate`.

use std::{fmt, str::FromStr};

use playground_http::AppError;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const NAMES: &'static [&'static str] = &["add", "subtract", "multiply", "divide"];

    pub fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '*',
            Operation::Divide => '/',
        }
    }

    pub fn apply(self, a: f64, b: f64) -> Result<f64, CalcError> {
        match self {
            Operation::Add => Ok(a + b),
            Operation::Subtract => Ok(a - b),
            Operation::Multiply => Ok(a * b),
            Operation::Divide if b == 0.0 => Err(CalcError::DivisionByZero),
            Operation::Divide => Ok(a / b),
        }
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "divide" => Ok(Operation::Divide),
            _ => Err(CalcError::UnknownOperation(name.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("Both a and b must be numbers")]
    NonNumeric,
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),
    #[error("Cannot divide by zero")]
    DivisionByZero,
    #[error("Result is too large to represent")]
    Overflow,
}

impl From<CalcError> for AppError {
    fn from(err: CalcError) -> Self {
        let tip = match &err {
            CalcError::NonNumeric => "Send numbers, e.g. {\"a\": 7, \"b\": 8}".to_string(),
            CalcError::UnknownOperation(_) => {
                format!("Valid operations: {}", Operation::NAMES.join(", "))
            }
            CalcError::DivisionByZero => "Use a non-zero value for b".to_string(),
            CalcError::Overflow => "Use smaller operands".to_string(),
        };
        AppError::validation(vec![], err.to_string()).with_tip(tip)
    }
}

/// Body of a calculate request; operands may be numbers or numeric strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculateRequest {
    pub operation: Option<String>,
    pub a: Option<Value>,
    pub b: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub operation: Operation,
    pub a: f64,
    pub b: f64,
    pub result: f64,
}

impl Calculation {
    pub fn formula(&self) -> String {
        format!(
            "{} {} {} = {}",
            self.a,
            self.operation.symbol(),
            self.b,
            self.result
        )
    }

    pub fn to_json(&self) -> Value {
        json!({
            "success": true,
            "operation": format!("{:?}", self.operation).to_lowercase(),
            "a": number(self.a),
            "b": number(self.b),
            "result": number(self.result),
            "formula": self.formula(),
        })
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formula())
    }
}

/// Validate operands first, then the operation, then evaluate.
pub fn calculate(request: &CalculateRequest) -> Result<Calculation, CalcError> {
    let (a, b) = match (operand(request.a.as_ref()), operand(request.b.as_ref())) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(CalcError::NonNumeric),
    };
    let operation: Operation = request.operation.as_deref().unwrap_or_default().parse()?;
    let result = operation.apply(a, b)?;
    if !result.is_finite() {
        return Err(CalcError::Overflow);
    }

    Ok(Calculation {
        operation,
        a,
        b,
        result,
    })
}

fn operand(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Integral values serialize as integers so `56.0` reads as `56`.
fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        json!(value as i64)
    } else {
        json!(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(operation: &str, a: Value, b: Value) -> CalculateRequest {
        CalculateRequest {
            operation: Some(operation.to_string()),
            a: Some(a),
            b: Some(b),
        }
    }

    #[test]
    fn multiply_produces_integer_result() {
        let calculation = calculate(&request("multiply", json!(7), json!(8))).unwrap();
        assert_eq!(calculation.result, 56.0);
        assert_eq!(calculation.formula(), "7 * 8 = 56");
        assert_eq!(calculation.to_json()["result"], json!(56));
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let calculation = calculate(&request("divide", json!("7"), json!(" 2 "))).unwrap();
        assert_eq!(calculation.result, 3.5);
        assert_eq!(calculation.to_json()["result"], json!(3.5));
    }

    #[test]
    fn division_by_zero_is_rejected() {
        assert_eq!(
            calculate(&request("divide", json!(5), json!(0))),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn overflowing_results_are_rejected() {
        assert_eq!(
            calculate(&request("multiply", json!(1e308), json!(10))),
            Err(CalcError::Overflow)
        );
        assert_eq!(
            calculate(&request("add", json!(f64::MAX), json!(f64::MAX))),
            Err(CalcError::Overflow)
        );
    }

    #[test]
    fn bad_inputs_are_rejected() {
        assert_eq!(
            calculate(&request("add", json!("seven"), json!(1))),
            Err(CalcError::NonNumeric)
        );
        assert_eq!(
            calculate(&request("add", json!(true), json!(1))),
            Err(CalcError::NonNumeric)
        );
        assert_eq!(
            calculate(&request("modulo", json!(1), json!(1))),
            Err(CalcError::UnknownOperation("modulo".into()))
        );
        assert!(matches!(
            calculate(&CalculateRequest::default()),
            Err(CalcError::NonNumeric)
        ));
    }
}
