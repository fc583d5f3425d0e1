use super::Value;
use crate::error::{Error, Result};

// Methods take `&Value` and return `Result`, so they do not fit std::ops
#[allow(clippy::should_implement_trait)]
impl Value {
    pub fn add(&self, other: &Value) -> Result<Value> {
        self.numeric_op("add", other, i64::checked_add, |a, b| a + b)
    }

    pub fn sub(&self, other: &Value) -> Result<Value> {
        self.numeric_op("sub", other, i64::checked_sub, |a, b| a - b)
    }

    pub fn mul(&self, other: &Value) -> Result<Value> {
        self.numeric_op("mul", other, i64::checked_mul, |a, b| a * b)
    }

    /// Integer division truncates toward zero; a zero integer divisor fails
    /// with `DivisionByZero`. Float division follows IEEE 754.
    pub fn div(&self, other: &Value) -> Result<Value> {
        if let (Value::Int(_), Value::Int(0)) = (self, other) {
            return Err(Error::DivisionByZero);
        }
        self.numeric_op("div", other, i64::checked_div, |a, b| a / b)
    }

    /// Raises `self` to the power `other`.
    ///
    /// An integer base with an integer exponent stays integral and requires a
    /// non-negative exponent.
    pub fn pow(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Int(base), Value::Int(exp)) => {
                if *exp < 0 {
                    return Err(Error::InvalidInput(format!(
                        "negative exponent {} for an integer base",
                        exp
                    )));
                }
                u32::try_from(*exp)
                    .ok()
                    .and_then(|e| base.checked_pow(e))
                    .map(Value::Int)
                    .ok_or_else(|| Error::Overflow("pow".to_string()))
            }
            (Value::Float(base), Value::Int(exp)) => match i32::try_from(*exp) {
                Ok(e) => Ok(Value::Float(base.powi(e))),
                Err(_) => Ok(Value::Float(base.powf(*exp as f64))),
            },
            _ => self.numeric_op("pow", other, |_, _| None, f64::powf),
        }
    }

    fn numeric_op(
        &self,
        op: &str,
        other: &Value,
        int_op: fn(i64, i64) -> Option<i64>,
        float_op: fn(f64, f64) -> f64,
    ) -> Result<Value> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => int_op(*a, *b)
                .map(Value::Int)
                .ok_or_else(|| Error::Overflow(op.to_string())),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(float_op(*a, *b))),
            (Value::Int(a), Value::Float(b)) => Ok(Value::Float(float_op(*a as f64, *b))),
            (Value::Float(a), Value::Int(b)) => Ok(Value::Float(float_op(*a, *b as f64))),
            (l, _) if !l.is_numeric() => Err(Error::unsupported(op, l.value_type())),
            (_, r) => Err(Error::unsupported(op, r.value_type())),
        }
    }
}
