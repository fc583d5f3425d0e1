//! Column reductions
//!
//! All reductions are written against the [`Value`] contract only: no
//! reduction assumes a zero value exists for the column type, and the
//! constants it needs (`0`, `2`, the element count) are built through
//! [`Value::from_number`] in the column's own type.

use std::fmt;
use std::str::FromStr;

use super::Column;
use crate::error::{Error, Result};
use crate::value::Value;

/// 集計操作を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reduction {
    /// 最大値
    Max,
    /// 最小値
    Min,
    /// 合計
    Sum,
    /// 平均
    Mean,
    /// 母分散 (divisor n)
    Var,
    /// 標準偏差
    Std,
}

impl Reduction {
    pub const ALL: [Reduction; 6] = [
        Reduction::Max,
        Reduction::Min,
        Reduction::Sum,
        Reduction::Mean,
        Reduction::Var,
        Reduction::Std,
    ];

    /// Whether a group-by aggregation with this reduction leaves out
    /// non-key text and date-time columns. Only the orderable reductions
    /// keep every column.
    pub fn drops_non_reducible(self) -> bool {
        match self {
            Reduction::Max | Reduction::Min => false,
            Reduction::Sum | Reduction::Mean | Reduction::Var | Reduction::Std => true,
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reduction::Max => "max",
            Reduction::Min => "min",
            Reduction::Sum => "sum",
            Reduction::Mean => "mean",
            Reduction::Var => "var",
            Reduction::Std => "std",
        };
        f.write_str(name)
    }
}

impl FromStr for Reduction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" => Ok(Reduction::Max),
            "min" => Ok(Reduction::Min),
            "sum" => Ok(Reduction::Sum),
            "mean" | "avg" => Ok(Reduction::Mean),
            "var" | "variance" => Ok(Reduction::Var),
            "std" | "stddev" => Ok(Reduction::Std),
            other => Err(Error::InvalidInput(format!("unknown reduction: {}", other))),
        }
    }
}

impl Column {
    /// Applies a reduction. Returns `Ok(None)` for an empty column.
    pub fn reduce(&self, op: Reduction) -> Result<Option<Value>> {
        match op {
            Reduction::Max => self.max(),
            Reduction::Min => self.min(),
            Reduction::Sum => self.sum(),
            Reduction::Mean => self.mean(),
            Reduction::Var => self.var(),
            Reduction::Std => self.std(),
        }
    }

    /// Smallest element. Ties keep the earliest element.
    pub fn min(&self) -> Result<Option<Value>> {
        let Some((first, rest)) = self.values.split_first() else {
            return Ok(None);
        };

        let mut best = first;
        for value in rest {
            if !value.gte(best)? {
                best = value;
            }
        }
        Ok(Some(best.clone()))
    }

    /// Largest element. Ties keep the earliest element.
    pub fn max(&self) -> Result<Option<Value>> {
        let Some((first, rest)) = self.values.split_first() else {
            return Ok(None);
        };

        let mut best = first;
        for value in rest {
            if !value.lte(best)? {
                best = value;
            }
        }
        Ok(Some(best.clone()))
    }

    /// Sum of all elements.
    ///
    /// The accumulator starts at the first element and folds in the rest, so
    /// an integer column fails with `Overflow` only when a running sum
    /// leaves the `i64` range.
    pub fn sum(&self) -> Result<Option<Value>> {
        let Some((first, rest)) = self.values.split_first() else {
            return Ok(None);
        };
        // a single text value would otherwise never reach `add`
        if !first.is_numeric() {
            return Err(Error::unsupported("add", first.value_type()));
        }

        let mut acc = first.clone();
        for value in rest {
            acc = acc.add(value)?;
        }
        Ok(Some(acc))
    }

    /// `sum / n`. Integer columns truncate.
    pub fn mean(&self) -> Result<Option<Value>> {
        let Some(sum) = self.sum()? else {
            return Ok(None);
        };
        let count = Value::from_number(self.value_type, self.values.len())?;
        sum.div(&count).map(Some)
    }

    /// Population variance: `Σ (x - mean)^2 / n`.
    pub fn var(&self) -> Result<Option<Value>> {
        let Some(mean) = self.mean()? else {
            return Ok(None);
        };

        let two = Value::from_number(self.value_type, 2)?;
        let mut acc = Value::from_number(self.value_type, 0)?;
        for value in &self.values {
            acc = acc.add(&value.sub(&mean)?.pow(&two)?)?;
        }
        let count = Value::from_number(self.value_type, self.values.len())?;
        acc.div(&count).map(Some)
    }

    /// Square root of the variance, rebuilt in the column's type.
    pub fn std(&self) -> Result<Option<Value>> {
        let Some(var) = self.var()? else {
            return Ok(None);
        };

        let text = var.to_string();
        let var: f64 = text.parse().map_err(|_| Error::Parse {
            value_type: self.value_type,
            text,
            reason: "variance has no numeric form".to_string(),
        })?;
        Value::from_number(self.value_type, var.sqrt()).map(Some)
    }
}
