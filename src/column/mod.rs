mod stats;

use crate::error::{Error, Result};
use crate::value::{Value, ValueType};

pub use self::stats::Reduction;

/// 型付きの列を表す構造体
///
/// Every element's variant matches the declared [`ValueType`]. `Clone`
/// copies the element sequence, so a cloned column shares nothing with its
/// source.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub(crate) name: String,
    pub(crate) value_type: ValueType,
    pub(crate) values: Vec<Value>,
}

impl Column {
    /// 空の列を作成する
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            values: Vec::new(),
        }
    }

    /// 値のベクトルから列を作成する (型を検証する)
    pub fn with_values(
        name: impl Into<String>,
        value_type: ValueType,
        values: Vec<Value>,
    ) -> Result<Self> {
        let mut column = Self::new(name, value_type);
        for value in &values {
            column.check(value)?;
        }
        column.values = values;
        Ok(column)
    }

    /// 名前を取得する
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// 列の型を返す
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Appends a value, rejecting it if its variant differs from the
    /// column's declared type.
    pub fn append(&mut self, value: Value) -> Result<()> {
        self.check(&value)?;
        self.values.push(value);
        Ok(())
    }

    /// インデックスで値を取得する
    pub fn get(&self, index: usize) -> Result<&Value> {
        self.values.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            size: self.values.len(),
        })
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub(crate) fn check(&self, value: &Value) -> Result<()> {
        if value.value_type() != self.value_type {
            return Err(Error::TypeMismatch {
                column: self.name.clone(),
                expected: self.value_type,
                found: value.value_type(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Column {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
