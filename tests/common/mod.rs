//! Common test utilities module
//!
//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use tabframe::{DataFrame, Value, ValueType};

/// category / amount / note frame: A=10, A=20, B=5
pub fn sales_frame() -> DataFrame {
    let mut df = DataFrame::with_schema(
        &["category", "amount", "note"],
        &[ValueType::String, ValueType::Int, ValueType::String],
    )
    .unwrap();

    for (category, amount, note) in [("A", 10, "x"), ("A", 20, "y"), ("B", 5, "z")] {
        df.add_row(vec![
            Value::from(category),
            Value::Int(amount),
            Value::from(note),
        ])
        .unwrap();
    }
    df
}

/// Builds a column of ints
pub fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().map(|&v| Value::Int(v)).collect()
}

/// Builds a column of floats
pub fn floats(values: &[f64]) -> Vec<Value> {
    values.iter().map(|&v| Value::Float(v)).collect()
}

/// First row of `df` whose `column` equals `key`
pub fn find_row(df: &DataFrame, column: &str, key: &Value) -> Option<Vec<Value>> {
    let position = df.column_names().iter().position(|n| n == column)?;
    df.rows()
        .map(|row| row.unwrap())
        .find(|row| &row[position] == key)
}
