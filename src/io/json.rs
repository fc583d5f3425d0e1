use serde_json::{Map, Value as JsonValue};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::Result;
use crate::DataFrame;

/// Converts the frame to a records-oriented JSON array: one object per row,
/// keyed by column name. A ragged frame fails with `LengthMismatch`.
pub fn to_json_value(df: &DataFrame) -> Result<JsonValue> {
    let names = df.column_names();
    let mut records = Vec::with_capacity(df.row_count());

    for row in df.rows() {
        let mut record = Map::with_capacity(names.len());
        for (name, value) in names.iter().zip(row?) {
            record.insert(name.clone(), serde_json::to_value(&value)?);
        }
        records.push(JsonValue::Object(record));
    }

    Ok(JsonValue::Array(records))
}

pub fn to_json_string(df: &DataFrame) -> Result<String> {
    Ok(serde_json::to_string(&to_json_value(df)?)?)
}

/// DataFrameをJSONファイルに書き込む
pub fn write_json<P: AsRef<Path>>(df: &DataFrame, path: P) -> Result<()> {
    let records = to_json_value(df)?;
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(BufWriter::new(file), &records)?;
    Ok(())
}
