use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::debug;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::config::FrameConfig;
use crate::error::{Error, Result};
use crate::value::{Value, ValueType};
use crate::DataFrame;

/// CSVファイルからDataFrameを読み込む
///
/// The first line names the columns; `types` gives one value type per
/// column, in header order.
pub fn read_csv<P: AsRef<Path>>(path: P, types: &[ValueType]) -> Result<DataFrame> {
    read_csv_with_config(path, types, &FrameConfig::default())
}

pub fn read_csv_with_config<P: AsRef<Path>>(
    path: P,
    types: &[ValueType],
    config: &FrameConfig,
) -> Result<DataFrame> {
    let file = File::open(path.as_ref())?;
    read_csv_from_reader(file, types, config)
}

/// Reads CSV text from any reader.
///
/// Every record must carry exactly one field per column; a short or long
/// record fails with `Error::Format` naming its line.
pub fn read_csv_from_reader<R: Read>(
    reader: R,
    types: &[ValueType],
    config: &FrameConfig,
) -> Result<DataFrame> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(config.csv.has_header)
        .delimiter(config.csv.delimiter_byte()?)
        .flexible(true)
        .trim(if config.csv.trim { Trim::All } else { Trim::None })
        .from_reader(reader);

    // ヘッダーがない場合は "column_0", "column_1" などとする
    let names: Vec<String> = if config.csv.has_header {
        rdr.headers()?.iter().map(|h| h.to_string()).collect()
    } else {
        (0..types.len()).map(|i| format!("column_{}", i)).collect()
    };

    if names.len() != types.len() {
        return Err(Error::LengthMismatch {
            expected: types.len(),
            actual: names.len(),
        });
    }

    let mut df = DataFrame::with_schema(&names, types)?;

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        if record.len() != types.len() {
            return Err(Error::Format(format!(
                "line {}: expected {} fields, found {}",
                line,
                types.len(),
                record.len()
            )));
        }

        let row = record
            .iter()
            .zip(types)
            .map(|(field, value_type)| {
                Value::from_text_with_formats(*value_type, field, config.datetime_formats.as_slice())
            })
            .collect::<Result<Vec<_>>>()?;
        df.add_row(row)?;
    }

    debug!(
        "read {} rows x {} columns from CSV",
        df.row_count(),
        df.column_count()
    );
    Ok(df)
}

/// DataFrameをCSVファイルに書き込む
pub fn write_csv<P: AsRef<Path>>(df: &DataFrame, path: P) -> Result<()> {
    df.checked_row_count()?;
    let file = File::create(path.as_ref())?;
    write_csv_to_writer(df, file, &FrameConfig::default())
}

pub fn write_csv_to_writer<W: Write>(df: &DataFrame, writer: W, config: &FrameConfig) -> Result<()> {
    // 行が欠けたまま書き出さない
    df.checked_row_count()?;

    let mut wtr = WriterBuilder::new()
        .delimiter(config.csv.delimiter_byte()?)
        .from_writer(writer);

    if config.csv.has_header {
        wtr.write_record(df.column_names())?;
    }

    for row in df.rows() {
        wtr.write_record(row?.iter().map(|v| v.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}
