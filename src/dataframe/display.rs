use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

use super::DataFrame;
use crate::error::Result;

/// 表示オプション
///
/// `Display` always uses the defaults. Settings loaded through
/// `FrameConfig` (including `TABFRAME_MAX_ROWS`) take effect when passed
/// to [`DataFrame::to_string_with`] as `&config.display`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Rows printed before the rest are elided
    pub max_rows: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self { max_rows: 20 }
    }
}

impl DataFrame {
    /// Renders the frame as tab separated text: a header line of column
    /// names, then one line per row. A ragged frame fails with
    /// `LengthMismatch`.
    pub fn to_string_with(&self, options: &DisplayOptions) -> Result<String> {
        let mut out = self.column_names().join("\t");
        out.push('\n');

        let rows = self.checked_row_count()?;
        for row in self.rows().take(options.max_rows) {
            let line: Vec<String> = row?.iter().map(|v| v.to_string()).collect();
            out.push_str(&line.join("\t"));
            out.push('\n');
        }
        if rows > options.max_rows {
            let _ = writeln!(out, "... ({} more rows)", rows - options.max_rows);
        }
        Ok(out)
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_string_with(&DisplayOptions::default()) {
            Ok(text) => f.write_str(&text),
            Err(e) => write!(f, "<invalid frame: {}>", e),
        }
    }
}
