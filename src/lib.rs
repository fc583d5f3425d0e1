//! In-memory typed DataFrame
//!
//! Column-oriented storage of [`Value`]s, row and slice access, column
//! reductions and group-by aggregation.

pub mod column;
pub mod config;
pub mod dataframe;
pub mod error;
pub mod groupby;
pub mod io;
pub mod value;

// Re-export commonly used types
pub use column::{Column, Reduction};
pub use config::FrameConfig;
pub use dataframe::{ColumnHandle, DataFrame, DisplayOptions};
pub use error::{Error, FrameError, Result};
pub use groupby::{DataFrameGroupBy, FrameTransform, GroupKey};
pub use value::{Value, ValueType};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
