//! DataFrame: an ordered collection of equally long, uniquely named columns

mod display;

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashSet;
use std::rc::Rc;

use log::debug;

use crate::column::Column;
use crate::error::{Error, Result};
use crate::value::{Value, ValueType};

pub use self::display::DisplayOptions;

/// Shared handle to a column's storage.
///
/// Frames produced by [`DataFrame::select`] without a deep copy hold handles
/// to the same storage as their source, so appends through either frame are
/// visible in both.
#[derive(Debug, Clone)]
pub struct ColumnHandle(Rc<RefCell<Column>>);

impl ColumnHandle {
    pub fn new(column: Column) -> Self {
        ColumnHandle(Rc::new(RefCell::new(column)))
    }

    pub fn borrow(&self) -> Ref<'_, Column> {
        self.0.borrow()
    }

    /// Mutable access, failing with `ColumnBusy` while any other borrow of
    /// the same storage is alive.
    pub(crate) fn try_borrow_mut(&self) -> Result<RefMut<'_, Column>> {
        self.0
            .try_borrow_mut()
            .map_err(|_| {
                let name = self
                    .0
                    .try_borrow()
                    .map(|c| c.name().to_string())
                    .unwrap_or_default();
                Error::ColumnBusy(name)
            })
    }

    /// Whether both handles point at the same storage
    pub fn shares_storage_with(&self, other: &ColumnHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Independent copy of the column behind this handle
    pub fn deep_clone(&self) -> Self {
        ColumnHandle::new(self.borrow().clone())
    }
}

/// DataFrame構造体: 型付き列の順序付きコレクション
#[derive(Debug, Default)]
pub struct DataFrame {
    columns: Vec<ColumnHandle>,
}

impl DataFrame {
    /// 空のDataFrameを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty frame from parallel name and type lists
    pub fn with_schema<S: AsRef<str>>(names: &[S], types: &[ValueType]) -> Result<Self> {
        if names.len() != types.len() {
            return Err(Error::LengthMismatch {
                expected: names.len(),
                actual: types.len(),
            });
        }

        let mut df = Self::new();
        for (name, value_type) in names.iter().zip(types) {
            df.push_column(ColumnHandle::new(Column::new(name.as_ref(), *value_type)))?;
        }
        Ok(df)
    }

    /// Creates a frame from owned columns, which must all have one length
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut df = Self::new();
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(Error::LengthMismatch {
                    expected,
                    actual: bad.len(),
                });
            }
        }
        for column in columns {
            df.push_column(ColumnHandle::new(column))?;
        }
        Ok(df)
    }

    fn push_column(&mut self, handle: ColumnHandle) -> Result<()> {
        let name = handle.borrow().name().to_string();
        if self.contains_column(&name) {
            return Err(Error::DuplicateColumnName(name));
        }
        self.columns.push(handle);
        Ok(())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows, 0 for a frame without columns
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| c.borrow().name().to_string())
            .collect()
    }

    pub fn column_types(&self) -> Vec<ValueType> {
        self.columns.iter().map(|c| c.borrow().value_type()).collect()
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.borrow().name() == name)
    }

    /// 列名で列を取得
    pub fn column(&self, name: &str) -> Option<Ref<'_, Column>> {
        self.position(name).map(|i| self.columns[i].borrow())
    }

    /// Shared handle to the named column's storage
    pub fn column_handle(&self, name: &str) -> Option<ColumnHandle> {
        self.position(name).map(|i| self.columns[i].clone())
    }

    /// Appends one value to every column.
    ///
    /// The row is validated in full before any column is touched: a wrong
    /// value count, a value whose type differs from its column, or a column
    /// still borrowed through [`DataFrame::column`] rejects the whole row and
    /// leaves the frame unchanged.
    pub fn add_row(&mut self, values: Vec<Value>) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(Error::LengthMismatch {
                expected: self.columns.len(),
                actual: values.len(),
            });
        }

        let mut targets = self
            .columns
            .iter()
            .map(ColumnHandle::try_borrow_mut)
            .collect::<Result<Vec<_>>>()?;
        for (column, value) in targets.iter().zip(&values) {
            column.check(value)?;
        }

        for (column, value) in targets.iter_mut().zip(values) {
            column.values.push(value);
        }
        Ok(())
    }

    /// Row count after checking that every column has it.
    ///
    /// Appending through a frame from `select(.., false)` grows only the
    /// shared columns, which leaves the source ragged; this reports that
    /// as `LengthMismatch`.
    pub fn checked_row_count(&self) -> Result<usize> {
        let rows = self.row_count();
        for column in &self.columns {
            let len = column.borrow().len();
            if len != rows {
                return Err(Error::LengthMismatch {
                    expected: rows,
                    actual: len,
                });
            }
        }
        Ok(rows)
    }

    /// 行を取得
    pub fn get_row(&self, index: usize) -> Result<Vec<Value>> {
        let size = self.row_count();
        if index >= size {
            return Err(Error::IndexOutOfBounds { index, size });
        }
        self.columns
            .iter()
            .map(|c| c.borrow().get(index).cloned())
            .collect()
    }

    /// Iterates rows as owned value tuples.
    ///
    /// A ragged frame yields a single `LengthMismatch` error and nothing
    /// else.
    pub fn rows(&self) -> impl Iterator<Item = Result<Vec<Value>>> + '_ {
        let (rows, shape_error) = match self.checked_row_count() {
            Ok(rows) => (rows, None),
            Err(e) => (0, Some(e)),
        };
        shape_error
            .map(Err)
            .into_iter()
            .chain((0..rows).map(move |i| self.get_row(i)))
    }

    /// Projects the named columns, in the given order, into a new frame.
    ///
    /// With `deep_copy` false the new frame aliases the source columns.
    pub fn select<S: AsRef<str>>(&self, names: &[S], deep_copy: bool) -> Result<DataFrame> {
        let mut seen = HashSet::with_capacity(names.len());
        let mut output = DataFrame::new();

        for name in names {
            let name = name.as_ref();
            if !seen.insert(name) {
                return Err(Error::DuplicateColumnName(name.to_string()));
            }
            let handle = self
                .column_handle(name)
                .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
            output.columns.push(if deep_copy {
                handle.deep_clone()
            } else {
                handle
            });
        }

        debug!(
            "selected {} of {} columns (deep_copy={})",
            output.column_count(),
            self.column_count(),
            deep_copy
        );
        Ok(output)
    }

    /// Independent copy of the whole frame
    pub fn deep_clone(&self) -> DataFrame {
        DataFrame {
            columns: self.columns.iter().map(ColumnHandle::deep_clone).collect(),
        }
    }

    /// Frame with this frame's schema and no rows
    pub fn empty_like(&self) -> DataFrame {
        DataFrame {
            columns: self
                .columns
                .iter()
                .map(|c| {
                    let c = c.borrow();
                    ColumnHandle::new(Column::new(c.name(), c.value_type()))
                })
                .collect(),
        }
    }

    /// One-row frame holding row `index`, or an empty frame with the same
    /// schema when `index` is out of range.
    pub fn row_at(&self, index: usize) -> DataFrame {
        if index >= self.row_count() {
            return self.empty_like();
        }
        self.slice(index as isize, index as isize)
    }

    /// Rows `max(from, 0)..=min(to, row_count - 1)` as a new frame.
    pub fn slice(&self, from: isize, to: isize) -> DataFrame {
        let start = from.max(0) as usize;
        let rows = self.row_count();
        if to < 0 || rows == 0 || start >= rows {
            return self.empty_like();
        }
        let end = (to as usize).min(rows - 1);
        if start > end {
            return self.empty_like();
        }

        DataFrame {
            columns: self
                .columns
                .iter()
                .map(|c| {
                    let c = c.borrow();
                    ColumnHandle::new(Column {
                        name: c.name.clone(),
                        value_type: c.value_type,
                        // iterator form stays in bounds on a ragged frame
                        values: c
                            .values
                            .iter()
                            .skip(start)
                            .take(end - start + 1)
                            .cloned()
                            .collect(),
                    })
                })
                .collect(),
        }
    }
}

/// Frames are equal when their names, types and elements match.
impl PartialEq for DataFrame {
    fn eq(&self, other: &Self) -> bool {
        self.columns.len() == other.columns.len()
            && self
                .columns
                .iter()
                .zip(&other.columns)
                .all(|(a, b)| *a.borrow() == *b.borrow())
    }
}
