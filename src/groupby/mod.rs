//! DataFrameのグループ化と集計機能

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::column::Reduction;
use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::value::{Value, ValueType};

/// グループキー: グループ化列の値の組
pub type GroupKey = Vec<Value>;

/// Caller-supplied transformation handed the whole source frame by
/// [`DataFrameGroupBy::apply`].
pub trait FrameTransform {
    fn transform(&self, df: &DataFrame) -> Result<DataFrame>;
}

impl<F> FrameTransform for F
where
    F: Fn(&DataFrame) -> Result<DataFrame>,
{
    fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        self(df)
    }
}

/// グループ化結果を表す構造体
///
/// Partitions are kept in order of first appearance; rows inside a
/// partition keep their source order.
#[derive(Debug)]
pub struct DataFrameGroupBy<'a> {
    /// 元のデータフレーム
    source: &'a DataFrame,
    /// グループ化キー列
    key_columns: Vec<String>,
    /// グループごとの部分データフレーム
    groups: Vec<(GroupKey, DataFrame)>,
    /// キーから`groups`の位置へのマッピング
    lookup: HashMap<GroupKey, usize>,
}

impl DataFrame {
    /// データフレームをグループ化
    ///
    /// # Arguments
    /// * `columns` - グループ化するための列名 (順序がキーの順序になる)
    ///
    /// # Returns
    /// * `Result<DataFrameGroupBy>` - グループ化結果
    pub fn group_by<I, S>(&self, columns: I) -> Result<DataFrameGroupBy<'_>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key_columns: Vec<String> = columns
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();

        if key_columns.is_empty() {
            return Err(Error::InvalidInput(
                "group_by needs at least one key column".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(key_columns.len());
        let mut handles = Vec::with_capacity(key_columns.len());
        for name in &key_columns {
            if !seen.insert(name.as_str()) {
                return Err(Error::DuplicateColumnName(name.clone()));
            }
            let handle = self
                .column_handle(name)
                .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
            handles.push(handle);
        }

        let mut groups: Vec<(GroupKey, DataFrame)> = Vec::new();
        let mut lookup: HashMap<GroupKey, usize> = HashMap::new();

        let rows = self.checked_row_count()?;
        for row_idx in 0..rows {
            let key = handles
                .iter()
                .map(|h| h.borrow().get(row_idx).cloned())
                .collect::<Result<GroupKey>>()?;

            match lookup.get(&key).copied() {
                Some(slot) => groups[slot].1.add_row(self.get_row(row_idx)?)?,
                None => {
                    lookup.insert(key.clone(), groups.len());
                    groups.push((key, self.row_at(row_idx)));
                }
            }
        }

        debug!(
            "grouped {} rows by {:?} into {} groups",
            rows,
            key_columns,
            groups.len()
        );

        Ok(DataFrameGroupBy {
            source: self,
            key_columns,
            groups,
            lookup,
        })
    }
}

impl<'a> DataFrameGroupBy<'a> {
    /// グループ数を取得
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// グループ化に使用した列名
    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }

    /// Group keys in order of first appearance
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> + '_ {
        self.groups.iter().map(|(key, _)| key)
    }

    /// Partitions with their keys
    pub fn groups(&self) -> impl Iterator<Item = (&GroupKey, &DataFrame)> + '_ {
        self.groups.iter().map(|(key, df)| (key, df))
    }

    /// The partition for one key, if any row carries it
    pub fn get_group(&self, key: &[Value]) -> Option<&DataFrame> {
        self.lookup.get(key).map(|&slot| &self.groups[slot].1)
    }

    /// 各グループのサイズを返す (キー列 + `size` 列)
    pub fn size(&self) -> Result<DataFrame> {
        let (mut names, mut types) = self.key_schema()?;
        names.push("size".to_string());
        types.push(ValueType::Int);

        let mut output = DataFrame::with_schema(&names, &types)?;
        for (key, part) in &self.groups {
            let mut row = key.clone();
            row.push(Value::from_number(ValueType::Int, part.row_count())?);
            output.add_row(row)?;
        }
        Ok(output)
    }

    pub fn max(&self) -> Result<DataFrame> {
        self.aggregate(Reduction::Max)
    }

    pub fn min(&self) -> Result<DataFrame> {
        self.aggregate(Reduction::Min)
    }

    pub fn sum(&self) -> Result<DataFrame> {
        self.aggregate(Reduction::Sum)
    }

    pub fn mean(&self) -> Result<DataFrame> {
        self.aggregate(Reduction::Mean)
    }

    pub fn var(&self) -> Result<DataFrame> {
        self.aggregate(Reduction::Var)
    }

    pub fn std(&self) -> Result<DataFrame> {
        self.aggregate(Reduction::Std)
    }

    /// Reduces every partition to one row, leaving out non-numeric value
    /// columns exactly when the reduction needs arithmetic.
    pub fn aggregate(&self, op: Reduction) -> Result<DataFrame> {
        self.aggregate_with(op, op.drops_non_reducible())
    }

    /// Reduces every partition to one row.
    ///
    /// The output holds the key columns first, in key order, followed by the
    /// remaining source columns in source order. With `drop_non_reducible`
    /// set, text and date-time columns that are not keys are left out. A
    /// reduction error in any partition fails the whole aggregation.
    pub fn aggregate_with(&self, op: Reduction, drop_non_reducible: bool) -> Result<DataFrame> {
        let (mut names, mut types) = self.key_schema()?;

        let reduced: Vec<String> = self
            .source
            .column_names()
            .into_iter()
            .zip(self.source.column_types())
            .filter(|(name, value_type)| {
                !self.key_columns.contains(name)
                    && (!drop_non_reducible || value_type.is_numeric())
            })
            .map(|(name, value_type)| {
                names.push(name.clone());
                types.push(value_type);
                name
            })
            .collect();

        let mut rows = Vec::with_capacity(self.groups.len());
        for (key, part) in &self.groups {
            let mut row = key.clone();
            for name in &reduced {
                let column = part
                    .column(name)
                    .ok_or_else(|| Error::ColumnNotFound(name.clone()))?;
                let value = column
                    .reduce(op)?
                    .ok_or_else(|| Error::EmptyData(format!("{} of empty group", op)))?;
                row.push(value);
            }
            rows.push(row);
        }

        let mut output = DataFrame::with_schema(&names, &types)?;
        for row in rows {
            output.add_row(row)?;
        }

        debug!(
            "aggregated {} groups with {} over {} columns",
            self.groups.len(),
            op,
            reduced.len()
        );
        Ok(output)
    }

    /// Hands the whole source frame to `transform` and returns its result
    /// unchanged. No partitioning is involved.
    pub fn apply<T: FrameTransform + ?Sized>(&self, transform: &T) -> Result<DataFrame> {
        transform.transform(self.source)
    }

    fn key_schema(&self) -> Result<(Vec<String>, Vec<ValueType>)> {
        let types = self
            .key_columns
            .iter()
            .map(|name| {
                self.source
                    .column(name)
                    .map(|c| c.value_type())
                    .ok_or_else(|| Error::ColumnNotFound(name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok((self.key_columns.clone(), types))
    }
}
