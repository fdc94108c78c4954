//! Tables: ordered records sharing one column schema.
//!
//! The column list is held once, behind an `Arc`, and every record in the
//! table points at it. Operations that change columns (add, remove, rename,
//! reorder) rewrite the values of every record and hand all of them the new
//! column list, so records never disagree with their table about layout.

use serde::{Serialize, Serializer};
use std::ops::Range;
use std::sync::Arc;

use super::record::Record;
use super::value::Value;
use crate::{RenderError, Result};

/// Sort direction for [`Table::sort_rows_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

/// An ordered collection of records with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Arc<[String]>,
    rows: Vec<Record>,
}

impl Default for Table {
    fn default() -> Self {
        Table {
            columns: Arc::from(Vec::<String>::new()),
            rows: Vec::new(),
        }
    }
}

fn check_unique(columns: &[String]) -> Result<()> {
    for (i, name) in columns.iter().enumerate() {
        if columns[..i].contains(name) {
            return Err(RenderError::DuplicateColumn(name.clone()));
        }
    }
    Ok(())
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        check_unique(&columns)?;
        Ok(Table {
            columns: columns.into(),
            rows: Vec::new(),
        })
    }

    /// Create a table and append every row, validating shape.
    pub fn from_rows<C, S, R, I, V>(columns: C, rows: R) -> Result<Self>
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut table = Table::new(columns)?;
        for row in rows {
            table.push(row)?;
        }
        Ok(table)
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Record> {
        self.rows.get(index)
    }

    /// Mutable access to a row's values. The row's shape stays fixed.
    pub fn row_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.rows.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.rows.iter()
    }

    /// Position of a column, or an unknown-column error.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| RenderError::UnknownColumn(name.to_string()))
    }

    /// Append a row of values. The length must match the column count.
    pub fn push<I, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        if self.columns.is_empty() {
            return Err(RenderError::MalformedData(
                "a table with no columns cannot hold rows".to_string(),
            ));
        }
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.len() != self.columns.len() {
            return Err(RenderError::MalformedData(format!(
                "row {} has {} fields but the table has {} columns",
                self.rows.len() + 1,
                values.len(),
                self.columns.len()
            )));
        }
        self.rows
            .push(Record::from_parts(values, Arc::clone(&self.columns)));
        Ok(())
    }

    /// Append an existing record.
    ///
    /// Records with attribute names are matched to columns by name, in any
    /// order; positional records must match the column count.
    pub fn push_record(&mut self, record: Record) -> Result<()> {
        let Some(names) = record.attributes().map(|a| a.to_vec()) else {
            return self.push(record.into_values());
        };
        if names.len() != self.columns.len() {
            return Err(RenderError::MalformedData(format!(
                "record has {} attributes but the table has {} columns",
                names.len(),
                self.columns.len()
            )));
        }
        let mut values = record.into_values();
        let mut ordered = Vec::with_capacity(values.len());
        for column in self.columns.iter() {
            let index = names
                .iter()
                .position(|n| n == column)
                .ok_or_else(|| RenderError::UnknownColumn(column.clone()))?;
            ordered.push(std::mem::take(&mut values[index]));
        }
        self.push(ordered)
    }

    /// Values of one column, top to bottom.
    pub fn column(&self, name: &str) -> Result<Vec<&Value>> {
        let index = self.column_index(name)?;
        Ok(self.rows.iter().map(|r| &r.values()[index]).collect())
    }

    /// New table containing only the named columns, in the given order.
    pub fn project<I, S>(&self, names: I) -> Result<Table>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sub_table(names, 0..self.rows.len())
    }

    /// New table with the named columns and a range of rows.
    pub fn sub_table<I, S>(&self, names: I, rows: Range<usize>) -> Result<Table>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names.into_iter().map(|s| s.as_ref().to_string()).collect();
        let indices = names
            .iter()
            .map(|n| self.column_index(n))
            .collect::<Result<Vec<_>>>()?;
        let rows = self.rows.get(rows.clone()).ok_or_else(|| {
            RenderError::MalformedData(format!(
                "row range {}..{} out of bounds for {} rows",
                rows.start,
                rows.end,
                self.rows.len()
            ))
        })?;
        let mut table = Table::new(names)?;
        for record in rows {
            table.push(indices.iter().map(|&i| record.values()[i].clone()))?;
        }
        Ok(table)
    }

    /// New table with the rows matching `predicate`.
    pub fn filter<F>(&self, mut predicate: F) -> Table
    where
        F: FnMut(&Record) -> bool,
    {
        Table {
            columns: Arc::clone(&self.columns),
            rows: self.rows.iter().filter(|r| predicate(r)).cloned().collect(),
        }
    }

    /// Install a new column list and point every record at it.
    fn set_columns(&mut self, columns: Vec<String>) {
        self.columns = columns.into();
        for record in &mut self.rows {
            record.set_attributes(Arc::clone(&self.columns));
        }
    }

    /// Append a column, filling every row with `default`.
    pub fn add_column(&mut self, name: impl Into<String>, default: impl Into<Value>) -> Result<()> {
        let default = default.into();
        self.add_column_with(name, |_| default.clone())
    }

    /// Append a column computed from each existing row.
    pub fn add_column_with<F>(&mut self, name: impl Into<String>, mut compute: F) -> Result<()>
    where
        F: FnMut(&Record) -> Value,
    {
        let name = name.into();
        if self.columns.contains(&name) {
            return Err(RenderError::DuplicateColumn(name));
        }
        let computed: Vec<Value> = self.rows.iter().map(&mut compute).collect();
        for (record, value) in self.rows.iter_mut().zip(computed) {
            record.values_mut().push(value);
        }
        let mut columns = self.columns.to_vec();
        columns.push(name);
        self.set_columns(columns);
        Ok(())
    }

    /// Remove a column and return its values.
    ///
    /// The last column of a table that still has rows cannot be removed.
    pub fn remove_column(&mut self, name: &str) -> Result<Vec<Value>> {
        let index = self.column_index(name)?;
        if self.columns.len() == 1 && !self.rows.is_empty() {
            return Err(RenderError::MalformedData(format!(
                "cannot remove '{}': it is the only column of a table with {} rows",
                name,
                self.rows.len()
            )));
        }
        let removed = self
            .rows
            .iter_mut()
            .map(|r| r.values_mut().remove(index))
            .collect();
        let mut columns = self.columns.to_vec();
        columns.remove(index);
        self.set_columns(columns);
        Ok(removed)
    }

    pub fn rename_column(&mut self, old: &str, new: impl Into<String>) -> Result<()> {
        let new = new.into();
        let index = self.column_index(old)?;
        if old != new && self.columns.contains(&new) {
            return Err(RenderError::DuplicateColumn(new));
        }
        let mut columns = self.columns.to_vec();
        columns[index] = new;
        self.set_columns(columns);
        Ok(())
    }

    /// Rearrange columns. `names` must list every column exactly once.
    pub fn reorder<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names.into_iter().map(|s| s.as_ref().to_string()).collect();
        check_unique(&names)?;
        if names.len() != self.columns.len() {
            return Err(RenderError::MalformedData(format!(
                "reorder lists {} columns but the table has {}",
                names.len(),
                self.columns.len()
            )));
        }
        let indices = names
            .iter()
            .map(|n| self.column_index(n))
            .collect::<Result<Vec<_>>>()?;
        for record in &mut self.rows {
            let old = std::mem::take(record.values_mut());
            *record.values_mut() = indices.iter().map(|&i| old[i].clone()).collect();
        }
        self.set_columns(names);
        Ok(())
    }

    /// Stable sort of the rows by one column.
    pub fn sort_rows_by(&mut self, name: &str, order: Order) -> Result<()> {
        let index = self.column_index(name)?;
        self.rows.sort_by(|a, b| {
            let ord = a.values()[index].loose_cmp(&b.values()[index]);
            match order {
                Order::Ascending => ord,
                Order::Descending => ord.reverse(),
            }
        });
        Ok(())
    }

    /// Sum of the numeric cells of a column; other cells are skipped.
    pub fn sum(&self, name: &str) -> Result<f64> {
        Ok(self
            .column(name)?
            .into_iter()
            .filter_map(Value::as_f64)
            .sum())
    }

    /// Plain rows-of-values copy, for serialization.
    pub fn to_rows(&self) -> Vec<Vec<Value>> {
        self.rows.iter().map(Record::to_vec).collect()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[derive(Serialize)]
struct TableView<'a> {
    columns: &'a [String],
    rows: Vec<&'a [Value]>,
}

/// Serializes as `{ "columns": [...], "rows": [[...], ...] }`.
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        TableView {
            columns: &self.columns,
            rows: self.rows.iter().map(Record::values).collect(),
        }
        .serialize(serializer)
    }
}
