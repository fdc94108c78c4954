//! Groups and groupings.
//!
//! A [`Group`] is a table with a name. A [`Grouping`] splits a table by the
//! values of one column into groups, kept in the order each value is first
//! seen. The grouping column itself is dropped from every group's table,
//! since its value is already the group's name.

use serde::Serialize;

use super::table::Table;
use crate::{RenderError, Result};

/// A named table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub name: String,
    #[serde(flatten)]
    pub table: Table,
}

impl Group {
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Group {
            name: name.into(),
            table,
        }
    }
}

/// Groups of a table keyed by one column's values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grouping {
    grouped_by: String,
    groups: Vec<Group>,
}

impl Grouping {
    /// Split `table` by the display value of column `by`.
    pub fn new(table: &Table, by: &str) -> Result<Self> {
        let index = table.column_index(by)?;
        let remaining: Vec<String> = table
            .column_names()
            .iter()
            .filter(|c| c.as_str() != by)
            .cloned()
            .collect();
        if remaining.is_empty() && !table.is_empty() {
            return Err(RenderError::MalformedData(format!(
                "cannot group by '{}': it is the only column",
                by
            )));
        }

        let mut groups: Vec<Group> = Vec::new();
        for record in table {
            let key = record.values()[index].to_string();
            let values = record
                .values()
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, v)| v.clone());
            let position = match groups.iter().position(|g| g.name == key) {
                Some(position) => position,
                None => {
                    groups.push(Group::new(key, Table::new(remaining.iter().cloned())?));
                    groups.len() - 1
                }
            };
            groups[position].table.push(values)?;
        }

        log::trace!("grouped {} rows by '{}' into {} groups", table.len(), by, groups.len());
        Ok(Grouping {
            grouped_by: by.to_string(),
            groups,
        })
    }

    /// Name of the column the table was grouped by.
    pub fn grouped_by(&self) -> &str {
        &self.grouped_by
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    /// Column names shared by every group's table.
    pub fn column_names(&self) -> Vec<String> {
        self.groups
            .first()
            .map(|g| g.table.column_names().to_vec())
            .unwrap_or_default()
    }
}

impl Table {
    /// Split this table into groups by one column.
    pub fn group_by(&self, column: &str) -> Result<Grouping> {
        Grouping::new(self, column)
    }
}
