//! The formatter plugin interface.
//!
//! A formatter turns one kind of data into one output format. It declares
//! which stages it implements through [`Formatter::supports`]; the renderer
//! skips every stage the formatter does not support. Each render call gets a
//! fresh formatter, which owns its output buffer for the duration of that
//! call.

use crate::data::{Group, Grouping, Record, Table};
use crate::options::{OptionName, RenderOptions};
use crate::{RenderError, Result};

use super::stage::{RendererKind, Stage};

/// Borrowed view of the data being rendered.
#[derive(Debug, Clone, Copy)]
pub enum Data<'a> {
    Table(&'a Table),
    Row(&'a Record),
    Group(&'a Group),
    Grouping(&'a Grouping),
}

impl<'a> Data<'a> {
    /// The renderer that naturally handles this data.
    pub fn kind(&self) -> RendererKind {
        match *self {
            Data::Table(_) => RendererKind::Table,
            Data::Row(_) => RendererKind::Row,
            Data::Group(_) => RendererKind::Group,
            Data::Grouping(_) => RendererKind::Grouping,
        }
    }

    fn describe(&self) -> &'static str {
        self.kind().name()
    }

    /// The table to render. A group yields its table.
    pub fn table(&self) -> Result<&'a Table> {
        match *self {
            Data::Table(table) => Ok(table),
            Data::Group(group) => Ok(&group.table),
            other => Err(RenderError::MalformedData(format!(
                "expected a table, got a {}",
                other.describe()
            ))),
        }
    }

    pub fn record(&self) -> Result<&'a Record> {
        match *self {
            Data::Row(record) => Ok(record),
            other => Err(RenderError::MalformedData(format!(
                "expected a row, got a {}",
                other.describe()
            ))),
        }
    }

    pub fn group(&self) -> Result<&'a Group> {
        match *self {
            Data::Group(group) => Ok(group),
            other => Err(RenderError::MalformedData(format!(
                "expected a group, got a {}",
                other.describe()
            ))),
        }
    }

    pub fn grouping(&self) -> Result<&'a Grouping> {
        match *self {
            Data::Grouping(grouping) => Ok(grouping),
            other => Err(RenderError::MalformedData(format!(
                "expected a grouping, got a {}",
                other.describe()
            ))),
        }
    }
}

impl<'a> From<&'a Table> for Data<'a> {
    fn from(table: &'a Table) -> Self {
        Data::Table(table)
    }
}

impl<'a> From<&'a Record> for Data<'a> {
    fn from(record: &'a Record) -> Self {
        Data::Row(record)
    }
}

impl<'a> From<&'a Group> for Data<'a> {
    fn from(group: &'a Group) -> Self {
        Data::Group(group)
    }
}

impl<'a> From<&'a Grouping> for Data<'a> {
    fn from(grouping: &'a Grouping) -> Self {
        Data::Grouping(grouping)
    }
}

/// Everything a formatter sees during one render call.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub renderer: RendererKind,
    pub format: &'a str,
    pub data: Data<'a>,
    pub options: &'a RenderOptions,
}

/// A format plugin.
pub trait Formatter {
    /// Capability query: does this formatter build `stage`?
    fn supports(&self, stage: Stage) -> bool;

    /// Options this formatter cannot render without.
    fn required_options(&self) -> &[OptionName] {
        &[]
    }

    /// Runs once before any stage, for renderers that declare a prepare hook.
    fn prepare(&mut self, _ctx: &RenderContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Append the output of one stage to the buffer.
    fn build(&mut self, stage: Stage, ctx: &RenderContext<'_>) -> Result<()>;

    /// Runs once after all stages, for renderers that declare a finalize
    /// hook. Returning bytes replaces the accumulated output.
    fn finalize(&mut self, _ctx: &RenderContext<'_>) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    /// Hand over the accumulated output.
    fn into_output(self: Box<Self>) -> Vec<u8>;
}

/// Constructor stored in the registry; one call per render.
pub type FormatterFactory = fn() -> Box<dyn Formatter>;
