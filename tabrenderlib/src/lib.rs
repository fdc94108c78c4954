//! # tabrenderlib
//!
//! Tabular report rendering: load or build tables, reshape them, and render
//! them as text, CSV, HTML, PDF or JSON through pluggable formatters.
//!
//! ## Overview
//!
//! Rendering is split between two roles:
//!
//! - **Renderers** fix the lifecycle for one kind of data (table, row,
//!   group, grouping): an optional prepare hook, a sequence of stages such
//!   as `table_header`/`table_body`/`table_footer`, and an optional finalize
//!   hook.
//! - **Formatters** implement those stages for one output format. A
//!   formatter only builds the stages it supports; the rest are skipped.
//!
//! A [`Registry`] maps (renderer, format) pairs to formatter constructors.
//! The built-in formatters are registered in a process-wide default engine,
//! and custom formatters can be added to an [`Engine`] of your own.
//!
//! ## Data
//!
//! - **Value**: a loosely typed cell (null, bool, integer, float, text)
//! - **Record**: a row, addressable by position or column name
//! - **Table**: records sharing one ordered column list
//! - **Group / Grouping**: a named table, and a table split by one column
//!
//! ## Example
//!
//! ```rust
//! use tabrenderlib::{Order, RenderOptions, Table};
//!
//! let mut table = Table::from_rows(
//!     ["name", "qty"],
//!     [["pear", "3"], ["apple", "5"]],
//! ).unwrap();
//! table.sort_rows_by("name", Order::Ascending).unwrap();
//!
//! let text = table.to_text().unwrap();
//! assert!(text.starts_with("+-------------+\n| name  | qty |\n"));
//!
//! let html = table.render("html", &RenderOptions::new().title("Stock")).unwrap();
//! assert!(html.into_string().unwrap().starts_with("<h1>Stock</h1>"));
//!
//! let by_name = table.group_by("name").unwrap();
//! assert_eq!(by_name.len(), 2);
//! ```

pub mod data;
pub mod error;
pub mod options;
pub mod output;
pub mod render;

pub use data::{Group, Grouping, LoadOptions, Order, Record, Table, Value};
pub use error::RenderError;
pub use options::{
    parse_delimiter, Alignment, GroupingStyle, OptionName, PaperSize, RenderOptions,
};
pub use render::{
    default_engine, render, Data, Engine, Formatter, FormatterFactory, Registry, RenderContext,
    Rendered, RendererKind, Stage,
};

/// Result type for tabrenderlib operations
pub type Result<T> = std::result::Result<T, RenderError>;
