//! Render dispatch: stages, renderers, the formatter interface and the
//! engine that ties them together.
//!
//! ## Example
//!
//! ```rust
//! use tabrenderlib::{render, RenderOptions, Table};
//!
//! let table = Table::from_rows(["a", "b"], [[1, 2], [3, 4]]).unwrap();
//! let csv = render(&table, "csv", &RenderOptions::default()).unwrap();
//! assert_eq!(csv.into_string().unwrap(), "a,b\n1,2\n3,4\n");
//! ```

pub mod engine;
pub mod formatter;
pub mod stage;

pub use engine::{default_engine, render, Engine, Registry, Rendered};
pub use formatter::{Data, Formatter, FormatterFactory, RenderContext};
pub use stage::{RendererKind, Stage};
