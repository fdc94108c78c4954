//! Built-in formatters.
//!
//! | format | table | row | group | grouping |
//! |--------|-------|-----|-------|----------|
//! | text   | yes   | yes | yes   | yes      |
//! | csv    | yes   | yes | yes   | yes      |
//! | html   | yes   | yes | yes   | yes      |
//! | json   | yes   | yes | yes   | yes      |
//! | pdf    | yes   | no  | yes   | yes      |
//!
//! The [`table`] module holds the fixed-width layout shared by the text and
//! PDF formatters.

pub mod csv;
pub mod html;
pub mod json;
pub mod pdf;
pub mod table;
pub mod text;

pub use self::csv::CsvFormatter;
pub use html::HtmlFormatter;
pub use json::JsonFormatter;
pub use pdf::PdfFormatter;
pub use table::DisplayTable;
pub use text::TextFormatter;

use crate::render::{Formatter, Registry, RendererKind};

fn text() -> Box<dyn Formatter> {
    Box::new(TextFormatter::new())
}

fn csv() -> Box<dyn Formatter> {
    Box::new(CsvFormatter::new())
}

fn html() -> Box<dyn Formatter> {
    Box::new(HtmlFormatter::new())
}

fn json() -> Box<dyn Formatter> {
    Box::new(JsonFormatter::new())
}

fn pdf() -> Box<dyn Formatter> {
    Box::new(PdfFormatter::new())
}

/// Register every built-in formatter.
pub fn register_builtin(registry: &mut Registry) {
    registry.register_all(&RendererKind::ALL, "text", text);
    registry.register_all(&RendererKind::ALL, "csv", csv);
    registry.register_all(&RendererKind::ALL, "html", html);
    registry.register_all(&RendererKind::ALL, "json", json);
    registry.register_all(
        &[RendererKind::Table, RendererKind::Group, RendererKind::Grouping],
        "pdf",
        pdf,
    );
}
