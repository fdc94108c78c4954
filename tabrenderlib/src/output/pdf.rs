//! PDF formatter.
//!
//! Stages collect monospace text lines; finalize lays them out top to
//! bottom in Courier with a fixed leading, starting a new page whenever the
//! current one is full, and returns the serialized document.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::data::Table;
use crate::options::RenderOptions;
use crate::render::{Formatter, RenderContext, Stage};
use crate::Result;

use super::table::{fit_to_width, DisplayTable};

/// Page margin on every side, in points.
const MARGIN: f32 = 36.0;
/// Courier glyph advance as a fraction of the font size.
const GLYPH_WIDTH: f32 = 0.6;
const LINE_SPACING: f32 = 1.2;

#[derive(Debug, Clone, PartialEq)]
struct Line {
    text: String,
    bold: bool,
}

#[derive(Debug, Default)]
pub struct PdfFormatter {
    lines: Vec<Line>,
}

impl PdfFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, text: impl Into<String>, bold: bool, options: &RenderOptions) {
        let text = text.into();
        let text = if options.ignore_table_width {
            text
        } else {
            fit_to_width(&text, chars_per_line(options))
        };
        self.lines.push(Line { text, bold });
    }

    fn blank(&mut self) {
        self.lines.push(Line {
            text: String::new(),
            bold: false,
        });
    }

    fn write_title(&mut self, options: &RenderOptions) {
        if let Some(title) = &options.title {
            self.push(title.as_str(), true, options);
            self.blank();
        }
    }

    fn write_group_name(&mut self, name: &str, options: &RenderOptions) {
        if options.show_group_headers {
            self.push(format!("{}:", name), true, options);
            self.blank();
        }
    }

    fn write_header(&mut self, grid: &DisplayTable, options: &RenderOptions) {
        if grid.has_columns() && options.show_table_headers {
            self.push(grid.rule(), false, options);
            self.push(grid.header_line(), true, options);
        }
    }

    fn write_body(&mut self, grid: &DisplayTable, options: &RenderOptions) {
        for line in grid.body_lines(options.alignment) {
            self.push(line, false, options);
        }
    }

    fn write_table(&mut self, table: &Table, options: &RenderOptions) {
        let grid = DisplayTable::from_table(table);
        self.write_header(&grid, options);
        self.write_body(&grid, options);
    }
}

impl Formatter for PdfFormatter {
    fn supports(&self, stage: Stage) -> bool {
        matches!(
            stage,
            Stage::TableHeader
                | Stage::TableBody
                | Stage::GroupHeader
                | Stage::GroupBody
                | Stage::GroupingHeader
                | Stage::GroupingBody
        )
    }

    fn build(&mut self, stage: Stage, ctx: &RenderContext<'_>) -> Result<()> {
        let options = ctx.options;
        match stage {
            Stage::TableHeader => {
                self.write_title(options);
                let grid = DisplayTable::from_table(ctx.data.table()?);
                self.write_header(&grid, options);
            }
            Stage::TableBody => {
                let grid = DisplayTable::from_table(ctx.data.table()?);
                self.write_body(&grid, options);
            }
            Stage::GroupHeader => {
                self.write_title(options);
                self.write_group_name(&ctx.data.group()?.name, options);
            }
            Stage::GroupBody => self.write_table(ctx.data.table()?, options),
            Stage::GroupingHeader => self.write_title(options),
            Stage::GroupingBody => {
                for group in ctx.data.grouping()?.iter() {
                    self.write_group_name(&group.name, options);
                    self.write_table(&group.table, options);
                    self.blank();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn finalize(&mut self, ctx: &RenderContext<'_>) -> Result<Option<Vec<u8>>> {
        let options = ctx.options;
        let (width, height) = options.paper_size.dimensions();
        let font_size = options.font_size;

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let regular = doc.add_object(font("Courier"));
        let bold = doc.add_object(font("Courier-Bold"));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => regular, "F2" => bold },
        });

        let pages = paginate(&self.lines, lines_per_page(options));
        log::debug!("laying out {} lines on {} pages", self.lines.len(), pages.len());

        let mut kids = Vec::with_capacity(pages.len());
        for page in pages {
            let content = Content {
                operations: page_operations(page, font_size, height),
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if let Some(title) = &options.title {
            let info_id: ObjectId = doc.add_object(dictionary! {
                "Title" => Object::string_literal(encode(title)),
            });
            doc.trailer.set("Info", info_id);
        }

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(Some(bytes))
    }

    fn into_output(self: Box<Self>) -> Vec<u8> {
        let mut text = String::new();
        for line in self.lines {
            text.push_str(&line.text);
            text.push('\n');
        }
        text.into_bytes()
    }
}

fn font(name: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => name,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn line_height(options: &RenderOptions) -> f32 {
    options.font_size * LINE_SPACING
}

/// Text lines that fit between the top and bottom margins.
fn lines_per_page(options: &RenderOptions) -> usize {
    let (_, height) = options.paper_size.dimensions();
    let usable = height - 2.0 * MARGIN;
    ((usable / line_height(options)).floor() as usize).max(1)
}

/// Characters of Courier that fit between the side margins.
fn chars_per_line(options: &RenderOptions) -> usize {
    let (width, _) = options.paper_size.dimensions();
    let usable = width - 2.0 * MARGIN;
    ((usable / (GLYPH_WIDTH * options.font_size)).floor() as usize).max(2)
}

/// Split lines into pages. An empty document still gets one blank page.
fn paginate(lines: &[Line], per_page: usize) -> Vec<&[Line]> {
    if lines.is_empty() {
        return vec![&[]];
    }
    lines.chunks(per_page).collect()
}

fn page_operations(lines: &[Line], font_size: f32, page_height: f32) -> Vec<Operation> {
    let leading = font_size * LINE_SPACING;
    let mut ops = vec![
        Operation::new("BT", vec![]),
        Operation::new("TL", vec![leading.into()]),
        Operation::new("Td", vec![MARGIN.into(), (page_height - MARGIN - font_size).into()]),
    ];

    let mut current_bold = None;
    for line in lines {
        if current_bold != Some(line.bold) {
            let name = if line.bold { "F2" } else { "F1" };
            ops.push(Operation::new("Tf", vec![name.into(), font_size.into()]));
            current_bold = Some(line.bold);
        }
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode(&line.text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("T*", vec![]));
    }

    ops.push(Operation::new("ET", vec![]));
    ops
}

/// WinAnsi bytes for `text`; characters outside Latin-1 become `?`.
fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
