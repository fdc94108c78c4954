//! Plain-text formatter: bordered, fixed-width tables.

use crate::data::Table;
use crate::options::RenderOptions;
use crate::render::{Formatter, RenderContext, RendererKind, Stage};
use crate::Result;

use super::table::{fit_to_width, DisplayTable};

#[derive(Debug, Default)]
pub struct TextFormatter {
    output: String,
    grid: Option<DisplayTable>,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_line(&mut self, line: &str, options: &RenderOptions) {
        if options.ignore_table_width {
            self.output.push_str(line);
        } else {
            self.output
                .push_str(&fit_to_width(line, options.effective_width()));
        }
        self.output.push('\n');
    }

    fn push_lines(&mut self, lines: Vec<String>, options: &RenderOptions) {
        for line in lines {
            self.push_line(&line, options);
        }
    }

    fn write_title(&mut self, options: &RenderOptions) {
        if let Some(title) = &options.title {
            self.push_line(title, options);
            self.output.push('\n');
        }
    }

    fn write_group_name(&mut self, name: &str, options: &RenderOptions) {
        if options.show_group_headers {
            self.push_line(&format!("{}:", name), options);
            self.output.push('\n');
        }
    }

    fn write_table(&mut self, grid: &DisplayTable, options: &RenderOptions) {
        self.push_lines(grid.header_lines(options.show_table_headers), options);
        self.push_lines(grid.body_lines(options.alignment), options);
    }

    fn grid_for(&mut self, table: &Table) -> DisplayTable {
        self.grid
            .take()
            .unwrap_or_else(|| DisplayTable::from_table(table))
    }
}

impl Formatter for TextFormatter {
    fn supports(&self, stage: Stage) -> bool {
        matches!(
            stage,
            Stage::TableHeader
                | Stage::TableBody
                | Stage::Row
                | Stage::GroupHeader
                | Stage::GroupBody
                | Stage::GroupingHeader
                | Stage::GroupingBody
        )
    }

    fn prepare(&mut self, ctx: &RenderContext<'_>) -> Result<()> {
        if matches!(ctx.renderer, RendererKind::Table | RendererKind::Group) {
            self.grid = Some(DisplayTable::from_table(ctx.data.table()?));
        }
        Ok(())
    }

    fn build(&mut self, stage: Stage, ctx: &RenderContext<'_>) -> Result<()> {
        let options = ctx.options;
        match stage {
            Stage::TableHeader => {
                self.write_title(options);
                let grid = self.grid_for(ctx.data.table()?);
                self.push_lines(grid.header_lines(options.show_table_headers), options);
                self.grid = Some(grid);
            }
            Stage::TableBody => {
                let grid = self.grid_for(ctx.data.table()?);
                self.push_lines(grid.body_lines(options.alignment), options);
                self.grid = Some(grid);
            }
            Stage::Row => {
                let grid = DisplayTable::from_record(ctx.data.record()?);
                let line = grid.row_line(&grid.rows[0], options.alignment);
                self.push_line(&line, options);
            }
            Stage::GroupHeader => {
                let group = ctx.data.group()?;
                self.write_title(options);
                self.write_group_name(&group.name, options);
            }
            Stage::GroupBody => {
                let grid = self.grid_for(ctx.data.table()?);
                self.write_table(&grid, options);
            }
            Stage::GroupingHeader => self.write_title(options),
            Stage::GroupingBody => {
                for group in ctx.data.grouping()?.iter() {
                    self.write_group_name(&group.name, options);
                    self.write_table(&DisplayTable::from_table(&group.table), options);
                    self.output.push('\n');
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn into_output(self: Box<Self>) -> Vec<u8> {
        self.output.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use crate::{render, Group, Record, RenderOptions, Table, Value};

    fn sample() -> Table {
        Table::from_rows(["a", "b"], [[1, 2], [3, 4]]).unwrap()
    }

    fn text(data: crate::render::Data<'_>, options: &RenderOptions) -> String {
        render(data, "text", options).unwrap().into_string().unwrap()
    }

    #[test]
    fn test_bordered_table() {
        let out = text((&sample()).into(), &RenderOptions::default());
        assert_eq!(
            out,
            "+-------+\n\
             | a | b |\n\
             +-------+\n\
             | 1 | 2 |\n\
             | 3 | 4 |\n\
             +-------+\n"
        );
    }

    #[test]
    fn test_hidden_headers() {
        let out = text((&sample()).into(), &RenderOptions::new().show_table_headers(false));
        assert_eq!(out, "+-------+\n| 1 | 2 |\n| 3 | 4 |\n+-------+\n");
    }

    #[test]
    fn test_title_and_alignment() {
        let table = Table::from_rows(["name", "qty"], [vec![Value::from("pear"), Value::Int(7)]])
            .unwrap();
        let options = RenderOptions::new()
            .title("Fruit")
            .alignment(crate::Alignment::Right);
        let out = text((&table).into(), &options);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Fruit");
        assert_eq!(lines[1], "");
        assert_eq!(lines[3], "| name | qty |");
        assert_eq!(lines[5], "| pear |   7 |");
    }

    #[test]
    fn test_truncates_to_width() {
        let table = Table::from_rows(["long"], [["x".repeat(30)]]).unwrap();
        let out = text((&table).into(), &RenderOptions::new().table_width(10));
        for line in out.lines() {
            assert!(line.chars().count() <= 10, "{line}");
        }
        assert!(out.contains(">>"));

        let wide = text(
            (&table).into(),
            &RenderOptions::new().table_width(10).ignore_table_width(true),
        );
        assert!(!wide.contains(">>"));
    }

    #[test]
    fn test_no_columns() {
        let out = text((&Table::default()).into(), &RenderOptions::default());
        assert_eq!(out, "This table has no columns\n");
    }

    #[test]
    fn test_row() {
        let record = Record::new(["x", "yy"]);
        assert_eq!(text((&record).into(), &RenderOptions::default()), "| x | yy |\n");
    }

    #[test]
    fn test_group() {
        let group = Group::new("Fruit", sample());
        let out = text((&group).into(), &RenderOptions::default());
        assert!(out.starts_with("Fruit:\n\n+-------+\n| a | b |\n"));
    }

    #[test]
    fn test_grouping() {
        let table = Table::from_rows(
            ["k", "v"],
            [vec!["x", "1"], vec!["y", "2"], vec!["x", "3"]],
        )
        .unwrap();
        let grouping = table.group_by("k").unwrap();
        let out = text((&grouping).into(), &RenderOptions::default());
        let x = out.find("x:").unwrap();
        let y = out.find("y:").unwrap();
        assert!(x < y);
        assert!(out.contains("| 1 |\n| 3 |\n"));
    }
}
