//! HTML formatter.
//!
//! Markup comes from small `minijinja` templates evaluated against
//! stringified cells. The environment escapes every interpolated value, so
//! cell text can never inject markup.

use minijinja::{context, AutoEscape, Environment};
use once_cell::sync::Lazy;

use crate::data::Table;
use crate::options::RenderOptions;
use crate::render::{Formatter, RenderContext, Stage};
use crate::Result;

const TITLE: &str = "<h1>{{ title }}</h1>\n";

const GROUP_NAME: &str = "<h2>{{ name }}</h2>\n";

const TABLE_OPEN: &str = "<table>
{% if headers %}
\t<tr>
{% for header in headers %}
\t\t<th>{{ header }}</th>
{% endfor %}
\t</tr>
{% endif %}
";

const ROWS: &str = "{% for row in rows %}
\t<tr>
{% for cell in row %}
\t\t<td>{{ cell }}</td>
{% endfor %}
\t</tr>
{% endfor %}
";

const TABLE_CLOSE: &str = "</table>\n";

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env
});

#[derive(Debug, Default)]
pub struct HtmlFormatter {
    output: String,
}

impl HtmlFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_title(&mut self, options: &RenderOptions) -> Result<()> {
        if let Some(title) = &options.title {
            self.output
                .push_str(&TEMPLATES.render_str(TITLE, context!(title))?);
        }
        Ok(())
    }

    fn write_group_name(&mut self, name: &str, options: &RenderOptions) -> Result<()> {
        if options.show_group_headers {
            self.output
                .push_str(&TEMPLATES.render_str(GROUP_NAME, context!(name))?);
        }
        Ok(())
    }

    fn open_table(&mut self, table: &Table, options: &RenderOptions) -> Result<()> {
        let headers: &[String] = if options.show_table_headers {
            table.column_names()
        } else {
            &[]
        };
        self.output
            .push_str(&TEMPLATES.render_str(TABLE_OPEN, context!(headers))?);
        Ok(())
    }

    fn write_rows(&mut self, rows: Vec<Vec<String>>) -> Result<()> {
        self.output
            .push_str(&TEMPLATES.render_str(ROWS, context!(rows))?);
        Ok(())
    }

    fn write_table(&mut self, table: &Table, options: &RenderOptions) -> Result<()> {
        self.open_table(table, options)?;
        self.write_rows(table.iter().map(|r| r.to_strings()).collect())?;
        self.output.push_str(TABLE_CLOSE);
        Ok(())
    }
}

impl Formatter for HtmlFormatter {
    fn supports(&self, stage: Stage) -> bool {
        !matches!(stage, Stage::GroupFooter | Stage::GroupingFooter)
    }

    fn build(&mut self, stage: Stage, ctx: &RenderContext<'_>) -> Result<()> {
        let options = ctx.options;
        match stage {
            Stage::TableHeader => {
                self.write_title(options)?;
                self.open_table(ctx.data.table()?, options)?;
            }
            Stage::TableBody => {
                let table = ctx.data.table()?;
                self.write_rows(table.iter().map(|r| r.to_strings()).collect())?;
            }
            Stage::TableFooter => self.output.push_str(TABLE_CLOSE),
            Stage::Row => self.write_rows(vec![ctx.data.record()?.to_strings()])?,
            Stage::GroupHeader => {
                self.write_title(options)?;
                self.write_group_name(&ctx.data.group()?.name, options)?;
            }
            Stage::GroupBody => self.write_table(ctx.data.table()?, options)?,
            Stage::GroupingHeader => self.write_title(options)?,
            Stage::GroupingBody => {
                for group in ctx.data.grouping()?.iter() {
                    self.write_group_name(&group.name, options)?;
                    self.write_table(&group.table, options)?;
                }
            }
            Stage::GroupFooter | Stage::GroupingFooter => {}
        }
        Ok(())
    }

    fn into_output(self: Box<Self>) -> Vec<u8> {
        self.output.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Group, Record, RenderOptions, Table};

    fn html(data: crate::render::Data<'_>, options: &RenderOptions) -> String {
        crate::render(data, "html", options)
            .unwrap()
            .into_string()
            .unwrap()
    }

    #[test]
    fn test_table() {
        let table = Table::from_rows(["a", "b"], [[1, 2]]).unwrap();
        assert_eq!(
            table.to_html().unwrap(),
            "<table>\n\
             \t<tr>\n\
             \t\t<th>a</th>\n\
             \t\t<th>b</th>\n\
             \t</tr>\n\
             \t<tr>\n\
             \t\t<td>1</td>\n\
             \t\t<td>2</td>\n\
             \t</tr>\n\
             </table>\n"
        );
    }

    #[test]
    fn test_escapes_cells() {
        let table = Table::from_rows(["<b>"], [["a & b"]]).unwrap();
        let out = table.to_html().unwrap();
        assert!(out.contains("<th>&lt;b&gt;</th>"));
        assert!(out.contains("<td>a &amp; b</td>"));
    }

    #[test]
    fn test_title_and_hidden_headers() {
        let table = Table::from_rows(["a"], [[1]]).unwrap();
        let out = html(
            (&table).into(),
            &RenderOptions::new().title("Report").show_table_headers(false),
        );
        assert!(out.starts_with("<h1>Report</h1>\n<table>\n\t<tr>\n\t\t<td>1</td>"));
        assert!(!out.contains("<th>"));
    }

    #[test]
    fn test_row() {
        let record = Record::new(["x"]);
        assert_eq!(
            html((&record).into(), &RenderOptions::default()),
            "\t<tr>\n\t\t<td>x</td>\n\t</tr>\n"
        );
    }

    #[test]
    fn test_group_and_grouping() {
        let group = Group::new("Q1", Table::from_rows(["n"], [[1]]).unwrap());
        let out = html((&group).into(), &RenderOptions::default());
        assert!(out.starts_with("<h2>Q1</h2>\n<table>\n"));
        assert!(out.ends_with("</table>\n"));

        let table = Table::from_rows(["k", "v"], [["x", "1"], ["y", "2"]]).unwrap();
        let grouping = table.group_by("k").unwrap();
        let out = html((&grouping).into(), &RenderOptions::default());
        assert_eq!(out.matches("<table>").count(), 2);
        assert!(out.find("<h2>x</h2>").unwrap() < out.find("<h2>y</h2>").unwrap());
    }
}
