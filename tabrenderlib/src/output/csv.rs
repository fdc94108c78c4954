//! CSV formatter.
//!
//! Quoting and escaping are left to the `csv` writer; this module only
//! decides which records are written for each stage.

use crate::data::{Grouping, Table};
use crate::options::{GroupingStyle, RenderOptions};
use crate::render::{Formatter, RenderContext, Stage};
use crate::Result;

#[derive(Debug, Default)]
pub struct CsvFormatter {
    output: Vec<u8>,
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_records<I>(&mut self, options: &RenderOptions, records: I) -> Result<()>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .flexible(true)
            .from_writer(&mut self.output);
        for record in records {
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_header(&mut self, table: &Table, options: &RenderOptions) -> Result<()> {
        if options.show_table_headers && table.column_count() > 0 {
            self.write_records(options, [table.column_names().to_vec()])?;
        }
        Ok(())
    }

    fn write_body(&mut self, table: &Table, options: &RenderOptions) -> Result<()> {
        self.write_records(options, table.iter().map(|r| r.to_strings()))
    }

    fn write_group_name(&mut self, name: &str, options: &RenderOptions) -> Result<()> {
        if options.show_group_headers {
            self.write_records(options, [vec![name.to_string()]])?;
        }
        Ok(())
    }

    /// One combined table with the group name as its first column.
    fn write_flattened(&mut self, grouping: &Grouping, options: &RenderOptions) -> Result<()> {
        let justified = options.grouping_style == GroupingStyle::Justified;
        let records = grouping.iter().flat_map(|group| {
            group.table.iter().enumerate().map(move |(i, record)| {
                let name = if justified && i > 0 {
                    String::new()
                } else {
                    group.name.clone()
                };
                std::iter::once(name).chain(record.to_strings()).collect()
            })
        });
        self.write_records(options, records)
    }
}

impl Formatter for CsvFormatter {
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

    fn build(&mut self, stage: Stage, ctx: &RenderContext<'_>) -> Result<()> {
        let options = ctx.options;
        match stage {
            Stage::TableHeader => self.write_header(ctx.data.table()?, options)?,
            Stage::TableBody => self.write_body(ctx.data.table()?, options)?,
            Stage::Row => self.write_records(options, [ctx.data.record()?.to_strings()])?,
            Stage::GroupHeader => self.write_group_name(&ctx.data.group()?.name, options)?,
            Stage::GroupBody => {
                let table = ctx.data.table()?;
                self.write_header(table, options)?;
                self.write_body(table, options)?;
            }
            Stage::GroupingHeader => {
                let grouping = ctx.data.grouping()?;
                if options.grouping_style != GroupingStyle::Inline && options.show_table_headers {
                    let header = std::iter::once(grouping.grouped_by().to_string())
                        .chain(grouping.column_names())
                        .collect();
                    self.write_records(options, [header])?;
                }
            }
            Stage::GroupingBody => {
                let grouping = ctx.data.grouping()?;
                match options.grouping_style {
                    GroupingStyle::Inline => {
                        for group in grouping.iter() {
                            self.write_group_name(&group.name, options)?;
                            self.write_header(&group.table, options)?;
                            self.write_body(&group.table, options)?;
                            self.output.push(b'\n');
                        }
                    }
                    GroupingStyle::Justified | GroupingStyle::Raw => {
                        self.write_flattened(grouping, options)?
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn into_output(self: Box<Self>) -> Vec<u8> {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use crate::{Group, GroupingStyle, Record, RenderOptions, Table};

    fn sales() -> Table {
        Table::from_rows(
            ["region", "item"],
            [
                vec!["north", "apple"],
                vec!["south", "pear"],
                vec!["north", "plum"],
            ],
        )
        .unwrap()
    }

    fn csv(data: crate::render::Data<'_>, options: &RenderOptions) -> String {
        crate::render(data, "csv", options)
            .unwrap()
            .into_string()
            .unwrap()
    }

    #[test]
    fn test_table() {
        assert_eq!(
            sales().to_csv().unwrap(),
            "region,item\nnorth,apple\nsouth,pear\nnorth,plum\n"
        );
    }

    #[test]
    fn test_quoting_and_delimiter() {
        let table = Table::from_rows(["a", "b"], [["x,y", "say \"hi\""]]).unwrap();
        assert_eq!(table.to_csv().unwrap(), "a,b\n\"x,y\",\"say \"\"hi\"\"\"\n");

        let out = csv(
            (&table).into(),
            &RenderOptions::new().delimiter(b';').show_table_headers(false),
        );
        assert_eq!(out, "x,y;\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_row() {
        let record = Record::new(["a", "b"]);
        assert_eq!(csv((&record).into(), &RenderOptions::default()), "a,b\n");
    }

    #[test]
    fn test_group() {
        let group = Group::new("fruit", Table::from_rows(["n"], [[1], [2]]).unwrap());
        assert_eq!(
            csv((&group).into(), &RenderOptions::default()),
            "fruit\nn\n1\n2\n"
        );
    }

    #[test]
    fn test_grouping_inline() {
        let grouping = sales().group_by("region").unwrap();
        assert_eq!(
            csv((&grouping).into(), &RenderOptions::default()),
            "north\nitem\napple\nplum\n\nsouth\nitem\npear\n\n"
        );
    }

    #[test]
    fn test_grouping_raw() {
        let grouping = sales().group_by("region").unwrap();
        let options = RenderOptions::new().grouping_style(GroupingStyle::Raw);
        assert_eq!(
            csv((&grouping).into(), &options),
            "region,item\nnorth,apple\nnorth,plum\nsouth,pear\n"
        );
    }

    #[test]
    fn test_grouping_justified() {
        let grouping = sales().group_by("region").unwrap();
        let options = RenderOptions::new().grouping_style(GroupingStyle::Justified);
        assert_eq!(
            csv((&grouping).into(), &options),
            "region,item\nnorth,apple\n,plum\nsouth,pear\n"
        );
    }
}
