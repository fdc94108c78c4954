//! JSON formatter: the data containers' serde form, pretty-printed.

use serde::Serialize;
use serde_json::Value as Json;

use crate::options::RenderOptions;
use crate::render::{Formatter, RenderContext, Stage};
use crate::Result;

#[derive(Debug, Default)]
pub struct JsonFormatter {
    output: Vec<u8>,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `data`, adding the report title to objects when one is set.
    fn write<T: Serialize>(&mut self, data: &T, options: &RenderOptions) -> Result<()> {
        let mut json = serde_json::to_value(data)?;
        if let (Some(title), Json::Object(map)) = (&options.title, &mut json) {
            map.insert("title".to_string(), Json::String(title.clone()));
        }
        serde_json::to_writer_pretty(&mut self.output, &json)?;
        self.output.push(b'\n');
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn supports(&self, stage: Stage) -> bool {
        matches!(
            stage,
            Stage::TableBody | Stage::Row | Stage::GroupBody | Stage::GroupingBody
        )
    }

    fn build(&mut self, stage: Stage, ctx: &RenderContext<'_>) -> Result<()> {
        let options = ctx.options;
        match stage {
            Stage::TableBody => self.write(ctx.data.table()?, options),
            Stage::Row => self.write(ctx.data.record()?, options),
            Stage::GroupBody => self.write(ctx.data.group()?, options),
            Stage::GroupingBody => self.write(ctx.data.grouping()?, options),
            _ => Ok(()),
        }
    }

    fn into_output(self: Box<Self>) -> Vec<u8> {
        self.output
    }
}
