//! Stages and renderer declarations.
//!
//! A renderer is a fixed recipe: an optional prepare hook, an ordered list
//! of stages, and an optional finalize hook. [`RendererKind`] holds that
//! recipe for each kind of data this crate renders.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::options::OptionName;

/// A named step of the render lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    TableHeader,
    TableBody,
    TableFooter,
    Row,
    GroupHeader,
    GroupBody,
    GroupFooter,
    GroupingHeader,
    GroupingBody,
    GroupingFooter,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::TableHeader => "table_header",
            Stage::TableBody => "table_body",
            Stage::TableFooter => "table_footer",
            Stage::Row => "row",
            Stage::GroupHeader => "group_header",
            Stage::GroupBody => "group_body",
            Stage::GroupFooter => "group_footer",
            Stage::GroupingHeader => "grouping_header",
            Stage::GroupingBody => "grouping_body",
            Stage::GroupingFooter => "grouping_footer",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The renderers known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererKind {
    Table,
    Row,
    Group,
    Grouping,
}

impl RendererKind {
    pub const ALL: [RendererKind; 4] = [
        RendererKind::Table,
        RendererKind::Row,
        RendererKind::Group,
        RendererKind::Grouping,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RendererKind::Table => "table",
            RendererKind::Row => "row",
            RendererKind::Group => "group",
            RendererKind::Grouping => "grouping",
        }
    }

    /// Stages in execution order.
    pub fn stages(&self) -> &'static [Stage] {
        match self {
            RendererKind::Table => &[Stage::TableHeader, Stage::TableBody, Stage::TableFooter],
            RendererKind::Row => &[Stage::Row],
            RendererKind::Group => &[Stage::GroupHeader, Stage::GroupBody, Stage::GroupFooter],
            RendererKind::Grouping => &[
                Stage::GroupingHeader,
                Stage::GroupingBody,
                Stage::GroupingFooter,
            ],
        }
    }

    /// Whether the formatter's prepare hook runs before the stages.
    pub fn has_prepare(&self) -> bool {
        !matches!(self, RendererKind::Row)
    }

    /// Whether the formatter's finalize hook runs after the stages.
    pub fn has_finalize(&self) -> bool {
        !matches!(self, RendererKind::Row)
    }

    /// Options every formatter for this renderer needs.
    pub fn required_options(&self) -> &'static [OptionName] {
        &[]
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
