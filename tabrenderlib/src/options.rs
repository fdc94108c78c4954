//! Rendering options.
//!
//! [`RenderOptions`] is the single configuration struct handed to every
//! formatter. Each field has a default, so callers only set what they need;
//! the struct also deserializes from JSON with missing fields defaulted.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Horizontal alignment of cell text in fixed-width formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Ok(Alignment::Left),
            "right" | "r" => Ok(Alignment::Right),
            "center" | "centre" | "c" => Ok(Alignment::Center),
            _ => Err(format!("Unknown alignment: {}", s)),
        }
    }
}

/// Layout used when a grouping is rendered as CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingStyle {
    /// Each group as its own titled block
    #[default]
    Inline,
    /// One table; the group name appears on the first row of each group
    Justified,
    /// One table; the group name appears on every row
    Raw,
}

impl FromStr for GroupingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inline" => Ok(GroupingStyle::Inline),
            "justified" => Ok(GroupingStyle::Justified),
            "raw" => Ok(GroupingStyle::Raw),
            _ => Err(format!("Unknown grouping style: {}", s)),
        }
    }
}

/// PDF page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    A4,
    #[default]
    Letter,
}

impl PaperSize {
    /// Width and height in PDF points.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (595.0, 842.0),
            PaperSize::Letter => (612.0, 792.0),
        }
    }
}

impl FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a4" => Ok(PaperSize::A4),
            "letter" => Ok(PaperSize::Letter),
            _ => Err(format!("Unknown paper size: {}", s)),
        }
    }
}

/// Options that are unset unless the caller provides them.
///
/// Renderers and formatters list the ones they cannot work without; the
/// engine checks them before any stage runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionName {
    Title,
    TableWidth,
    File,
}

impl OptionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionName::Title => "title",
            OptionName::TableWidth => "table_width",
            OptionName::File => "file",
        }
    }
}

/// Parse a field delimiter: a single ASCII character, or `tab`.
pub fn parse_delimiter(raw: &str) -> Result<u8, String> {
    match raw {
        "tab" | "\\t" => Ok(b'\t'),
        _ if raw.len() == 1 => Ok(raw.as_bytes()[0]),
        _ => Err(format!(
            "delimiter must be a single ASCII character, got '{}'",
            raw
        )),
    }
}

/// Serde adapter writing an ASCII delimiter as a one-character string and
/// reading it from either a string or a byte value.
mod delimiter_serde {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Byte(u8),
        Text(String),
    }

    pub fn serialize<S: Serializer>(delimiter: &u8, serializer: S) -> Result<S::Ok, S::Error> {
        if delimiter.is_ascii() {
            serializer.serialize_str(&char::from(*delimiter).to_string())
        } else {
            serializer.serialize_u8(*delimiter)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Byte(byte) => Ok(byte),
            Raw::Text(text) => super::parse_delimiter(&text).map_err(de::Error::custom),
        }
    }
}

/// Configuration for a render call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Emit the column-name header row
    pub show_table_headers: bool,
    /// Emit group names above grouped tables
    pub show_group_headers: bool,
    /// Report title, shown above the table where the format supports it
    pub title: Option<String>,
    /// Maximum line width for text output (80 when unset)
    pub table_width: Option<usize>,
    /// Never truncate text output lines
    pub ignore_table_width: bool,
    /// Cell alignment for text and PDF output
    pub alignment: Alignment,
    /// Field separator for CSV output
    #[serde(with = "delimiter_serde")]
    pub delimiter: u8,
    /// CSV layout for groupings
    pub grouping_style: GroupingStyle,
    /// PDF page size
    pub paper_size: PaperSize,
    /// PDF font size in points
    pub font_size: f32,
    /// Also write the rendered artifact to this path
    pub file: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_table_headers: true,
            show_group_headers: true,
            title: None,
            table_width: None,
            ignore_table_width: false,
            alignment: Alignment::Left,
            delimiter: b',',
            grouping_style: GroupingStyle::Inline,
            paper_size: PaperSize::Letter,
            font_size: 10.0,
            file: None,
        }
    }
}

impl RenderOptions {
    /// Text output width used when `table_width` is unset.
    pub const DEFAULT_TABLE_WIDTH: usize = 80;

    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an optional field was supplied.
    pub fn is_set(&self, option: OptionName) -> bool {
        match option {
            OptionName::Title => self.title.is_some(),
            OptionName::TableWidth => self.table_width.is_some(),
            OptionName::File => self.file.is_some(),
        }
    }

    /// Effective text width.
    pub fn effective_width(&self) -> usize {
        self.table_width.unwrap_or(Self::DEFAULT_TABLE_WIDTH)
    }

    /// Builder: show or hide the header row
    pub fn show_table_headers(mut self, show: bool) -> Self {
        self.show_table_headers = show;
        self
    }

    /// Builder: show or hide group names
    pub fn show_group_headers(mut self, show: bool) -> Self {
        self.show_group_headers = show;
        self
    }

    /// Builder: set the report title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder: set the text output width
    pub fn table_width(mut self, width: usize) -> Self {
        self.table_width = Some(width);
        self
    }

    /// Builder: disable line truncation
    pub fn ignore_table_width(mut self, ignore: bool) -> Self {
        self.ignore_table_width = ignore;
        self
    }

    /// Builder: set cell alignment
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Builder: set the CSV output delimiter
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder: set the CSV grouping layout
    pub fn grouping_style(mut self, style: GroupingStyle) -> Self {
        self.grouping_style = style;
        self
    }

    /// Builder: set the PDF page size
    pub fn paper_size(mut self, size: PaperSize) -> Self {
        self.paper_size = size;
        self
    }

    /// Builder: set the PDF font size
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Builder: write output to a file as well
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert!(options.show_table_headers);
        assert!(options.show_group_headers);
        assert_eq!(options.alignment, Alignment::Left);
        assert_eq!(options.delimiter, b',');
        assert_eq!(options.effective_width(), 80);
        assert!(!options.is_set(OptionName::Title));
    }

    #[test]
    fn test_builder() {
        let options = RenderOptions::new()
            .title("Sales")
            .table_width(40)
            .alignment(Alignment::Center)
            .show_table_headers(false);
        assert!(options.is_set(OptionName::Title));
        assert!(options.is_set(OptionName::TableWidth));
        assert!(!options.is_set(OptionName::File));
        assert_eq!(options.effective_width(), 40);
        assert!(!options.show_table_headers);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: RenderOptions =
            serde_json::from_str(r#"{"title": "Q1", "alignment": "right"}"#).unwrap();
        assert_eq!(options.title.as_deref(), Some("Q1"));
        assert_eq!(options.alignment, Alignment::Right);
        assert!(options.show_table_headers);
        assert_eq!(options.font_size, 10.0);
    }

    #[test]
    fn test_delimiter_from_json() {
        let options: RenderOptions = serde_json::from_str(r#"{"delimiter": ";"}"#).unwrap();
        assert_eq!(options.delimiter, b';');
        let options: RenderOptions = serde_json::from_str(r#"{"delimiter": "tab"}"#).unwrap();
        assert_eq!(options.delimiter, b'\t');
        let options: RenderOptions = serde_json::from_str(r#"{"delimiter": 124}"#).unwrap();
        assert_eq!(options.delimiter, b'|');
        assert!(serde_json::from_str::<RenderOptions>(r#"{"delimiter": "::"}"#).is_err());

        let json = serde_json::to_value(RenderOptions::new().delimiter(b';')).unwrap();
        assert_eq!(json["delimiter"], ";");
        let back: RenderOptions = serde_json::from_value(json).unwrap();
        assert_eq!(back.delimiter, b';');
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Alignment::from_str("CENTER").unwrap(), Alignment::Center);
        assert_eq!(GroupingStyle::from_str("raw").unwrap(), GroupingStyle::Raw);
        assert_eq!(PaperSize::from_str("a4").unwrap(), PaperSize::A4);
        assert!(Alignment::from_str("diagonal").is_err());
    }
}
