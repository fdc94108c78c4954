//! Formatter registry and render dispatch.
//!
//! The [`Registry`] maps a (renderer, format) pair to a formatter
//! constructor. The [`Engine`] looks up the formatter for a request, checks
//! required options, and drives the renderer's lifecycle against it:
//! prepare, every declared stage the formatter supports, then finalize.
//!
//! A process-wide engine with the built-in formatters is created on first
//! use and backs the free [`render`] function and the `render`/`to_*`
//! conveniences on the data types.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

use crate::data::{Group, Grouping, Record, Table};
use crate::options::RenderOptions;
use crate::output;
use crate::{RenderError, Result};

use super::formatter::{Data, Formatter, FormatterFactory, RenderContext};
use super::stage::RendererKind;

/// Mapping from (renderer, format id) to formatter constructors.
#[derive(Default, Clone)]
pub struct Registry {
    formatters: HashMap<(RendererKind, String), FormatterFactory>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the text, csv, html, json and pdf formatters.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        output::register_builtin(&mut registry);
        registry
    }

    /// Register a formatter. Returns the constructor it replaced, if any.
    pub fn register(
        &mut self,
        renderer: RendererKind,
        format: impl Into<String>,
        factory: FormatterFactory,
    ) -> Option<FormatterFactory> {
        let format = format.into();
        log::trace!("registering '{}' formatter for {}", format, renderer);
        self.formatters.insert((renderer, format), factory)
    }

    /// Register one constructor for several renderers.
    pub fn register_all(
        &mut self,
        renderers: &[RendererKind],
        format: &str,
        factory: FormatterFactory,
    ) {
        for &renderer in renderers {
            self.register(renderer, format, factory);
        }
    }

    /// Find the constructor for a renderer/format pair.
    pub fn lookup(&self, renderer: RendererKind, format: &str) -> Result<FormatterFactory> {
        self.formatters
            .get(&(renderer, format.to_string()))
            .copied()
            .ok_or_else(|| RenderError::FormatNotFound {
                renderer: renderer.name().to_string(),
                format: format.to_string(),
            })
    }

    pub fn contains(&self, renderer: RendererKind, format: &str) -> bool {
        self.lookup(renderer, format).is_ok()
    }

    /// Format ids registered for a renderer, sorted.
    pub fn formats(&self, renderer: RendererKind) -> Vec<&str> {
        let mut formats: Vec<&str> = self
            .formatters
            .keys()
            .filter(|(kind, _)| *kind == renderer)
            .map(|(_, format)| format.as_str())
            .collect();
        formats.sort_unstable();
        formats
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<String> = self
            .formatters
            .keys()
            .map(|(kind, format)| format!("{}:{}", kind, format))
            .collect();
        keys.sort();
        f.debug_struct("Registry").field("formatters", &keys).finish()
    }
}

/// The result of a render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    format: String,
    bytes: Vec<u8>,
}

impl Rendered {
    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The output as text. Fails for binary formats such as PDF.
    pub fn into_string(self) -> Result<String> {
        Ok(String::from_utf8(self.bytes)?)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// One lifecycle run: a renderer bound to data, options and a formatter.
struct Renderer<'a> {
    ctx: RenderContext<'a>,
    formatter: Box<dyn Formatter>,
}

impl<'a> Renderer<'a> {
    fn run(mut self) -> Result<Vec<u8>> {
        let kind = self.ctx.renderer;

        if kind.has_prepare() {
            log::trace!("{}/{}: prepare", kind, self.ctx.format);
            self.formatter.prepare(&self.ctx)?;
        }

        for &stage in kind.stages() {
            if self.formatter.supports(stage) {
                log::trace!("{}/{}: build {}", kind, self.ctx.format, stage);
                self.formatter.build(stage, &self.ctx)?;
            } else {
                log::trace!("{}/{}: skip {}", kind, self.ctx.format, stage);
            }
        }

        let finalized = if kind.has_finalize() {
            log::trace!("{}/{}: finalize", kind, self.ctx.format);
            self.formatter.finalize(&self.ctx)?
        } else {
            None
        };

        Ok(match finalized {
            Some(bytes) => bytes,
            None => self.formatter.into_output(),
        })
    }
}

/// Resolves formatters and runs renders.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Registry,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Registry::with_builtin())
    }
}

impl Engine {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable registry access, for adding custom formatters.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Render data with the renderer matching its kind.
    pub fn render<'a>(
        &self,
        data: impl Into<Data<'a>>,
        format: &str,
        options: &RenderOptions,
    ) -> Result<Rendered> {
        let data = data.into();
        self.render_as(data.kind(), data, format, options)
    }

    /// Render data with an explicit renderer.
    ///
    /// The table renderer also accepts a group (rendering its table); any
    /// other mismatch between renderer and data is a malformed-data error.
    pub fn render_as<'a>(
        &self,
        renderer: RendererKind,
        data: impl Into<Data<'a>>,
        format: &str,
        options: &RenderOptions,
    ) -> Result<Rendered> {
        let data = data.into();
        check_data(renderer, &data)?;

        let factory = self.registry.lookup(renderer, format)?;
        let formatter = factory();
        log::debug!("rendering {} as '{}'", renderer, format);

        let missing = renderer
            .required_options()
            .iter()
            .chain(formatter.required_options())
            .find(|option| !options.is_set(**option));
        if let Some(option) = missing {
            return Err(RenderError::MissingOption {
                option: option.as_str().to_string(),
                format: format.to_string(),
            });
        }

        let ctx = RenderContext {
            renderer,
            format,
            data,
            options,
        };
        let bytes = Renderer { ctx, formatter }.run()?;
        log::debug!("{} '{}' output: {} bytes", renderer, format, bytes.len());

        if let Some(path) = &options.file {
            write_file(path, &bytes)?;
        }

        Ok(Rendered {
            format: format.to_string(),
            bytes,
        })
    }
}

fn check_data(renderer: RendererKind, data: &Data<'_>) -> Result<()> {
    let accepted = match renderer {
        RendererKind::Table => matches!(data, Data::Table(_) | Data::Group(_)),
        other => other == data.kind(),
    };
    if accepted {
        Ok(())
    } else {
        Err(RenderError::MalformedData(format!(
            "the {} renderer cannot render a {}",
            renderer,
            data.kind()
        )))
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    log::debug!("writing {} bytes to {}", bytes.len(), path.display());
    std::fs::write(path, bytes).map_err(|source| RenderError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

static DEFAULT_ENGINE: Lazy<Engine> = Lazy::new(Engine::default);

/// The shared engine with the built-in formatters.
pub fn default_engine() -> &'static Engine {
    &DEFAULT_ENGINE
}

/// Render with the default engine.
pub fn render<'a>(
    data: impl Into<Data<'a>>,
    format: &str,
    options: &RenderOptions,
) -> Result<Rendered> {
    default_engine().render(data, format, options)
}

impl Table {
    /// Render this table in `format` using the default engine.
    pub fn render(&self, format: &str, options: &RenderOptions) -> Result<Rendered> {
        render(self, format, options)
    }

    /// Bordered plain-text table with default options.
    pub fn to_text(&self) -> Result<String> {
        self.render("text", &RenderOptions::default())?.into_string()
    }

    pub fn to_csv(&self) -> Result<String> {
        self.render("csv", &RenderOptions::default())?.into_string()
    }

    pub fn to_html(&self) -> Result<String> {
        self.render("html", &RenderOptions::default())?.into_string()
    }
}

impl Record {
    pub fn render(&self, format: &str, options: &RenderOptions) -> Result<Rendered> {
        render(self, format, options)
    }
}

impl Group {
    pub fn render(&self, format: &str, options: &RenderOptions) -> Result<Rendered> {
        render(self, format, options)
    }
}

impl Grouping {
    pub fn render(&self, format: &str, options: &RenderOptions) -> Result<Rendered> {
        render(self, format, options)
    }
}
