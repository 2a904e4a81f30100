/// Configuration context for rendering operations
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub depth: usize,
    pub indent_width: usize,
    pub labels: LabelStyle,
    pub format: OutputFormat,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            depth: 0,
            indent_width: 2,
            labels: LabelStyle::Classic,
            format: OutputFormat::Text,
        }
    }

    pub fn with_depth(&self, depth: usize) -> Self {
        Self {
            depth,
            ..self.clone()
        }
    }

    pub fn with_indent_width(self, indent_width: usize) -> Self {
        Self {
            indent_width,
            ..self
        }
    }

    pub fn with_labels(self, labels: LabelStyle) -> Self {
        Self { labels, ..self }
    }

    pub fn with_format(self, format: OutputFormat) -> Self {
        Self { format, ..self }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Output format configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented lines joined by newlines
    Text,
    /// Array of `{ "depth", "label" }` objects
    Json,
}

/// Which node kinds get a dedicated label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    /// The fixed label table; every other kind renders as `Unknown ...`
    #[default]
    Classic,
    /// Every kind is labeled by name
    Full,
}

/// Core rendering trait for dump artifacts
pub trait Render {
    fn render(&self, context: &RenderContext) -> String;
}
