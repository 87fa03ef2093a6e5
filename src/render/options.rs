//! Rendering options and configuration.

/// Options for rendering document previews.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// How to render tables
    pub table_mode: TableMode,

    /// Include YAML frontmatter with metadata
    pub include_frontmatter: bool,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table mode.
    pub fn with_table_mode(mut self, mode: TableMode) -> Self {
        self.table_mode = mode;
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            table_mode: TableMode::Markdown,
            include_frontmatter: false,
            escape_special_chars: true,
        }
    }
}

/// How tables are written in Markdown output.
///
/// Tables containing nested tables are always written as HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableMode {
    /// Standard Markdown pipe tables
    #[default]
    Markdown,
    /// HTML table tags
    Html,
}
