//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of text content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in the paragraph
    #[serde(default)]
    pub runs: Vec<TextRun>,

    /// Paragraph style
    #[serde(default)]
    pub style: ParagraphStyle,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Set alignment and return self.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.style.alignment = alignment;
        self
    }

    /// Set the named paragraph style and return self.
    pub fn styled(mut self, name: impl Into<String>) -> Self {
        self.style.name = Some(name.into());
        self
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.runs.push(TextRun::new(text));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Concatenated text of all runs, untrimmed.
    pub fn visible_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Whether the trimmed visible text equals `marker` exactly.
    ///
    /// Comparison is case-sensitive and never matches substrings.
    pub fn matches_marker(&self, marker: &str) -> bool {
        self.visible_text().trim() == marker
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.trim().is_empty())
    }

    /// Current paragraph alignment.
    pub fn alignment(&self) -> Alignment {
        self.style.alignment
    }

    /// True when every run is bold (and there is at least one run).
    pub fn is_bold(&self) -> bool {
        !self.runs.is_empty() && self.runs.iter().all(|run| run.style.bold)
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    #[serde(default)]
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                bold: true,
                ..Default::default()
            },
        }
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                italic: true,
                ..Default::default()
            },
        }
    }
}

/// Text styling properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Font name
    pub font_name: Option<String>,

    /// Font size in points
    pub font_size: Option<f32>,
}

impl TextStyle {
    /// Check if any emphasis is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.underline
    }
}

/// Paragraph styling properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphStyle {
    /// Named style from the document's style registry
    pub name: Option<String>,

    /// Text alignment
    pub alignment: Alignment,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text() {
        let mut p = Paragraph::new();
        p.add_text("Hello ");
        p.add_run(TextRun::bold("world"));
        p.add_text("!");

        assert_eq!(p.visible_text(), "Hello world!");
    }

    #[test]
    fn test_matches_marker_trims_whitespace() {
        let p = Paragraph::with_text("  <<T1>>\t");
        assert!(p.matches_marker("<<T1>>"));
    }

    #[test]
    fn test_matches_marker_split_across_runs() {
        let mut p = Paragraph::new();
        p.add_text("<<DOMESTIC_");
        p.add_run(TextRun::italic("WATER_TABLE>>"));
        assert!(p.matches_marker("<<DOMESTIC_WATER_TABLE>>"));
    }

    #[test]
    fn test_matches_marker_is_exact() {
        let p = Paragraph::with_text("See <<T1>> below");
        assert!(!p.matches_marker("<<T1>>"));

        let p = Paragraph::with_text("<<t1>>");
        assert!(!p.matches_marker("<<T1>>"));
    }

    #[test]
    fn test_is_bold() {
        assert!(!Paragraph::new().is_bold());

        let mut p = Paragraph::new();
        p.add_run(TextRun::bold("a"));
        p.add_run(TextRun::bold("b"));
        assert!(p.is_bold());

        p.add_text("c");
        assert!(!p.is_bold());
    }

    #[test]
    fn test_text_style() {
        assert!(!TextStyle::default().has_styling());
        assert!(TextRun::italic("x").style.has_styling());
    }
}
