//! Markdown document loading and layout.
//!
//! A document owns its markdown source and the lines rendered from it at
//! the current content width. Rendering goes through ratskin/termimad, the
//! same path the status and help text use, so documents pick up headings,
//! emphasis, and code styling for free.
//!
//! Reveal blocks are derived from the rendered lines: every maximal run of
//! non-blank lines is one block.

use std::ops::Range;
use std::path::Path;

use ratatui::text::{Line, Span};

use crate::error::{DocumentError, Result};

/// Width used before the terminal has reported its size.
const DEFAULT_WIDTH: u16 = 80;

/// A run of non-blank rendered lines, revealed as a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    pub id: usize,
    pub lines: Range<usize>,
}

/// A markdown document rendered for the terminal.
#[derive(Debug, Clone)]
pub struct Document {
    title: String,
    source: String,
    lines: Vec<Line<'static>>,
    blocks: Vec<DocBlock>,
    width: u16,
}

impl Document {
    /// Load a markdown document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DocumentError::NotFound(path.to_path_buf()).into());
        }
        if !path.is_file() {
            return Err(DocumentError::NotAFile(path.to_path_buf()).into());
        }
        let source = std::fs::read_to_string(path).map_err(|e| DocumentError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "untitled".to_string());

        Ok(Self::from_markdown(title, source))
    }

    /// Build a document from markdown already in memory.
    pub fn from_markdown(title: impl Into<String>, source: impl Into<String>) -> Self {
        let mut document = Self {
            title: title.into(),
            source: source.into(),
            lines: Vec::new(),
            blocks: Vec::new(),
            width: 0,
        };
        document.reflow(DEFAULT_WIDTH);
        document
    }

    /// Re-render for a new content width. No-op when the width is unchanged.
    pub fn reflow(&mut self, width: u16) {
        let width = width.max(1);
        if width == self.width {
            return;
        }
        self.width = width;

        let skin = ratskin::RatSkin::default();
        let rendered = skin.parse(ratskin::RatSkin::parse_text(&self.source), width);
        self.lines = rendered.into_iter().map(own_line).collect();
        self.blocks = compute_blocks(&self.lines);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn blocks(&self) -> &[DocBlock] {
        &self.blocks
    }

    /// Block ranges keyed by id, the shape the reveal tracker consumes.
    pub fn block_ranges(&self) -> impl Iterator<Item = (usize, Range<usize>)> + '_ {
        self.blocks.iter().map(|b| (b.id, b.lines.clone()))
    }

    /// The block covering a rendered line, if any.
    pub fn block_at_line(&self, line: usize) -> Option<&DocBlock> {
        self.blocks.iter().find(|b| b.lines.contains(&line))
    }
}

/// Detach a rendered line from the source buffer it borrows.
fn own_line(line: Line<'_>) -> Line<'static> {
    let spans: Vec<Span<'static>> = line
        .spans
        .iter()
        .map(|span| Span::styled(span.content.to_string(), span.style))
        .collect();
    let mut owned = Line::from(spans);
    owned.style = line.style;
    owned.alignment = line.alignment;
    owned
}

/// Group rendered lines into blocks: maximal runs of non-blank lines.
fn compute_blocks(lines: &[Line<'_>]) -> Vec<DocBlock> {
    let mut blocks = Vec::new();
    let mut start: Option<usize> = None;

    for (i, line) in lines.iter().enumerate() {
        let blank = line.width() == 0;
        match (blank, start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                blocks.push(DocBlock {
                    id: blocks.len(),
                    lines: s..i,
                });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        blocks.push(DocBlock {
            id: blocks.len(),
            lines: s..lines.len(),
        });
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Line<'static> {
        Line::from(text.to_string())
    }

    #[test]
    fn test_blocks_split_on_blank_lines() {
        let lines = vec![
            plain("alpha"),
            plain("beta"),
            plain(""),
            plain(""),
            plain("gamma"),
        ];
        let blocks = compute_blocks(&lines);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], DocBlock { id: 0, lines: 0..2 });
        assert_eq!(blocks[1], DocBlock { id: 1, lines: 4..5 });
    }

    #[test]
    fn test_blocks_of_blank_document() {
        assert!(compute_blocks(&[]).is_empty());
        assert!(compute_blocks(&[plain(""), plain("")]).is_empty());
    }

    #[test]
    fn test_trailing_block_is_closed() {
        let lines = vec![plain(""), plain("tail")];
        let blocks = compute_blocks(&lines);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines, 1..2);
    }

    #[test]
    fn test_from_markdown_renders_lines() {
        let document = Document::from_markdown("test", "# Heading\n\nSome body text.\n");

        assert_eq!(document.title(), "test");
        assert!(document.line_count() > 0);
        assert_eq!(document.line_count(), document.lines().len());
        assert!(!document.blocks().is_empty());

        // Every block stays within the rendered line range.
        for block in document.blocks() {
            assert!(block.lines.end <= document.line_count());
            assert!(block.lines.start < block.lines.end);
        }
    }

    #[test]
    fn test_reflow_same_width_is_stable() {
        let mut document = Document::from_markdown("test", "one two three four five six");
        let before = document.line_count();
        document.reflow(80);
        assert_eq!(document.line_count(), before);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let result = Document::load(Path::new("/nonexistent/flick-test.md"));
        assert!(result.is_err());
    }

    #[test]
    fn test_block_at_line() {
        let lines = vec![plain("a"), plain(""), plain("b")];
        let blocks = compute_blocks(&lines);
        assert_eq!(blocks.len(), 2);

        let document = Document::from_markdown("t", "a\n\nb\n");
        if let Some(block) = document.block_at_line(0) {
            assert!(block.lines.contains(&0));
        }
    }
}
