// ==========================================
// BQC Generator - document tree
// ==========================================
// Format-neutral primitives produced by the renderer and
// consumed by the docx writer. Sizes are in points, spacing
// and widths in twentieths of a point (twips).
// ==========================================

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ParagraphStyle {
    #[default]
    Normal,
    Title,
    Heading1,
    Heading2,
}

// ==========================================
// Run - styled text span
// ==========================================
// A "\n" inside `text` is a hard line break
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub font: Option<String>,
    pub size: Option<u32>,
}

impl Run {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold_text(text: impl Into<String>) -> Self {
        Self::text(text).bold()
    }

    pub fn line_break() -> Self {
        Self::text("\n")
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn size(mut self, points: u32) -> Self {
        self.size = Some(points);
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }
}

// ==========================================
// Paragraph
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Alignment,
    pub spacing_after: u32,
    pub indent_left: u32,
    pub style: ParagraphStyle,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self {
            runs,
            spacing_after: 120,
            ..Default::default()
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![Run::text(text)])
    }

    pub fn heading(text: impl Into<String>) -> Self {
        let mut p = Self::new(vec![Run::bold_text(text)]);
        p.style = ParagraphStyle::Heading1;
        p.spacing_after = 160;
        p
    }

    pub fn subheading(text: impl Into<String>) -> Self {
        let mut p = Self::new(vec![Run::bold_text(text)]);
        p.style = ParagraphStyle::Heading2;
        p
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn spacing_after(mut self, twips: u32) -> Self {
        self.spacing_after = twips;
        self
    }

    pub fn indent(mut self, twips: u32) -> Self {
        self.indent_left = twips;
        self
    }

    pub fn style(mut self, style: ParagraphStyle) -> Self {
        self.style = style;
        self
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

// ==========================================
// Table
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TableCell {
    pub paragraphs: Vec<Paragraph>,
    pub shaded: bool,
}

impl TableCell {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            paragraphs,
            shaded: false,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![Paragraph::plain(text).spacing_after(0)])
    }

    pub fn header(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![Paragraph::new(vec![Run::bold_text(text)])
                .align(Alignment::Center)
                .spacing_after(0)],
            shaded: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    pub is_header: bool,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }

    pub fn header(labels: &[&str]) -> Self {
        Self {
            cells: labels.iter().map(|l| TableCell::header(*l)).collect(),
            is_header: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Table {
    pub rows: Vec<TableRow>,
    pub borders: bool,
    /// Column widths (twips)
    pub widths: Vec<u32>,
}

impl Table {
    pub fn new(rows: Vec<TableRow>, widths: Vec<u32>) -> Self {
        Self {
            rows,
            borders: true,
            widths,
        }
    }

    pub fn without_borders(mut self) -> Self {
        self.borders = false;
        self
    }

    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.cells.len())
            .max()
            .unwrap_or(0)
            .max(self.widths.len())
    }
}

// ==========================================
// Document
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Document {
    pub title: String,
    pub author: Option<String>,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
            blocks: Vec::new(),
        }
    }

    pub fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    pub fn push_table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    pub fn extend(&mut self, blocks: impl IntoIterator<Item = Block>) {
        self.blocks.extend(blocks);
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }

    /// Flattened text, one line per paragraph (table cells included)
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(p) => lines.push(p.text()),
                Block::Table(t) => {
                    for row in &t.rows {
                        let cells: Vec<String> = row
                            .cells
                            .iter()
                            .map(|c| {
                                c.paragraphs
                                    .iter()
                                    .map(Paragraph::text)
                                    .collect::<Vec<_>>()
                                    .join(" ")
                            })
                            .collect();
                        lines.push(cells.join(" | "));
                    }
                }
            }
        }
        lines.join("\n")
    }
}
