// ==========================================
// BQC Generator - OOXML (.docx) writer
// ==========================================
// Input: document::model::Document
// Output: zip package bytes readable by standard word processors
// Layout: A4 portrait, 1-inch margins, Calibri 11pt default
// Every part is emitted as quick-xml events; text nodes pass
// through sanitize_xml_text before escaping
// ==========================================

use crate::document::error::RenderResult;
use crate::document::model::{Alignment, Block, Document, Paragraph, ParagraphStyle, Run, Table};
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// A4 in twips
const PAGE_WIDTH: u32 = 11906;
const PAGE_HEIGHT: u32 = 16838;
const PAGE_MARGIN: u32 = 1440;

const DEFAULT_FONT: &str = "Calibri";
/// Half-points (11pt)
const DEFAULT_FONT_SIZE: u32 = 22;

const HEADER_SHADING: &str = "D9D9D9";

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const PACKAGE_RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Package part names, in write order
pub const PACKAGE_PARTS: [&str; 7] = [
    "[Content_Types].xml",
    "_rels/.rels",
    "docProps/core.xml",
    "docProps/app.xml",
    "word/document.xml",
    "word/styles.xml",
    "word/_rels/document.xml.rels",
];

/// (PartName, ContentType)
const CONTENT_OVERRIDES: [(&str, &str); 4] = [
    (
        "/word/document.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
    ),
    (
        "/word/styles.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
    ),
    (
        "/docProps/core.xml",
        "application/vnd.openxmlformats-package.core-properties+xml",
    ),
    (
        "/docProps/app.xml",
        "application/vnd.openxmlformats-officedocument.extended-properties+xml",
    ),
];

/// (Id, Type, Target)
const ROOT_RELS: [(&str, &str, &str); 3] = [
    (
        "rId1",
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument",
        "word/document.xml",
    ),
    (
        "rId2",
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
        "docProps/core.xml",
    ),
    (
        "rId3",
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties",
        "docProps/app.xml",
    ),
];

const DOCUMENT_RELS: [(&str, &str, &str); 1] = [(
    "rId1",
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles",
    "styles.xml",
)];

/// Paragraph styles beyond Normal
struct StyleDef {
    id: &'static str,
    name: &'static str,
    centered: bool,
    space_before: Option<&'static str>,
    outline_level: Option<&'static str>,
    /// Half-points; None keeps the default size
    size: Option<&'static str>,
}

const PARAGRAPH_STYLES: [StyleDef; 3] = [
    StyleDef {
        id: "Title",
        name: "Title",
        centered: true,
        space_before: None,
        outline_level: None,
        size: Some("28"),
    },
    StyleDef {
        id: "Heading1",
        name: "heading 1",
        centered: false,
        space_before: Some("240"),
        outline_level: Some("0"),
        size: Some("24"),
    },
    StyleDef {
        id: "Heading2",
        name: "heading 2",
        centered: false,
        space_before: Some("120"),
        outline_level: Some("1"),
        size: None,
    },
];

// ==========================================
// Text sanitizing
// ==========================================

/// Replace characters XML 1.0 cannot carry with a space.
///
/// Allowed: tab, LF, CR, U+0020..U+D7FF, U+E000..U+FFFD, U+10000 and above.
/// Pasted office text often carries vertical tabs or other C0 controls.
pub fn sanitize_xml_text(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| if is_xml_char(c) { c } else { ' ' })
            .collect(),
    )
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

// ==========================================
// XmlPart - event writer for one package part
// ==========================================

struct XmlPart {
    writer: Writer<Vec<u8>>,
}

impl XmlPart {
    fn new() -> RenderResult<Self> {
        let mut writer = Writer::new(Vec::with_capacity(4 * 1024));
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(Self { writer })
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> RenderResult<()> {
        self.writer.write_event(Event::Start(element(name, attrs)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> RenderResult<()> {
        self.writer.write_event(Event::Empty(element(name, attrs)))?;
        Ok(())
    }

    fn close(&mut self, name: &str) -> RenderResult<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn text(&mut self, text: &str) -> RenderResult<()> {
        let clean = sanitize_xml_text(text);
        self.writer
            .write_event(Event::Text(BytesText::new(&clean)))?;
        Ok(())
    }

    /// `<name attrs>text</name>`
    fn leaf(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> RenderResult<()> {
        self.open(name, attrs)?;
        self.text(text)?;
        self.close(name)
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn element<'a>(name: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    BytesStart::new(name).with_attributes(attrs.iter().copied())
}

// ==========================================
// DocxWriter
// ==========================================

#[derive(Debug, Clone, Copy)]
pub struct DocxWriter {
    /// None: stamp with the time of each write
    created: Option<DateTime<Utc>>,
}

impl Default for DocxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxWriter {
    pub fn new() -> Self {
        Self { created: None }
    }

    /// Fixed creation timestamp for docProps/core.xml
    pub fn with_timestamp(created: DateTime<Utc>) -> Self {
        Self {
            created: Some(created),
        }
    }

    /// Serialize the document into a .docx byte buffer
    pub fn write(&self, doc: &Document) -> RenderResult<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        let parts = [
            content_types_xml()?,
            relationships_xml(&ROOT_RELS)?,
            self.core_xml(doc)?,
            app_xml()?,
            document_xml(doc)?,
            styles_xml()?,
            relationships_xml(&DOCUMENT_RELS)?,
        ];

        for (name, body) in PACKAGE_PARTS.iter().zip(parts.iter()) {
            zip.start_file(*name, options)?;
            zip.write_all(body)?;
        }

        let cursor = zip.finish()?;
        let bytes = cursor.into_inner();
        tracing::debug!(bytes = bytes.len(), "docx package written");
        Ok(bytes)
    }

    fn core_xml(&self, doc: &Document) -> RenderResult<Vec<u8>> {
        let stamp = self
            .created
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let creator = doc.author.as_deref().unwrap_or("BQC Generator");

        let mut part = XmlPart::new()?;
        part.open(
            "cp:coreProperties",
            &[
                (
                    "xmlns:cp",
                    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
                ),
                ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
                ("xmlns:dcterms", "http://purl.org/dc/terms/"),
                ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
                ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
            ],
        )?;
        part.leaf("dc:title", &[], &doc.title)?;
        part.leaf("dc:creator", &[], creator)?;
        part.leaf("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &stamp)?;
        part.leaf("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], &stamp)?;
        part.close("cp:coreProperties")?;
        Ok(part.finish())
    }
}

/// Convenience wrapper using the current time
pub fn write_docx(doc: &Document) -> RenderResult<Vec<u8>> {
    DocxWriter::new().write(doc)
}

// ==========================================
// word/document.xml
// ==========================================

fn document_xml(doc: &Document) -> RenderResult<Vec<u8>> {
    let mut part = XmlPart::new()?;
    part.open("w:document", &[("xmlns:w", W_NS), ("xmlns:r", R_NS)])?;
    part.open("w:body", &[])?;

    for block in &doc.blocks {
        match block {
            Block::Paragraph(p) => write_paragraph(&mut part, p)?,
            Block::Table(t) => write_table(&mut part, t)?,
        }
    }

    let width = PAGE_WIDTH.to_string();
    let height = PAGE_HEIGHT.to_string();
    let margin = PAGE_MARGIN.to_string();
    part.open("w:sectPr", &[])?;
    part.empty("w:pgSz", &[("w:w", width.as_str()), ("w:h", height.as_str())])?;
    part.empty(
        "w:pgMar",
        &[
            ("w:top", margin.as_str()),
            ("w:right", margin.as_str()),
            ("w:bottom", margin.as_str()),
            ("w:left", margin.as_str()),
            ("w:header", "708"),
            ("w:footer", "708"),
            ("w:gutter", "0"),
        ],
    )?;
    part.close("w:sectPr")?;

    part.close("w:body")?;
    part.close("w:document")?;
    Ok(part.finish())
}

fn write_paragraph(part: &mut XmlPart, p: &Paragraph) -> RenderResult<()> {
    part.open("w:p", &[])?;
    part.open("w:pPr", &[])?;
    if let Some(style) = style_id(p.style) {
        part.empty("w:pStyle", &[("w:val", style)])?;
    }
    let after = p.spacing_after.to_string();
    part.empty("w:spacing", &[("w:after", after.as_str())])?;
    if p.indent_left > 0 {
        let left = p.indent_left.to_string();
        part.empty("w:ind", &[("w:left", left.as_str())])?;
    }
    part.empty("w:jc", &[("w:val", justification(p.alignment))])?;
    part.close("w:pPr")?;

    for run in &p.runs {
        write_run(part, run)?;
    }
    part.close("w:p")
}

fn write_run(part: &mut XmlPart, run: &Run) -> RenderResult<()> {
    part.open("w:r", &[])?;

    let has_props = run.bold || run.italic || run.underline || run.font.is_some() || run.size.is_some();
    if has_props {
        part.open("w:rPr", &[])?;
        if let Some(font) = &run.font {
            let clean = sanitize_xml_text(font);
            let font: &str = &clean;
            part.empty(
                "w:rFonts",
                &[("w:ascii", font), ("w:hAnsi", font), ("w:cs", font)],
            )?;
        }
        if run.bold {
            part.empty("w:b", &[])?;
        }
        if run.italic {
            part.empty("w:i", &[])?;
        }
        if run.underline {
            part.empty("w:u", &[("w:val", "single")])?;
        }
        if let Some(size) = run.size {
            let half_points = (size * 2).to_string();
            part.empty("w:sz", &[("w:val", half_points.as_str())])?;
        }
        part.close("w:rPr")?;
    }

    // "\n" inside a run is a hard line break
    for (idx, segment) in run.text.split('\n').enumerate() {
        if idx > 0 {
            part.empty("w:br", &[])?;
        }
        if !segment.is_empty() {
            part.leaf("w:t", &[("xml:space", "preserve")], segment)?;
        }
    }

    part.close("w:r")
}

fn write_table(part: &mut XmlPart, table: &Table) -> RenderResult<()> {
    let columns = table.column_count();
    if columns == 0 {
        return Ok(());
    }

    let widths: Vec<u32> = (0..columns)
        .map(|i| {
            table
                .widths
                .get(i)
                .copied()
                .unwrap_or((PAGE_WIDTH - 2 * PAGE_MARGIN) / columns as u32)
        })
        .collect();
    let total = widths.iter().sum::<u32>().to_string();
    let widths: Vec<String> = widths.iter().map(u32::to_string).collect();

    part.open("w:tbl", &[])?;
    part.open("w:tblPr", &[])?;
    part.empty("w:tblW", &[("w:w", total.as_str()), ("w:type", "dxa")])?;
    if table.borders {
        part.open("w:tblBorders", &[])?;
        for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
            part.empty(
                edge,
                &[
                    ("w:val", "single"),
                    ("w:sz", "4"),
                    ("w:space", "0"),
                    ("w:color", "000000"),
                ],
            )?;
        }
        part.close("w:tblBorders")?;
    }
    part.empty("w:tblLayout", &[("w:type", "fixed")])?;
    part.close("w:tblPr")?;

    part.open("w:tblGrid", &[])?;
    for w in &widths {
        part.empty("w:gridCol", &[("w:w", w.as_str())])?;
    }
    part.close("w:tblGrid")?;

    for row in &table.rows {
        part.open("w:tr", &[])?;
        if row.is_header {
            part.open("w:trPr", &[])?;
            part.empty("w:tblHeader", &[])?;
            part.close("w:trPr")?;
        }
        for (idx, width) in widths.iter().enumerate() {
            part.open("w:tc", &[])?;
            part.open("w:tcPr", &[])?;
            part.empty("w:tcW", &[("w:w", width.as_str()), ("w:type", "dxa")])?;
            let cell = row.cells.get(idx);
            if cell.is_some_and(|c| c.shaded) {
                part.empty(
                    "w:shd",
                    &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", HEADER_SHADING)],
                )?;
            }
            part.close("w:tcPr")?;
            // a cell must hold at least one paragraph; short rows are padded
            match cell {
                Some(cell) if !cell.paragraphs.is_empty() => {
                    for p in &cell.paragraphs {
                        write_paragraph(part, p)?;
                    }
                }
                _ => part.empty("w:p", &[])?,
            }
            part.close("w:tc")?;
        }
        part.close("w:tr")?;
    }

    part.close("w:tbl")
}

fn style_id(style: ParagraphStyle) -> Option<&'static str> {
    match style {
        ParagraphStyle::Normal => None,
        ParagraphStyle::Title => Some("Title"),
        ParagraphStyle::Heading1 => Some("Heading1"),
        ParagraphStyle::Heading2 => Some("Heading2"),
    }
}

fn justification(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
        Alignment::Justify => "both",
    }
}

// ==========================================
// Fixed parts
// ==========================================

fn content_types_xml() -> RenderResult<Vec<u8>> {
    let mut part = XmlPart::new()?;
    part.open("Types", &[("xmlns", CONTENT_TYPES_NS)])?;
    part.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    part.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    for (name, content_type) in CONTENT_OVERRIDES {
        part.empty(
            "Override",
            &[("PartName", name), ("ContentType", content_type)],
        )?;
    }
    part.close("Types")?;
    Ok(part.finish())
}

fn relationships_xml(rels: &[(&str, &str, &str)]) -> RenderResult<Vec<u8>> {
    let mut part = XmlPart::new()?;
    part.open("Relationships", &[("xmlns", PACKAGE_RELS_NS)])?;
    for (id, rel_type, target) in rels {
        part.empty(
            "Relationship",
            &[("Id", *id), ("Type", *rel_type), ("Target", *target)],
        )?;
    }
    part.close("Relationships")?;
    Ok(part.finish())
}

fn app_xml() -> RenderResult<Vec<u8>> {
    let mut part = XmlPart::new()?;
    part.open(
        "Properties",
        &[
            (
                "xmlns",
                "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
            ),
            (
                "xmlns:vt",
                "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes",
            ),
        ],
    )?;
    part.leaf("Application", &[], "BQC Generator")?;
    part.leaf("AppVersion", &[], &app_version())?;
    part.close("Properties")?;
    Ok(part.finish())
}

/// AppVersion must be `XX.YYYY`
fn app_version() -> String {
    let mut parts = env!("CARGO_PKG_VERSION").split('.');
    let major: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let minor: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    format!("{:02}.{:04}", major, minor)
}

fn styles_xml() -> RenderResult<Vec<u8>> {
    let size = DEFAULT_FONT_SIZE.to_string();
    let mut part = XmlPart::new()?;
    part.open("w:styles", &[("xmlns:w", W_NS)])?;

    part.open("w:docDefaults", &[])?;
    part.open("w:rPrDefault", &[])?;
    part.open("w:rPr", &[])?;
    part.empty(
        "w:rFonts",
        &[
            ("w:ascii", DEFAULT_FONT),
            ("w:hAnsi", DEFAULT_FONT),
            ("w:eastAsia", DEFAULT_FONT),
            ("w:cs", DEFAULT_FONT),
        ],
    )?;
    part.empty("w:sz", &[("w:val", size.as_str())])?;
    part.empty("w:szCs", &[("w:val", size.as_str())])?;
    part.empty("w:lang", &[("w:val", "en-IN")])?;
    part.close("w:rPr")?;
    part.close("w:rPrDefault")?;
    part.open("w:pPrDefault", &[])?;
    part.open("w:pPr", &[])?;
    part.empty(
        "w:spacing",
        &[("w:after", "120"), ("w:line", "259"), ("w:lineRule", "auto")],
    )?;
    part.close("w:pPr")?;
    part.close("w:pPrDefault")?;
    part.close("w:docDefaults")?;

    part.open(
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    part.empty("w:name", &[("w:val", "Normal")])?;
    part.empty("w:qFormat", &[])?;
    part.close("w:style")?;

    for def in &PARAGRAPH_STYLES {
        write_style(&mut part, def)?;
    }

    part.close("w:styles")?;
    Ok(part.finish())
}

fn write_style(part: &mut XmlPart, def: &StyleDef) -> RenderResult<()> {
    part.open("w:style", &[("w:type", "paragraph"), ("w:styleId", def.id)])?;
    part.empty("w:name", &[("w:val", def.name)])?;
    part.empty("w:basedOn", &[("w:val", "Normal")])?;
    part.empty("w:next", &[("w:val", "Normal")])?;
    part.empty("w:qFormat", &[])?;

    part.open("w:pPr", &[])?;
    if def.outline_level.is_some() {
        part.empty("w:keepNext", &[])?;
    }
    if let Some(before) = def.space_before {
        part.empty("w:spacing", &[("w:before", before)])?;
    }
    if def.centered {
        part.empty("w:jc", &[("w:val", "center")])?;
    }
    if let Some(level) = def.outline_level {
        part.empty("w:outlineLvl", &[("w:val", level)])?;
    }
    part.close("w:pPr")?;

    part.open("w:rPr", &[])?;
    part.empty("w:b", &[])?;
    if let Some(size) = def.size {
        part.empty("w:sz", &[("w:val", size)])?;
    }
    part.close("w:rPr")?;

    part.close("w:style")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::{TableCell, TableRow};
    use chrono::TimeZone;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    fn sample() -> Document {
        let mut doc = Document::new("BQC - R&D/01");
        doc.push_paragraph(Paragraph::heading("1. Preamble"));
        doc.push_paragraph(Paragraph::new(vec![
            Run::text("line one\nline two"),
            Run::bold_text(" <Pumps & Valves>").underline(),
        ]));
        doc.push_table(Table::new(
            vec![
                TableRow::header(&["Lot", "EMD"]),
                TableRow::new(vec![TableCell::text("L1")]),
            ],
            vec![2000, 3000],
        ));
        doc
    }

    #[test]
    fn test_package_contains_all_parts() {
        let bytes = DocxWriter::new().write(&sample()).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in PACKAGE_PARTS {
            assert!(names.contains(&part), "missing {}", part);
        }
    }

    #[test]
    fn test_document_xml_content() {
        let bytes = write_docx(&sample()).unwrap();
        let xml = read_part(&bytes, "word/document.xml");

        assert!(xml.contains(r#"<w:pStyle w:val="Heading1"/>"#));
        assert!(xml.contains("line one</w:t><w:br/><w:t xml:space=\"preserve\">line two"));
        assert!(xml.contains("&lt;Pumps &amp; Valves&gt;"));
        assert!(xml.contains(r#"<w:u w:val="single"/>"#));
        assert!(xml.contains(r#"<w:pgSz w:w="11906" w:h="16838"/>"#));
        // short row padded to the grid width
        assert_eq!(xml.matches("<w:tc>").count(), 4);
        assert!(xml.contains("<w:tblHeader/>"));
        assert!(xml.contains(r#"w:fill="D9D9D9""#));
    }

    #[test]
    fn test_core_properties_escaped_and_stamped() {
        let created = Utc.with_ymd_and_hms(2024, 7, 9, 10, 30, 0).unwrap();
        let bytes = DocxWriter::with_timestamp(created).write(&sample()).unwrap();
        let core = read_part(&bytes, "docProps/core.xml");

        assert!(core.contains("<dc:title>BQC - R&amp;D/01</dc:title>"));
        assert!(core.contains("2024-07-09T10:30:00Z"));

        let styles = read_part(&bytes, "word/styles.xml");
        assert!(styles.contains(r#"w:ascii="Calibri""#));
        assert!(styles.contains(r#"<w:sz w:val="22"/>"#));
    }

    #[test]
    fn test_borderless_table_and_empty_cell() {
        let mut doc = Document::new("t");
        doc.push_table(
            Table::new(
                vec![TableRow::new(vec![TableCell::new(Vec::new())])],
                vec![1000],
            )
            .without_borders(),
        );
        let xml = read_part(&write_docx(&doc).unwrap(), "word/document.xml");
        assert!(!xml.contains("<w:tblBorders>"));
        assert!(xml.contains("<w:p/></w:tc>"));
    }

    #[test]
    fn test_sanitize_xml_text_replaces_control_chars() {
        assert!(matches!(sanitize_xml_text("plain\ttext\n"), Cow::Borrowed(_)));
        assert_eq!(
            sanitize_xml_text("Pumps\u{000B}pasted from Word\u{0001}"),
            "Pumps pasted from Word "
        );
        assert_eq!(sanitize_xml_text("a\u{0000}b\u{FFFE}c"), "a b c");
    }

    #[test]
    fn test_control_chars_never_reach_package_parts() {
        let mut doc = Document::new("Title\u{0007} with bell");
        doc.author = Some("Clerk\u{001F}".to_string());
        doc.push_paragraph(Paragraph::new(vec![Run::text(
            "Pumps\u{000B}pasted from Word\u{0001}\nnext line",
        )]));
        doc.push_table(Table::new(
            vec![TableRow::new(vec![TableCell::text("cell\u{0008}")])],
            vec![2000],
        ));

        let bytes = write_docx(&doc).unwrap();
        for name in ["word/document.xml", "docProps/core.xml"] {
            let xml = read_part(&bytes, name);
            let illegal: Vec<u32> = xml
                .chars()
                .filter(|c| !is_xml_char(*c))
                .map(|c| c as u32)
                .collect();
            assert!(illegal.is_empty(), "illegal chars in {}: {:?}", name, illegal);
        }

        let xml = read_part(&bytes, "word/document.xml");
        assert!(xml.contains("Pumps pasted from Word </w:t><w:br/>"));
        let core = read_part(&bytes, "docProps/core.xml");
        assert!(core.contains("<dc:title>Title  with bell</dc:title>"));
        assert!(core.contains("<dc:creator>Clerk </dc:creator>"));
    }

    #[test]
    fn test_fixed_parts_are_well_formed() {
        let bytes = write_docx(&sample()).unwrap();
        for name in PACKAGE_PARTS {
            let xml = read_part(&bytes, name);
            let mut reader = quick_xml::Reader::from_str(&xml);
            loop {
                match reader.read_event() {
                    Ok(quick_xml::events::Event::Eof) => break,
                    Ok(_) => {}
                    Err(e) => panic!("{} is not well-formed: {}", name, e),
                }
            }
        }

        let rels = read_part(&bytes, "_rels/.rels");
        assert!(rels.contains(r#"Target="word/document.xml""#));
        let types = read_part(&bytes, "[Content_Types].xml");
        assert!(types.contains(r#"PartName="/word/styles.xml""#));
    }
}
