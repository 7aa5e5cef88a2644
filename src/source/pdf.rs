//! PDF line source backed by lopdf.
//!
//! Walks each page's content stream, tracking the text matrix and active
//! font, and groups the emitted spans into baseline-aligned lines. PDF
//! coordinates are bottom-up; lines are converted to the top-left-origin
//! coordinates the pipeline expects before they leave this module.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, PageError, Result};
use crate::model::{BBox, FontRun, Line, PageLines};
use crate::source::LineSource;
use crate::text::LineClassifier;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Font size assumed before the first Tf operator.
const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Page height assumed when a page has no usable MediaBox (US Letter).
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// Ascender height as a fraction of font size.
const ASCENT_RATIO: f32 = 0.8;

/// Descender depth as a fraction of font size.
const DESCENT_RATIO: f32 = 0.2;

/// Estimated glyph width as a fraction of font size.
const CHAR_WIDTH_RATIO: f32 = 0.5;

/// Baseline distance, as a fraction of font size, within which spans
/// belong to the same line.
const LINE_Y_TOLERANCE_RATIO: f32 = 0.3;

/// Kerning adjustment (1/1000 text space units) treated as a word break
/// inside a TJ array.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A [`LineSource`] that reads positioned text from a PDF.
pub struct PdfSource {
    doc: LopdfDocument,
    classifier: LineClassifier,
}

impl PdfSource {
    /// Open a PDF file.
    ///
    /// Returns [`Error::UnknownFormat`] when the file does not start with
    /// the PDF magic bytes and [`Error::Encrypted`] for encrypted
    /// documents; extraction does not decrypt.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        check_magic(path)?;
        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Self::from_document(doc)
    }

    /// Read a PDF from a byte buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if !data.starts_with(PDF_MAGIC) {
            return Err(Error::UnknownFormat);
        }
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Self::from_document(doc)
    }

    fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self {
            doc,
            classifier: LineClassifier::new(),
        })
    }

    /// Height of a page from its MediaBox, in points.
    fn page_height(&self, page_id: ObjectId) -> f32 {
        if let Ok(page_dict) = self.doc.get_dictionary(page_id) {
            if let Ok(media_box) = page_dict.get(b"MediaBox") {
                if let Ok(array) = media_box.as_array() {
                    if array.len() >= 4 {
                        return array[3].as_float().unwrap_or(DEFAULT_PAGE_HEIGHT);
                    }
                }
            }
        }
        DEFAULT_PAGE_HEIGHT
    }

    /// Concatenated, decompressed content stream of a page.
    fn page_content(&self, page_id: ObjectId, index: u32) -> std::result::Result<Vec<u8>, PageError> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| PageError::ContentDecode(index, e.to_string()))?;

        let contents = page_dict
            .get(b"Contents")
            .map_err(|_| PageError::MissingContent(index))?;

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return s
                        .decompressed_content()
                        .map_err(|e| PageError::ContentDecode(index, e.to_string()));
                }
                Err(PageError::MissingContent(index))
            }
            Object::Array(array) => {
                let mut data = Vec::new();
                for obj in array {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(part) = s.decompressed_content() {
                                data.extend_from_slice(&part);
                                data.push(b' ');
                            }
                        }
                    }
                }
                Ok(data)
            }
            Object::Stream(s) => s
                .decompressed_content()
                .map_err(|e| PageError::ContentDecode(index, e.to_string())),
            _ => Err(PageError::MissingContent(index)),
        }
    }

    /// Walk a page's content stream and emit positioned spans.
    fn page_spans(
        &self,
        page_id: ObjectId,
        index: u32,
    ) -> std::result::Result<Vec<RawSpan>, PageError> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| PageError::FontDecode(index, e.to_string()))?;

        let mut bold_by_font: HashMap<Vec<u8>, bool> = HashMap::new();
        for (name, font) in &fonts {
            let base = font
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_default();
            bold_by_font.insert(name.clone(), is_bold_font(&base));
        }

        let data = self.page_content(page_id, index)?;
        let content = Content::decode(&data)
            .map_err(|e| PageError::ContentDecode(index, e.to_string()))?;

        let mut spans = Vec::new();
        let mut matrix = TextMatrix::default();
        let mut in_text = false;
        let mut current_size = DEFAULT_FONT_SIZE;
        let mut current_bold = false;
        let mut current_encoding = None;

        for op in &content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text = true;
                    matrix = TextMatrix::default();
                }
                "ET" => {
                    in_text = false;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(font_name) = &op.operands[0] {
                            current_bold =
                                bold_by_font.get(font_name.as_slice()).copied().unwrap_or(false);
                            current_encoding = fonts
                                .get(font_name.as_slice())
                                .and_then(|f| f.get_font_encoding(&self.doc).ok());
                        }
                        current_size = get_number(&op.operands[1]).unwrap_or(DEFAULT_FONT_SIZE);
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        matrix.set(
                            get_number(&op.operands[0]).unwrap_or(1.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(1.0),
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => {
                    matrix.next_line();
                }
                "Tj" | "TJ" => {
                    if !in_text {
                        continue;
                    }
                    let text = if op.operator == "TJ" {
                        match op.operands.first() {
                            Some(Object::Array(items)) => {
                                let mut combined = String::new();
                                for item in items {
                                    match item {
                                        Object::String(bytes, _) => {
                                            let decoded = match current_encoding.as_ref() {
                                                Some(enc) => {
                                                    LopdfDocument::decode_text(enc, bytes)
                                                        .unwrap_or_else(|_| decode_bytes(bytes))
                                                }
                                                None => decode_bytes(bytes),
                                            };
                                            combined.push_str(&decoded);
                                        }
                                        Object::Integer(n) => {
                                            maybe_push_tj_space(&mut combined, -(*n as f32));
                                        }
                                        Object::Real(n) => {
                                            maybe_push_tj_space(&mut combined, -n);
                                        }
                                        _ => {}
                                    }
                                }
                                combined
                            }
                            _ => String::new(),
                        }
                    } else {
                        match op.operands.first() {
                            Some(Object::String(bytes, _)) => match current_encoding.as_ref() {
                                Some(enc) => LopdfDocument::decode_text(enc, bytes)
                                    .unwrap_or_else(|_| decode_bytes(bytes)),
                                None => decode_bytes(bytes),
                            },
                            _ => String::new(),
                        }
                    };
                    push_span(&mut spans, text, &matrix, current_size, current_bold);
                }
                "'" | "\"" => {
                    matrix.next_line();
                    if !in_text {
                        continue;
                    }
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                        let text = match current_encoding.as_ref() {
                            Some(enc) => LopdfDocument::decode_text(enc, bytes)
                                .unwrap_or_else(|_| decode_bytes(bytes)),
                            None => decode_bytes(bytes),
                        };
                        push_span(&mut spans, text, &matrix, current_size, current_bold);
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }

    /// Group spans into baseline-aligned lines, convert to top-left
    /// coordinates, and drop noise lines.
    fn group_spans(&self, mut spans: Vec<RawSpan>, page_height: f32, page: u32) -> Vec<Line> {
        if spans.is_empty() {
            return Vec::new();
        }

        // top of page first: PDF y grows upward
        spans.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

        let mut lines = Vec::new();
        let mut cluster: Vec<RawSpan> = Vec::new();
        let mut anchor_y: Option<f32> = None;

        for span in spans {
            let tolerance = span.size * LINE_Y_TOLERANCE_RATIO;
            match anchor_y {
                Some(y) if (span.y - y).abs() <= tolerance => cluster.push(span),
                _ => {
                    if !cluster.is_empty() {
                        if let Some(line) =
                            self.build_line(std::mem::take(&mut cluster), page_height, page)
                        {
                            lines.push(line);
                        }
                    }
                    anchor_y = Some(span.y);
                    cluster.push(span);
                }
            }
        }
        if !cluster.is_empty() {
            if let Some(line) = self.build_line(cluster, page_height, page) {
                lines.push(line);
            }
        }

        lines.sort_by(|a, b| a.bbox.y0.total_cmp(&b.bbox.y0).then(a.bbox.x0.total_cmp(&b.bbox.x0)));
        lines
    }

    fn build_line(&self, mut spans: Vec<RawSpan>, page_height: f32, page: u32) -> Option<Line> {
        spans.sort_by(|a, b| a.x.total_cmp(&b.x));

        let mut text = String::new();
        let mut runs = Vec::with_capacity(spans.len());
        let mut x0 = f32::INFINITY;
        let mut x1 = f32::NEG_INFINITY;
        let mut top = f32::NEG_INFINITY;
        let mut bottom = f32::INFINITY;

        for (i, span) in spans.iter().enumerate() {
            if i > 0 && needs_space(&spans[i - 1], span) {
                text.push(' ');
            }
            text.push_str(&span.text);
            runs.push(FontRun::new(span.text.clone(), span.size, span.bold));
            x0 = x0.min(span.x);
            x1 = x1.max(span.x + span.width);
            top = top.max(span.y + span.size * ASCENT_RATIO);
            bottom = bottom.min(span.y - span.size * DESCENT_RATIO);
        }

        let bbox = BBox::new(x0, page_height - top, x1, page_height - bottom);
        let line = Line::from_runs(text, runs, bbox, page);

        if line.normalized.is_empty() || self.classifier.is_noise_content(&line.normalized) {
            return None;
        }
        Some(line)
    }
}

impl LineSource for PdfSource {
    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn page_lines(&self, index: u32) -> std::result::Result<PageLines, PageError> {
        let pages = self.doc.get_pages();
        let page_id = *pages
            .get(&(index + 1))
            .ok_or(PageError::MissingContent(index))?;

        let height = self.page_height(page_id);
        let spans = self.page_spans(page_id, index)?;

        let mut page = PageLines::new(index, height);
        for line in self.group_spans(spans, height, index) {
            page.push(line);
        }
        Ok(page)
    }
}

/// A positioned text span from the content stream, in PDF bottom-up
/// coordinates with `y` on the baseline.
struct RawSpan {
    text: String,
    x: f32,
    y: f32,
    width: f32,
    size: f32,
    bold: bool,
}

fn push_span(spans: &mut Vec<RawSpan>, text: String, matrix: &TextMatrix, size: f32, bold: bool) {
    if text.trim().is_empty() {
        return;
    }
    let (x, y) = matrix.position();
    let size = size * matrix.scale();
    let width = size * CHAR_WIDTH_RATIO * text.chars().count() as f32;
    spans.push(RawSpan {
        text,
        x,
        y,
        width,
        size,
        bold,
    });
}

/// Large negative TJ adjustments advance the cursor a word-space worth of
/// distance; reflect them as spaces in the text.
fn maybe_push_tj_space(combined: &mut String, adjustment: f32) {
    if adjustment <= TJ_SPACE_THRESHOLD {
        return;
    }
    if combined.is_empty() || combined.ends_with(' ') || combined.ends_with('\u{00A0}') {
        return;
    }
    if let Some(last) = combined.chars().last() {
        if !is_spaceless_script_char(last) {
            combined.push(' ');
        }
    }
}

/// Byte-wise decode fallback when no font encoding is available.
fn decode_bytes(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

fn is_bold_font(base_font: &str) -> bool {
    let name = base_font.to_lowercase();
    name.contains("bold") || name.contains("black") || name.contains("heavy")
}

/// Whether a span gap warrants a space when joining span texts.
fn needs_space(prev: &RawSpan, span: &RawSpan) -> bool {
    let gap = span.x - (prev.x + prev.width);
    let chars = span.text.chars().count();
    let avg_char_width = if chars > 0 && span.width > 0.0 {
        span.width / chars as f32
    } else {
        span.size * CHAR_WIDTH_RATIO
    };
    if gap <= avg_char_width * 0.2 {
        return false;
    }
    if prev.text.ends_with(' ')
        || prev.text.ends_with('\u{00A0}')
        || span.text.starts_with(' ')
        || span.text.starts_with('\u{00A0}')
    {
        return false;
    }
    let prev_spaceless = prev
        .text
        .chars()
        .last()
        .map_or(false, is_spaceless_script_char);
    let curr_spaceless = span
        .text
        .chars()
        .next()
        .map_or(false, is_spaceless_script_char);
    !(prev_spaceless && curr_spaceless)
}

/// Check if a character is from a script written without word spaces
/// (Chinese and Japanese; Korean uses spaces).
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;
    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        // Hiragana and Katakana
        || (0x3040..=0x309F).contains(&code)
        || (0x30A0..=0x30FF).contains(&code)
        // CJK symbols and punctuation
        || (0x3000..=0x303F).contains(&code)
}

/// Text matrix state for tracking the pen position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // default leading; the TL operator is not tracked
        self.f -= 12.0 * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn check_magic(path: &Path) -> Result<()> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 5];
    reader.read_exact(&mut header)?;
    if header != PDF_MAGIC {
        return Err(Error::UnknownFormat);
    }
    Ok(())
}
