//! Layout analysis for PDF pages.
//!
//! This module interprets page content streams into text spans with
//! position, size and style information, then groups them into lines and
//! blocks in top-down reading order.

use std::collections::HashMap;

use crate::error::Result;
use crate::model::{BBox, Block, Line, Page, Span, SpanFlags};

use super::backend::{BackendFontInfo, ContentOp, MediaBox, PageId, PdfBackend, PdfValue};

/// Glyph advance assumed when no widths are read, relative to font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;
/// Ascender height relative to font size.
const ASCENT: f32 = 0.8;
/// Descender depth relative to font size.
const DESCENT: f32 = 0.2;
/// TJ adjustment (thousandths of a text space unit) that reads as a word break.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

// Font descriptor flag bits.
const DESC_FIXED_PITCH: u32 = 1;
const DESC_SERIF: u32 = 1 << 1;
const DESC_ITALIC: u32 = 1 << 6;
const DESC_FORCE_BOLD: u32 = 1 << 18;

/// A positioned text run in PDF user space (y axis up).
#[derive(Debug, Clone)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Estimated width of the text
    pub width: f32,
    /// Effective font size in points
    pub font_size: f32,
    /// Font resource name
    pub font_key: Vec<u8>,
    /// Style flags
    pub flags: SpanFlags,
}

impl TextSpan {
    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    fn same_style(&self, other: &TextSpan) -> bool {
        self.font_key == other.font_key
            && (self.font_size - other.font_size).abs() < 0.01
            && self.flags == other.flags
    }

    /// Convert to a model span in top-down page coordinates.
    fn into_span(self, media_box: &MediaBox) -> Span {
        let left = self.x - media_box.llx;
        let top = media_box.ury - (self.y + self.font_size * ASCENT);
        let bottom = media_box.ury - (self.y - self.font_size * DESCENT);
        Span {
            text: self.text,
            size: self.font_size,
            flags: self.flags,
            bbox: BBox::new(left, top, left + self.width, bottom),
        }
    }
}

/// Derive style flags from a font's base name and descriptor.
pub fn font_flags(info: &BackendFontInfo) -> SpanFlags {
    // Subset fonts carry a six-letter tag: "ABCDEF+Helvetica-Bold"
    let base = match info.base_font.split_once('+') {
        Some((tag, rest)) if tag.len() == 6 => rest,
        _ => info.base_font.as_str(),
    };
    let name = base.to_lowercase();
    let desc = info.descriptor_flags;
    let mut flags = SpanFlags::NONE;

    if ["bold", "black", "heavy", "semibold", "demi"]
        .iter()
        .any(|m| name.contains(m))
        || desc & DESC_FORCE_BOLD != 0
    {
        flags.insert(SpanFlags::BOLD);
    }
    if name.contains("italic") || name.contains("oblique") || desc & DESC_ITALIC != 0 {
        flags.insert(SpanFlags::ITALIC);
    }
    if name.contains("courier") || name.contains("mono") || desc & DESC_FIXED_PITCH != 0 {
        flags.insert(SpanFlags::MONOSPACE);
    }
    let serif_name = ["times", "georgia", "garamond", "cambria"]
        .iter()
        .any(|m| name.contains(m))
        || (name.contains("serif") && !name.contains("sans"));
    if serif_name || desc & DESC_SERIF != 0 {
        flags.insert(SpanFlags::SERIF);
    }

    flags
}

/// A text line composed of spans on the same baseline.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// The spans in this line, sorted by X position
    pub spans: Vec<TextSpan>,
    /// Y position (baseline)
    pub y: f32,
    /// Leftmost X position
    pub x: f32,
    /// Dominant font size in this line
    pub font_size: f32,
}

impl TextLine {
    /// Create a line from spans, merging adjacent same-style runs.
    pub fn from_spans(mut spans: Vec<TextSpan>) -> Self {
        spans.sort_by(|a, b| a.x.total_cmp(&b.x));
        let spans = coalesce(spans);

        // Dominant font size, weighted by text length
        let total_chars: usize = spans.iter().map(|s| s.text.len()).sum();
        let weighted_size: f32 = spans
            .iter()
            .map(|s| s.font_size * s.text.len() as f32)
            .sum();
        let font_size = match spans.first() {
            Some(_) if total_chars > 0 => weighted_size / total_chars as f32,
            Some(first) => first.font_size,
            None => 0.0,
        };

        let (x, y) = spans.first().map(|s| (s.x, s.y)).unwrap_or((0.0, 0.0));

        Self {
            spans,
            y,
            x,
            font_size,
        }
    }

    /// Get the combined text of all spans.
    pub fn text(&self) -> String {
        let mut result = String::new();
        for (i, span) in self.spans.iter().enumerate() {
            if i > 0 && needs_space(&self.spans[i - 1], span) {
                result.push(' ');
            }
            result.push_str(&span.text);
        }
        result
    }
}

/// Merge neighbouring spans that share font, size and style.
///
/// Expects spans sorted by X. Runs separated by a gap wider than the font
/// size stay apart.
fn coalesce(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    let mut merged: Vec<TextSpan> = Vec::with_capacity(spans.len());

    for span in spans {
        if let Some(prev) = merged.last_mut() {
            let gap = span.x - prev.right();
            if prev.same_style(&span) && gap < prev.font_size {
                if needs_space(prev, &span) {
                    prev.text.push(' ');
                }
                prev.text.push_str(&span.text);
                prev.width = prev.width.max(span.right() - prev.x);
                continue;
            }
        }
        merged.push(span);
    }

    merged
}

/// Whether the gap between two spans reads as a word space.
///
/// Inserts spaces based on X coordinate gaps. For CJK characters, no space
/// is inserted between adjacent characters.
fn needs_space(prev: &TextSpan, curr: &TextSpan) -> bool {
    let gap = curr.x - prev.right();

    let char_count = curr.text.chars().count();
    let avg_char_width = if char_count > 0 && curr.width > 0.0 {
        curr.width / char_count as f32
    } else {
        curr.font_size * AVG_GLYPH_WIDTH
    };
    if gap <= avg_char_width * 0.2 {
        return false;
    }

    let prev_ends_with_space = prev.text.ends_with(' ') || prev.text.ends_with('\u{00A0}');
    let curr_starts_with_space = curr.text.starts_with(' ') || curr.text.starts_with('\u{00A0}');
    if prev_ends_with_space || curr_starts_with_space {
        return false;
    }

    let prev_cjk = prev
        .text
        .chars()
        .last()
        .is_some_and(is_spaceless_script_char);
    let curr_cjk = curr
        .text
        .chars()
        .next()
        .is_some_and(is_spaceless_script_char);
    !(prev_cjk && curr_cjk)
}

/// Affine transform `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Read six numeric operands.
    fn from_op(op: &ContentOp) -> Option<Self> {
        Some(Self::new(
            op.number(0)?,
            op.number(1)?,
            op.number(2)?,
            op.number(3)?,
            op.number(4)?,
            op.number(5)?,
        ))
    }

    /// `self × other`: apply `self` first, then `other`.
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Length of the transformed unit Y vector.
    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }

    /// Length of the transformed unit X vector.
    fn horizontal_scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }
}

/// Text object state while interpreting a content stream.
#[derive(Debug, Clone)]
struct TextState {
    /// Text matrix
    tm: Matrix,
    /// Text line matrix
    tlm: Matrix,
    font_key: Vec<u8>,
    font_size: f32,
    leading: f32,
    rise: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            tm: Matrix::IDENTITY,
            tlm: Matrix::IDENTITY,
            font_key: Vec::new(),
            font_size: 12.0,
            leading: 0.0,
            rise: 0.0,
        }
    }
}

impl TextState {
    fn move_line(&mut self, tx: f32, ty: f32) {
        self.tlm = Matrix::translation(tx, ty).then(&self.tlm);
        self.tm = self.tlm;
    }

    fn next_line(&mut self) {
        // TL defaults to 0; fall back to a typical leading
        let leading = if self.leading != 0.0 {
            self.leading
        } else {
            self.font_size * 1.2
        };
        self.move_line(0.0, -leading);
    }

    fn advance(&mut self, tx: f32) {
        self.tm = Matrix::translation(tx, 0.0).then(&self.tm);
    }
}

/// Layout analyzer for extracting structured text from PDF pages.
pub struct LayoutAnalyzer<'a> {
    backend: &'a dyn PdfBackend,
}

impl<'a> LayoutAnalyzer<'a> {
    /// Create a new layout analyzer.
    pub fn new(backend: &'a dyn PdfBackend) -> Self {
        Self { backend }
    }

    /// Extract a page's text structure.
    pub fn extract_page(&self, number: u32, page_id: PageId) -> Result<Page> {
        let media_box = self.backend.media_box(page_id)?;
        let spans = self.extract_page_spans(page_id)?;
        log::debug!("Page {}: {} raw spans", number, spans.len());

        let lines = group_spans_into_lines(spans);
        let blocks = group_lines_into_blocks(lines);

        let mut page = Page::new(number, media_box.width(), media_box.height());
        for block_lines in blocks {
            let lines = block_lines
                .into_iter()
                .map(|line| {
                    Line::new(
                        line.spans
                            .into_iter()
                            .map(|s| s.into_span(&media_box))
                            .collect(),
                    )
                })
                .collect();
            page.add_block(Block::new(lines));
        }
        Ok(page)
    }

    /// Extract positioned text spans from a page in content-stream order.
    pub fn extract_page_spans(&self, page_id: PageId) -> Result<Vec<TextSpan>> {
        let fonts: HashMap<Vec<u8>, SpanFlags> = self
            .backend
            .page_fonts(page_id)?
            .iter()
            .map(|info| (info.name.clone(), font_flags(info)))
            .collect();

        let content = self.backend.page_content(page_id)?;
        let ops = self.backend.decode_content(&content)?;
        Ok(self.interpret(page_id, &ops, &fonts))
    }

    fn interpret(
        &self,
        page_id: PageId,
        ops: &[ContentOp],
        fonts: &HashMap<Vec<u8>, SpanFlags>,
    ) -> Vec<TextSpan> {
        let mut spans = Vec::new();
        let mut ctm = Matrix::IDENTITY;
        let mut ctm_stack: Vec<Matrix> = Vec::new();
        let mut state = TextState::default();
        let mut in_text_block = false;

        for op in ops {
            match op.operator.as_str() {
                "q" => ctm_stack.push(ctm),
                "Q" => {
                    if let Some(saved) = ctm_stack.pop() {
                        ctm = saved;
                    }
                }
                "cm" => {
                    if let Some(m) = Matrix::from_op(op) {
                        ctm = m.then(&ctm);
                    }
                }
                "BT" => {
                    in_text_block = true;
                    state.tm = Matrix::IDENTITY;
                    state.tlm = Matrix::IDENTITY;
                }
                "ET" => in_text_block = false,
                "Tf" => {
                    if let Some(PdfValue::Name(name)) = op.operands.first() {
                        state.font_key = name.clone();
                    }
                    // A negative size mirrors the glyphs; the height is the magnitude
                    state.font_size = op.number(1).unwrap_or(12.0).abs();
                }
                "TL" => state.leading = op.number(0).unwrap_or(0.0),
                "Ts" => state.rise = op.number(0).unwrap_or(0.0),
                "Td" => {
                    let tx = op.number(0).unwrap_or(0.0);
                    let ty = op.number(1).unwrap_or(0.0);
                    state.move_line(tx, ty);
                }
                "TD" => {
                    let tx = op.number(0).unwrap_or(0.0);
                    let ty = op.number(1).unwrap_or(0.0);
                    state.leading = -ty;
                    state.move_line(tx, ty);
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_op(op) {
                        state.tm = m;
                        state.tlm = m;
                    }
                }
                "T*" => state.next_line(),
                "Tj" | "'" | "\"" | "TJ" if in_text_block => {
                    if op.operator != "Tj" && op.operator != "TJ" {
                        state.next_line();
                    }
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    let shown = op
                        .operands
                        .get(text_idx)
                        .and_then(|v| self.show_text(page_id, v, &mut state, &ctm, fonts));
                    if let Some(span) = shown {
                        spans.push(span);
                    }
                }
                _ => {}
            }
        }

        spans
    }

    /// Emit a span for a text-showing operand and advance the text matrix.
    fn show_text(
        &self,
        page_id: PageId,
        operand: &PdfValue,
        state: &mut TextState,
        ctm: &Matrix,
        fonts: &HashMap<Vec<u8>, SpanFlags>,
    ) -> Option<TextSpan> {
        let origin = Matrix::translation(0.0, state.rise)
            .then(&state.tm)
            .then(ctm);
        let glyph_width = state.font_size * AVG_GLYPH_WIDTH;

        let mut text = String::new();
        let mut advance = 0.0f32;

        match operand {
            PdfValue::Str(bytes) => {
                let decoded = self.backend.decode_text(page_id, &state.font_key, bytes);
                advance += decoded.chars().count() as f32 * glyph_width;
                text = decoded;
            }
            // Numbers are kerning adjustments in thousandths of text space;
            // large negative values usually stand in for word spaces.
            PdfValue::Array(items) => {
                for item in items {
                    match item {
                        PdfValue::Str(bytes) => {
                            let decoded =
                                self.backend.decode_text(page_id, &state.font_key, bytes);
                            advance += decoded.chars().count() as f32 * glyph_width;
                            text.push_str(&decoded);
                        }
                        other => {
                            let Some(n) = other.as_number() else {
                                continue;
                            };
                            advance -= n / 1000.0 * state.font_size;
                            if -n > TJ_SPACE_THRESHOLD
                                && !text.is_empty()
                                && !text.ends_with(' ')
                                && !text.ends_with('\u{00A0}')
                                && !text.chars().last().is_some_and(is_spaceless_script_char)
                            {
                                text.push(' ');
                            }
                        }
                    }
                }
            }
            _ => return None,
        }

        state.advance(advance);

        if text.is_empty() {
            return None;
        }

        let mut flags = fonts.get(&state.font_key).copied().unwrap_or_default();
        if state.rise > 0.0 {
            flags.insert(SpanFlags::SUPERSCRIPT);
        }

        let scale = state.tm.then(ctm);
        Some(TextSpan {
            text,
            x: origin.e,
            y: origin.f,
            width: advance.max(0.0) * scale.horizontal_scale(),
            font_size: state.font_size * scale.vertical_scale(),
            font_key: state.font_key.clone(),
            flags,
        })
    }
}

/// Group spans into lines by baseline, top to bottom.
///
/// Multi-column layouts are not separated.
pub fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<TextLine> {
    // PDF Y grows upward: sort descending, then left to right
    spans.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines: Vec<TextLine> = Vec::new();
    let mut current_line_spans: Vec<TextSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let y_tolerance = span.font_size * 0.3;

        match current_y {
            Some(y) if (span.y - y).abs() <= y_tolerance => current_line_spans.push(span),
            _ => {
                if !current_line_spans.is_empty() {
                    lines.push(TextLine::from_spans(std::mem::take(
                        &mut current_line_spans,
                    )));
                }
                current_y = Some(span.y);
                current_line_spans.push(span);
            }
        }
    }

    if !current_line_spans.is_empty() {
        lines.push(TextLine::from_spans(current_line_spans));
    }

    lines
}

/// Group lines into blocks based on spacing, size and indentation changes.
pub fn group_lines_into_blocks(lines: Vec<TextLine>) -> Vec<Vec<TextLine>> {
    let avg_spacing = calculate_avg_line_spacing(&lines);
    let mut blocks: Vec<Vec<TextLine>> = Vec::new();
    let mut current: Vec<TextLine> = Vec::new();

    for line in lines {
        if let Some(prev) = current.last() {
            if should_break_block(prev, &line, avg_spacing) {
                blocks.push(std::mem::take(&mut current));
            }
        }
        current.push(line);
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn calculate_avg_line_spacing(lines: &[TextLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }

    spacings.iter().sum::<f32>() / spacings.len() as f32
}

fn should_break_block(prev_line: &TextLine, curr_line: &TextLine, avg_spacing: f32) -> bool {
    let spacing = (prev_line.y - curr_line.y).abs();

    spacing > avg_spacing * 1.5
        || (prev_line.font_size - curr_line.font_size).abs() > 1.0
        || (prev_line.x - curr_line.x).abs() > 20.0
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and extensions
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}
