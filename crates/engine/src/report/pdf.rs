use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use super::{Block, ReportError};

/// A4 in points.
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 72.0;
const FOOTER_Y: f32 = 36.0;
/// Lowest baseline for body text.
const BOTTOM: f32 = 60.0;

/// Rough Helvetica advance width as a fraction of the font size.
const AVG_CHAR_WIDTH: f32 = 0.53;
const LINE_SPACING: f32 = 1.4;

const ROW_VALUE_OFFSET: f32 = 150.0;
const ITEM_INDENT: f32 = 18.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

#[derive(Clone, Copy)]
struct Style {
    font: Font,
    size: f32,
}

const TITLE: Style = Style {
    font: Font::Bold,
    size: 22.0,
};
const HEADING: Style = Style {
    font: Font::Bold,
    size: 14.0,
};
const BODY: Style = Style {
    font: Font::Regular,
    size: 11.0,
};
const BODY_BOLD: Style = Style {
    font: Font::Bold,
    size: 11.0,
};
const NOTE: Style = Style {
    font: Font::Regular,
    size: 8.5,
};

/// One positioned run of text.
#[derive(Debug)]
struct Line {
    font: Font,
    size: f32,
    x: f32,
    y: f32,
    text: String,
}

/// Lays blocks out top to bottom, opening new pages as needed.
struct Layout {
    pages: Vec<Vec<Line>>,
    y: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = PAGE_HEIGHT - MARGIN;
    }

    /// Move down by `height`, breaking the page first if it would not fit.
    fn reserve(&mut self, height: f32) {
        if self.y - height < BOTTOM {
            self.new_page();
        }
        self.y -= height;
    }

    fn push(&mut self, style: Style, x: f32, text: String) {
        if let Some(page) = self.pages.last_mut() {
            page.push(Line {
                font: style.font,
                size: style.size,
                x,
                y: self.y,
                text,
            });
        }
    }

    fn wrapped(&mut self, style: Style, x: f32, text: &str) {
        let width = PAGE_WIDTH - MARGIN - x;
        for line in wrap(text, max_chars(width, style.size)) {
            self.reserve(style.size * LINE_SPACING);
            self.push(style, x, line);
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Title(text) => {
                let width = PAGE_WIDTH - 2.0 * MARGIN;
                for line in wrap(text, max_chars(width, TITLE.size)) {
                    self.reserve(TITLE.size * LINE_SPACING);
                    let x = centered_x(&line, TITLE.size);
                    self.push(TITLE, x, line);
                }
                self.y -= TITLE.size * 0.5;
            }
            Block::Heading(text) => {
                // Keep a heading together with at least two lines of body.
                if self.y - (HEADING.size + 2.0 * BODY.size) * LINE_SPACING < BOTTOM {
                    self.new_page();
                }
                self.y -= HEADING.size * 0.6;
                self.wrapped(HEADING, MARGIN, text);
                self.y -= HEADING.size * 0.3;
            }
            Block::Paragraph(text) => {
                self.wrapped(BODY, MARGIN, text);
                self.y -= BODY.size * 0.5;
            }
            Block::Strong(text) => {
                self.y -= BODY.size * 0.3;
                self.wrapped(BODY_BOLD, MARGIN, text);
                self.y -= BODY.size * 0.3;
            }
            Block::Row(label, value) => {
                let value_x = MARGIN + ROW_VALUE_OFFSET;
                let lines = wrap(value, max_chars(PAGE_WIDTH - MARGIN - value_x, BODY.size));
                for (i, line) in lines.into_iter().enumerate() {
                    self.reserve(BODY.size * LINE_SPACING);
                    if i == 0 {
                        self.push(BODY_BOLD, MARGIN, format!("{}:", label));
                    }
                    self.push(BODY, value_x, line);
                }
            }
            Block::Item(marker, text) => {
                let text_x = MARGIN + ITEM_INDENT;
                let lines = wrap(text, max_chars(PAGE_WIDTH - MARGIN - text_x, BODY.size));
                for (i, line) in lines.into_iter().enumerate() {
                    self.reserve(BODY.size * LINE_SPACING);
                    if i == 0 {
                        self.push(BODY_BOLD, MARGIN, marker.clone());
                    }
                    self.push(BODY, text_x, line);
                }
                self.y -= BODY.size * 0.2;
            }
            Block::Note(text) => self.wrapped(NOTE, MARGIN, text),
            Block::Spacer(height) => {
                if self.y - height < BOTTOM {
                    self.new_page();
                } else {
                    self.y -= height;
                }
            }
            Block::PageBreak => self.new_page(),
        }
    }
}

fn max_chars(width: f32, size: f32) -> usize {
    ((width / (size * AVG_CHAR_WIDTH)) as usize).max(1)
}

fn centered_x(text: &str, size: f32) -> f32 {
    let width = text.chars().count() as f32 * size * AVG_CHAR_WIDTH;
    ((PAGE_WIDTH - width) / 2.0).max(MARGIN)
}

/// Greedy word wrap on character counts. Words longer than a line are split.
/// Always returns at least one line.
fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        for piece in chars.chunks(max) {
            let piece: String = piece.iter().collect();
            let len = piece.chars().count();
            if current_len > 0 && current_len + 1 + len > max {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(&piece);
            current_len += len;
        }
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Encode text for a WinAnsiEncoding Type1 font.
///
/// Characters outside Windows-1252 become `?`, except pictographs, which
/// are dropped.
fn win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        let code = c as u32;
        let byte = match c {
            '\t' | '\n' | '\r' => Some(b' '),
            _ if code < 0x20 || code == 0x7f => None,
            _ if code < 0x80 => Some(code as u8),
            _ if (0xa0..=0xff).contains(&code) => Some(code as u8),
            '€' => Some(0x80),
            '…' => Some(0x85),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '™' => Some(0x99),
            '\u{200d}' | '\u{fe00}'..='\u{fe0f}' => None,
            '\u{2600}'..='\u{27bf}' | '\u{1f000}'..='\u{10ffff}' => None,
            _ => Some(b'?'),
        };
        out.extend(byte);
    }
    out
}

fn text_operations(line: &Line) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![line.font.resource().into(), line.size.into()]),
        Operation::new("Td", vec![line.x.into(), line.y.into()]),
        Operation::new("Tj", vec![Object::string_literal(win_ansi(&line.text))]),
        Operation::new("ET", vec![]),
    ]
}

fn footer(page: usize, total: usize) -> Line {
    Line {
        font: Font::Regular,
        size: NOTE.size,
        x: MARGIN,
        y: FOOTER_Y,
        text: format!("AgentFlow Manager · page {} of {}", page, total),
    }
}

/// Lay out the blocks and serialize them as a PDF 1.5 document.
pub(super) fn write_document(blocks: &[Block], title: &str) -> Result<Vec<u8>, ReportError> {
    let mut layout = Layout::new();
    for block in blocks {
        layout.block(block);
    }
    // A trailing page break leaves an empty page behind.
    if layout.pages.len() > 1 && layout.pages.last().is_some_and(|p| p.is_empty()) {
        layout.pages.pop();
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let total = layout.pages.len();
    let mut kids: Vec<Object> = Vec::with_capacity(total);
    for (index, lines) in layout.pages.iter().enumerate() {
        let mut operations: Vec<Operation> = lines.iter().flat_map(text_operations).collect();
        operations.extend(text_operations(&footer(index + 1, total)));

        let content = Content { operations }
            .encode()
            .map_err(|e| ReportError::Encode(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => total as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(win_ansi(title)),
        "Producer" => Object::string_literal("AgentFlow Manager"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(|e| ReportError::Write(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("one two three four five six seven", 10);
        assert_eq!(lines, vec!["one two", "three four", "five six", "seven"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn test_wrap_splits_long_words_and_keeps_empty() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn test_win_ansi() {
        assert_eq!(win_ansi("Análisis"), b"An\xe1lisis".to_vec());
        assert_eq!(win_ansi("“ok” – 5€"), b"\x93ok\x94 \x96 5\x80".to_vec());
        assert_eq!(win_ansi("🚀 Startup"), b" Startup".to_vec());
        assert_eq!(win_ansi("多"), b"?".to_vec());
    }

    #[test]
    fn test_single_page_document() {
        let blocks = vec![
            Block::Title("Report".into()),
            Block::Paragraph("Short body (with parentheses).".into()),
        ];
        let bytes = write_document(&blocks, "Report").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(contains(&bytes, b"/WinAnsiEncoding"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_long_content_paginates() {
        let paragraph =
            "Regional expansion requires careful sequencing of store openings. ".repeat(30);
        let blocks: Vec<Block> = (0..8).map(|_| Block::Paragraph(paragraph.clone())).collect();

        let bytes = write_document(&blocks, "Long").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() > 1);
    }

    #[test]
    fn test_page_break_and_footer() {
        let blocks = vec![
            Block::Paragraph("Cover".into()),
            Block::PageBreak,
            Block::Paragraph("Body".into()),
            Block::PageBreak,
        ];
        let bytes = write_document(&blocks, "Breaks").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
        assert!(contains(&bytes, b"page 2 of 2"));
    }
}
