//! Small PDFs written with lopdf for integration tests.

#![allow(dead_code)]

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

/// Fonts available on every generated page.
#[derive(Debug, Clone, Copy)]
pub enum Font {
    /// Helvetica
    Regular,
    /// Helvetica-Bold
    Bold,
    /// Helvetica-Oblique
    Italic,
}

impl Font {
    fn key(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Italic => "F3",
        }
    }
}

const FONTS: [(&str, &str); 3] = [
    ("F1", "Helvetica"),
    ("F2", "Helvetica-Bold"),
    ("F3", "Helvetica-Oblique"),
];

/// One text show at an absolute baseline position.
#[derive(Debug, Clone)]
pub struct Run {
    pub text: &'static str,
    pub font: Font,
    pub size: i64,
    pub x: i64,
    pub y: i64,
}

pub fn run(text: &'static str, font: Font, size: i64, x: i64, y: i64) -> Run {
    Run {
        text,
        font,
        size,
        x,
        y,
    }
}

#[derive(Debug, Clone)]
enum PageContent {
    Runs(Vec<Run>),
    Raw(Vec<u8>),
}

/// Builds a Letter-sized PDF, one content stream per page.
#[derive(Debug, Default)]
pub struct PdfBuilder {
    pages: Vec<PageContent>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, runs: Vec<Run>) -> Self {
        self.pages.push(PageContent::Runs(runs));
        self
    }

    /// A page whose content stream holds `content` as is.
    pub fn raw_page(mut self, content: &[u8]) -> Self {
        self.pages.push(PageContent::Raw(content.to_vec()));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        to_bytes(&mut self.document())
    }

    /// The document before serialization, for tests that edit objects.
    pub fn document(&self) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for (key, base_font) in FONTS {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => base_font,
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(key, font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });

        let mut kids: Vec<Object> = Vec::new();
        for page in &self.pages {
            let data = match page {
                PageContent::Runs(runs) => encode_runs(runs),
                PageContent::Raw(data) => data.clone(),
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, data));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    pub fn save(&self, path: &Path) {
        std::fs::write(path, self.build()).expect("save pdf");
    }
}

/// Serialize a document built with [`PdfBuilder::document`].
pub fn to_bytes(doc: &mut Document) -> Vec<u8> {
    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("write pdf");
    buf
}

fn encode_runs(runs: &[Run]) -> Vec<u8> {
    let mut operations = Vec::new();
    for r in runs {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![r.font.key().into(), r.size.into()],
        ));
        operations.push(Operation::new("Td", vec![r.x.into(), r.y.into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(r.text)]));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
        .encode()
        .expect("encode content stream")
}

/// Filler paragraph lines at 10pt starting at `y`, 14pt apart.
pub fn body(lines: usize, y: i64) -> Vec<Run> {
    const TEXT: [&str; 4] = [
        "the quick brown fox jumps over the lazy dog",
        "and keeps running across the open field",
        "until the evening light fades behind the hills",
        "where the story of this page comes to an end",
    ];
    (0..lines)
        .map(|i| run(TEXT[i % TEXT.len()], Font::Regular, 10, 72, y - 14 * i as i64))
        .collect()
}
