use std::io::Cursor;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use cardstock_layout::{
    CardElement, Font, FontMetrics, LayoutUnit, PositionedElement, SheetConfig, paint_units,
};

use crate::RenderError;

/// Internal resource names for the two registered base-14 faces.
fn font_resource_name(font: Font) -> &'static str {
    match font {
        Font::Helvetica => "F1",
        Font::HelveticaBold => "F2",
    }
}

/// A buffered PDF renderer for one sheet format.
pub struct PdfRenderer {
    sheet: SheetConfig,
}

impl PdfRenderer {
    pub fn new(sheet: SheetConfig) -> Self {
        Self { sheet }
    }

    /// Renders the full unit sequence into one in-memory PDF document.
    pub fn render(
        &self,
        units: &[LayoutUnit],
        metrics: &dyn FontMetrics,
    ) -> Result<Vec<u8>, RenderError> {
        let pages = paint_units(units, &self.sheet, metrics);
        log::debug!("rendering {} pages", pages.len());

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(type1_font(Font::Helvetica));
        let bold_id = doc.add_object(type1_font(Font::HelveticaBold));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for elements in &pages {
            let content = page_content(elements, self.sheet.page.height);
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
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
                "Resources" => resources_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    self.sheet.page.width.into(),
                    self.sheet.page.height.into(),
                ],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut Cursor::new(&mut buffer))?;
        Ok(buffer)
    }

    /// Renders and writes the document in one step. The file is only created
    /// after the full document has been assembled.
    pub fn render_to_file(
        &self,
        units: &[LayoutUnit],
        metrics: &dyn FontMetrics,
        path: &Path,
    ) -> Result<(), RenderError> {
        let bytes = self.render(units, metrics)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

fn type1_font(font: Font) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.postscript_name(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn page_content(elements: &[PositionedElement], page_height: f32) -> Content {
    let mut operations = Vec::new();
    for element in elements {
        match &element.element {
            CardElement::Text {
                content,
                font,
                size,
            } => {
                // Layout y is the top of the line box; PDF wants the baseline
                // from the page bottom.
                let y = page_height - element.y - size;
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![font_resource_name(*font).into(), (*size).into()],
                ));
                operations.push(Operation::new("Td", vec![element.x.into(), y.into()]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encode_win_ansi(content))],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            CardElement::Rule { thickness, color } => {
                let y = page_height - element.y;
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new("w", vec![(*thickness).into()]));
                operations.push(Operation::new(
                    "RG",
                    vec![
                        (color.r as f32 / 255.0).into(),
                        (color.g as f32 / 255.0).into(),
                        (color.b as f32 / 255.0).into(),
                    ],
                ));
                operations.push(Operation::new("m", vec![element.x.into(), y.into()]));
                operations.push(Operation::new(
                    "l",
                    vec![(element.x + element.width).into(), y.into()],
                ));
                operations.push(Operation::new("S", vec![]));
                operations.push(Operation::new("Q", vec![]));
            }
        }
    }
    Content { operations }
}

/// Maps text to WinAnsi bytes. Latin-1 codepoints pass through; anything
/// outside the encoding is replaced with '?'.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if code <= 0xFF { code as u8 } else { b'?' }
        })
        .collect()
}
