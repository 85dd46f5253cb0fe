//! Encodes a laid out [`Document`] as PDF with the builtin Helvetica faces.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb as PdfRgb,
    path::PaintMode,
};

use crate::{
    ReportError,
    layout::{Block, Document, Element, FontStyle, PAGE_HEIGHT, PAGE_WIDTH, Rgb, TextRun},
};

const LAYER: &str = "Layer 1";
const STROKE_WIDTH: f32 = 0.1;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Normal => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

fn color(rgb: Rgb) -> Color {
    let channel = |c: u8| f32::from(c) / 255.0;
    Color::Rgb(PdfRgb::new(channel(rgb.0), channel(rgb.1), channel(rgb.2), None))
}

/// Layout `y` runs down from the top edge, PDF `y` runs up from the bottom.
fn flip(y: f32) -> Mm {
    Mm(PAGE_HEIGHT - y)
}

fn draw_block(layer: &PdfLayerReference, block: &Block) {
    let mode = match (block.fill, block.stroke) {
        (Some(_), Some(_)) => PaintMode::FillStroke,
        (Some(_), None) => PaintMode::Fill,
        (None, Some(_)) => PaintMode::Stroke,
        (None, None) => return,
    };
    if let Some(fill) = block.fill {
        layer.set_fill_color(color(fill));
    }
    if let Some(stroke) = block.stroke {
        layer.set_outline_color(color(stroke));
        layer.set_outline_thickness(STROKE_WIDTH);
    }
    let rect = Rect::new(
        Mm(block.x),
        flip(block.y + block.height),
        Mm(block.x + block.width),
        flip(block.y),
    )
    .with_mode(mode);
    layer.add_rect(rect);
}

fn draw_text(layer: &PdfLayerReference, fonts: &Fonts, run: &TextRun) {
    layer.set_fill_color(color(run.color));
    layer.use_text(
        run.text.clone(),
        run.size,
        Mm(run.left()),
        flip(run.y),
        fonts.get(run.style),
    );
}

pub(crate) fn encode(document: &Document) -> Result<Vec<u8>, ReportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        document.title.as_str(),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        LAYER,
    );
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
        italic: doc.add_builtin_font(BuiltinFont::HelveticaOblique)?,
    };

    for (idx, page) in document.pages.iter().enumerate() {
        let (page_idx, layer_idx) = if idx == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER)
        };
        let layer = doc.get_page(page_idx).get_layer(layer_idx);
        for element in &page.elements {
            match element {
                Element::Block(block) => draw_block(&layer, block),
                Element::Text(run) => draw_text(&layer, &fonts, run),
            }
        }
    }

    Ok(doc.save_to_bytes()?)
}
