use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};
use tracing::{debug, error};

use crate::core::{AppError, Result};
use crate::modules::invoices::document::layout::{wrap_text, InvoiceDocument};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 20.0;
const MARGIN_RIGHT: f32 = 190.0;
const TOP: f32 = 20.0;
const BOTTOM: f32 = 20.0;

const COL_INDEX: f32 = 20.0;
const COL_DESCRIPTION: f32 = 30.0;
const COL_QUANTITY: f32 = 115.0;
const COL_UNIT_PRICE: f32 = 130.0;
const COL_AMOUNT: f32 = 162.0;
const COL_TOTALS: f32 = 120.0;

const ROW_HEIGHT: f32 = 6.0;
const LINE_HEIGHT: f32 = 4.5;

/// Description cells are wrapped to this many characters to stay left of the quantity column
const DESCRIPTION_WRAP_WIDTH: usize = 44;

/// Finished document bytes
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Turns an [`InvoiceDocument`] into PDF bytes
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &InvoiceDocument) -> Result<RenderedPdf>;
}

/// A4 renderer backed by printpdf's built-in Helvetica fonts
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, document: &InvoiceDocument) -> Result<RenderedPdf> {
        render_document(document).map(|(pdf, _)| pdf)
    }
}

/// Where text ended up on the rendered pages
#[derive(Debug, Clone, Copy, PartialEq)]
struct PageLayout {
    pages: usize,
    /// Largest baseline offset from the top edge across all pages
    lowest_baseline: f32,
}

fn render_document(document: &InvoiceDocument) -> Result<(RenderedPdf, PageLayout)> {
    let (doc, page, layer) = PdfDocument::new(
        document.file_name.trim_end_matches(".pdf"),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(render_error)?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(render_error)?;

    let layer = doc.get_page(page).get_layer(layer);
    let mut canvas = Canvas {
        doc: &doc,
        layer,
        font,
        font_bold,
        cursor: TOP,
        pages: 1,
        lowest_baseline: TOP,
    };

    draw(&mut canvas, document);
    let layout = PageLayout {
        pages: canvas.pages,
        lowest_baseline: canvas.lowest_baseline,
    };

    if layout.lowest_baseline > PAGE_HEIGHT - BOTTOM {
        error!(
            file_name = %document.file_name,
            baseline = layout.lowest_baseline,
            "Invoice content ran past the bottom margin"
        );
        return Err(AppError::rendering("Invoice content overflows the page"));
    }

    // Bytes only leave here once the whole document serialised
    let bytes = doc.save_to_bytes().map_err(render_error)?;

    debug!(
        file_name = %document.file_name,
        pages = layout.pages,
        size = bytes.len(),
        "Invoice PDF rendered"
    );

    let pdf = RenderedPdf {
        file_name: document.file_name.clone(),
        bytes,
    };
    Ok((pdf, layout))
}

fn render_error(e: printpdf::Error) -> AppError {
    error!(error = %e, "PDF rendering failed");
    AppError::rendering(e.to_string())
}

/// Drawing state: cursor is measured from the top edge in millimetres
struct Canvas<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    cursor: f32,
    pages: usize,
    lowest_baseline: f32,
}

impl Canvas<'_> {
    fn text(&mut self, text: &str, size: f32, x: f32, bold: bool) {
        self.lowest_baseline = self.lowest_baseline.max(self.cursor);
        let font = if bold { &self.font_bold } else { &self.font };
        self.layer
            .use_text(text, size, Mm(x), Mm(PAGE_HEIGHT - self.cursor), font);
    }

    fn rule(&self, from: f32, to: f32) {
        let y = Mm(PAGE_HEIGHT - self.cursor);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(from), y), false),
                (Point::new(Mm(to), y), false),
            ],
            is_closed: false,
        });
    }

    fn advance(&mut self, mm: f32) {
        self.cursor += mm;
    }

    /// Start a new page when the next `needed` millimetres would overflow.
    /// Returns true when a page break happened.
    fn ensure_space(&mut self, needed: f32) -> bool {
        if self.cursor + needed <= PAGE_HEIGHT - BOTTOM {
            return false;
        }
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Layer {}", self.pages + 1));
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = TOP;
        self.pages += 1;
        true
    }
}

fn draw(canvas: &mut Canvas<'_>, document: &InvoiceDocument) {
    let header = &document.header;

    canvas.text(&header.business_name, 18.0, MARGIN_LEFT, true);
    canvas.text(&header.title, 14.0, COL_UNIT_PRICE, true);
    canvas.advance(7.0);

    let meta_start = canvas.cursor;
    for line in &header.contact_lines {
        canvas.text(line, 9.0, MARGIN_LEFT, false);
        canvas.advance(4.5);
    }
    let contact_end = canvas.cursor;

    canvas.cursor = meta_start;
    for line in &header.meta_lines {
        canvas.text(line, 9.0, COL_UNIT_PRICE, false);
        canvas.advance(4.5);
    }
    canvas.cursor = canvas.cursor.max(contact_end);

    canvas.advance(4.0);
    canvas.rule(MARGIN_LEFT, MARGIN_RIGHT);
    canvas.advance(8.0);

    canvas.text("Bill To:", 11.0, MARGIN_LEFT, true);
    canvas.advance(5.5);
    let bill_to = &document.bill_to;
    for line in [&bill_to.name, &bill_to.address, &bill_to.phone_line] {
        canvas.text(line, 10.0, MARGIN_LEFT, false);
        canvas.advance(5.0);
    }
    canvas.advance(5.0);

    draw_table_heading(canvas, document);

    let usable = PAGE_HEIGHT - BOTTOM - TOP;
    for row in &document.rows {
        let mut lines = wrap_text(&row.description, DESCRIPTION_WRAP_WIDTH).into_iter();
        let first = lines.next().unwrap_or_default();
        let rest: Vec<String> = lines.collect();

        // Keep a wrapped row together unless it is taller than a page
        let height = ROW_HEIGHT + LINE_HEIGHT * rest.len() as f32;
        if canvas.ensure_space(height.min(usable)) {
            draw_table_heading(canvas, document);
        }
        canvas.text(&row.index.to_string(), 10.0, COL_INDEX, false);
        canvas.text(&first, 10.0, COL_DESCRIPTION, false);
        canvas.text(&row.quantity, 10.0, COL_QUANTITY, false);
        canvas.text(&row.unit_price, 10.0, COL_UNIT_PRICE, false);
        canvas.text(&row.line_total, 10.0, COL_AMOUNT, false);

        for line in &rest {
            canvas.advance(LINE_HEIGHT);
            if canvas.ensure_space(0.0) {
                draw_table_heading(canvas, document);
            }
            canvas.text(line, 10.0, COL_DESCRIPTION, false);
        }
        canvas.advance(ROW_HEIGHT);
    }

    canvas.rule(MARGIN_LEFT, MARGIN_RIGHT);
    canvas.advance(7.0);

    canvas.ensure_space(6.0 * document.totals.len() as f32);
    for line in &document.totals {
        let size = if line.emphasized { 12.0 } else { 10.0 };
        canvas.text(&line.text(), size, COL_TOTALS, line.emphasized);
        canvas.advance(6.0);
    }

    if !document.notes.is_empty() {
        canvas.advance(4.0);
        // Heading stays with at least the first note line
        canvas.ensure_space(5.0 + LINE_HEIGHT);
        canvas.text("Notes:", 10.0, MARGIN_LEFT, true);
        canvas.advance(5.0);
        for line in &document.notes {
            canvas.ensure_space(LINE_HEIGHT);
            canvas.text(line, 9.0, MARGIN_LEFT, false);
            canvas.advance(LINE_HEIGHT);
        }
    }

    let footer = &document.footer;
    canvas.advance(8.0);
    canvas.ensure_space(30.0 + LINE_HEIGHT * footer.bank_lines.len() as f32);

    canvas.text(&footer.thank_you, 11.0, MARGIN_LEFT, true);
    canvas.advance(6.0);
    canvas.text(&footer.contact_line, 9.0, MARGIN_LEFT, false);
    canvas.advance(4.5);
    canvas.text(&footer.payment_terms, 9.0, MARGIN_LEFT, false);
    canvas.advance(7.0);

    canvas.text("Bank Details", 10.0, MARGIN_LEFT, true);
    canvas.advance(5.0);
    for line in &footer.bank_lines {
        canvas.ensure_space(LINE_HEIGHT);
        canvas.text(line, 9.0, MARGIN_LEFT, false);
        canvas.advance(LINE_HEIGHT);
    }
}

fn draw_table_heading(canvas: &mut Canvas<'_>, document: &InvoiceDocument) {
    let [index, description, quantity, unit_price, amount] = document.table_headings;
    canvas.text(index, 10.0, COL_INDEX, true);
    canvas.text(description, 10.0, COL_DESCRIPTION, true);
    canvas.text(quantity, 10.0, COL_QUANTITY, true);
    canvas.text(unit_price, 10.0, COL_UNIT_PRICE, true);
    canvas.text(amount, 10.0, COL_AMOUNT, true);
    canvas.advance(2.0);
    canvas.rule(MARGIN_LEFT, MARGIN_RIGHT);
    canvas.advance(5.0);
}
