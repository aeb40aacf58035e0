use genpdf::elements::{Break, Image, LinearLayout, Paragraph, StyledElement, TableLayout};
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Document, Element, Margins, PaperSize, SimplePageDecorator};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::export::{DocumentExporter, ExportError};
use crate::render::{AmountRow, AmountSection, InfoField, SlipView};
use crate::utils::data_uri::{decode_image, extension_for};

/// A4 portrait PDF through genpdf. Fonts are loaded from `font_dir` on every
/// export (`<family>-Regular.ttf`, `-Bold.ttf`, `-Italic.ttf`, `-BoldItalic.ttf`).
pub struct PdfExporter {
    font_dir: PathBuf,
    font_family: String,
    output_dir: PathBuf,
}

impl PdfExporter {
    pub fn new(font_dir: impl Into<PathBuf>, font_family: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            font_dir: font_dir.into(),
            font_family: font_family.into(),
            output_dir: output_dir.into(),
        }
    }
}

fn p(text: &str, style: Style) -> StyledElement<Paragraph> {
    Paragraph::new(text).styled(style)
}

fn p_aligned(text: &str, style: Style, align: Alignment) -> StyledElement<Paragraph> {
    Paragraph::new(text).aligned(align).styled(style)
}

/// Decode a data URI into a genpdf image. genpdf reads images from disk and
/// rejects alpha channels; anything it cannot load is skipped.
fn load_image(data_uri: &str, max_scale: f64) -> Option<Image> {
    let (mime, bytes) = match decode_image(data_uri) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!(error = %e, "Skipping undecodable image");
            return None;
        }
    };

    let tmp = std::env::temp_dir().join(format!("slip_gaji_{}.{}", Uuid::new_v4(), extension_for(&mime)));
    if let Err(e) = fs::write(&tmp, &bytes) {
        warn!(error = %e, "Could not stage image for PDF");
        return None;
    }
    let image = Image::from_path(&tmp);
    let _ = fs::remove_file(&tmp);

    match image {
        Ok(img) => Some(
            img.with_alignment(Alignment::Center)
                .with_scale(genpdf::Scale::new(max_scale, max_scale)),
        ),
        Err(e) => {
            warn!(error = %e, mime = %mime, "Skipping image genpdf cannot embed");
            None
        }
    }
}

fn info_table(fields: &[InfoField], style: Style) -> Result<TableLayout, ExportError> {
    let mut table = TableLayout::new(vec![1, 3]);
    for f in fields {
        table
            .row()
            .element(p(&f.label, style))
            .element(p(&format!(": {}", f.value), style))
            .push()
            .map_err(|e| ExportError::Layout(e.to_string()))?;
    }
    Ok(table)
}

fn amount_section(section: &AmountSection, normal: Style, bold: Style) -> Result<LinearLayout, ExportError> {
    let mut layout = LinearLayout::vertical();
    layout.push(p(&section.title.to_uppercase(), bold));
    layout.push(Break::new(0.5));

    let mut table = TableLayout::new(vec![3, 2]);
    let mut push_row = |row: &AmountRow, style: Style| {
        table
            .row()
            .element(p(&row.label, style))
            .element(p_aligned(&row.formatted, style, Alignment::Right))
            .push()
            .map_err(|e| ExportError::Layout(e.to_string()))
    };
    for row in &section.rows {
        push_row(row, normal)?;
    }
    push_row(&section.total, bold)?;

    layout.push(table);
    Ok(layout)
}

impl PdfExporter {
    fn build(&self, view: &SlipView) -> Result<Document, ExportError> {
        let font_family = genpdf::fonts::from_files(&self.font_dir, &self.font_family, None).map_err(|e| {
            ExportError::Fonts(format!(
                "{e} (expected {}-*.ttf in {})",
                self.font_family,
                self.font_dir.display()
            ))
        })?;

        let mut doc = Document::new(font_family);
        doc.set_title(format!("{} - {}", view.header.slip_title, view.header.company_name));
        doc.set_paper_size(PaperSize::A4);

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(Margins::trbl(15, 15, 15, 15));
        doc.set_page_decorator(decorator);

        let s_normal = Style::new().with_font_size(10);
        let s_bold = Style::new().with_font_size(10).bold();
        let s_small = Style::new().with_font_size(9).with_color(Color::Greyscale(90));
        let s_company = Style::new().with_font_size(14).bold();
        let s_title = Style::new().with_font_size(18).bold();
        let s_net = Style::new().with_font_size(12).bold();
        let s_words = Style::new().with_font_size(9).italic();
        let s_footer = Style::new().with_font_size(8).with_color(Color::Greyscale(150));

        // header: company block left, slip title right
        let mut company = LinearLayout::vertical();
        if let Some(logo) = view.header.logo.as_deref().and_then(|uri| load_image(uri, 0.5)) {
            company.push(logo);
        }
        company.push(p(&view.header.company_name.to_uppercase(), s_company));
        company.push(p(&view.header.company_address, s_small));
        company.push(p(&view.header.contact_line, s_small));
        if let Some(website) = &view.header.company_website {
            company.push(p(website, s_small));
        }

        let mut title = LinearLayout::vertical();
        title.push(p_aligned(&view.header.slip_title.to_uppercase(), s_title, Alignment::Right));
        title.push(p_aligned(&view.header.slip_number_line, s_small, Alignment::Right));

        let mut header = TableLayout::new(vec![3, 2]);
        header
            .row()
            .element(company)
            .element(title)
            .push()
            .map_err(|e| ExportError::Layout(e.to_string()))?;
        doc.push(header);
        doc.push(Break::new(1.5));

        let mut employee = TableLayout::new(vec![1, 1]);
        employee
            .row()
            .element(info_table(&view.employee_left, s_normal)?)
            .element(info_table(&view.employee_right, s_normal)?)
            .push()
            .map_err(|e| ExportError::Layout(e.to_string()))?;
        doc.push(employee.padded(Margins::trbl(2, 2, 2, 2)).framed());
        doc.push(Break::new(1.5));

        let mut amounts = TableLayout::new(vec![1, 1]);
        amounts
            .row()
            .element(amount_section(&view.earnings, s_normal, s_bold)?.padded(Margins::trbl(0, 3, 0, 0)))
            .element(amount_section(&view.deductions, s_normal, s_bold)?.padded(Margins::trbl(0, 0, 0, 3)))
            .push()
            .map_err(|e| ExportError::Layout(e.to_string()))?;
        doc.push(amounts);
        doc.push(Break::new(1.5));

        let mut net = LinearLayout::vertical();
        let mut net_row = TableLayout::new(vec![3, 2]);
        net_row
            .row()
            .element(p(&view.net.label, s_net))
            .element(p_aligned(&view.net.formatted, s_net, Alignment::Right))
            .push()
            .map_err(|e| ExportError::Layout(e.to_string()))?;
        net.push(net_row);
        net.push(p(&view.net_in_words, s_words));
        doc.push(net.padded(Margins::trbl(2, 2, 2, 2)).framed());

        if let Some(note) = &view.note {
            doc.push(Break::new(1.0));
            doc.push(p("Catatan:", s_bold));
            doc.push(p(note, s_normal).padded(Margins::trbl(1, 1, 1, 1)).framed());
        }

        doc.push(Break::new(2.0));
        let mut sign = LinearLayout::vertical();
        sign.push(p_aligned(&view.signature.place_date, s_normal, Alignment::Center));
        sign.push(p_aligned(&view.signature.salutation, s_normal, Alignment::Center));
        if let Some(stamp) = view.signature.stamp_image.as_deref().and_then(|uri| load_image(uri, 0.6)) {
            sign.push(stamp);
        }
        match view.signature.signature_image.as_deref().and_then(|uri| load_image(uri, 0.6)) {
            Some(signature) => sign.push(signature),
            None => sign.push(Break::new(4.0)),
        }
        sign.push(p_aligned(&view.signature.signer_name, s_bold, Alignment::Center));
        sign.push(p_aligned(&view.signature.signer_title, s_small, Alignment::Center));

        let mut sign_row = TableLayout::new(vec![3, 2]);
        sign_row
            .row()
            .element(Break::new(0.0))
            .element(sign)
            .push()
            .map_err(|e| ExportError::Layout(e.to_string()))?;
        doc.push(sign_row);

        doc.push(Break::new(3.0));
        doc.push(p_aligned(&view.footer, s_footer, Alignment::Center));

        Ok(doc)
    }
}

impl DocumentExporter for PdfExporter {
    fn export(&self, view: &SlipView, filename: &str) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.output_dir)?;
        let target = self.output_dir.join(Path::new(filename).file_name().unwrap_or_default());

        let doc = self.build(view)?;
        doc.render_to_file(&target)
            .map_err(|e| ExportError::Render(e.to_string()))?;

        debug!(path = %target.display(), "PDF written");
        Ok(target)
    }
}
