//! PDF report generation via `printpdf`. Returns report bytes; the
//! handler attaches them with a download filename.

use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::entities::drug::DrugProfile;
use crate::error::RepurposerError;

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const TOP_Y: Mm = Mm(280.0);
const BOTTOM_Y: Mm = Mm(20.0);

const TRIALS_PER_DRUG: usize = 3;
const INTERACTIONS_PER_DRUG: usize = 3;

fn pdf_err(context: &str, err: impl std::fmt::Display) -> RepurposerError {
    RepurposerError::Pdf(format!("{context}: {err}"))
}

/// Greedy word wrap at a fixed character width per line.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

struct Cursor<'a> {
    doc: &'a printpdf::PdfDocumentReference,
    layer: PdfLayerReference,
    y: Mm,
}

impl Cursor<'_> {
    fn advance(&mut self, step: Mm) {
        self.y -= step;
        if self.y.0 < BOTTOM_Y.0 {
            let (page, layer) = self.doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP_Y;
        }
    }

    fn text(&mut self, text: &str, size: f32, x: Mm, font: &IndirectFontRef, step: Mm) {
        self.layer.use_text(text, size, x, self.y, font);
        self.advance(step);
    }

    fn wrapped(&mut self, text: &str, size: f32, x: Mm, font: &IndirectFontRef, step: Mm) {
        for line in wrap_text(text, 90) {
            self.text(&line, size, x, font, step);
        }
    }
}

/// Builds the repurposing report for one or more drugs. Layout follows
/// the results page: confidence and indication first, then molecular
/// data, the first few trials, and the first few interactions.
pub(crate) fn report(drugs: &[DrugProfile]) -> Result<Vec<u8>, RepurposerError> {
    let (doc, page, layer) =
        PdfDocument::new("Drug Repurposing Report", PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| pdf_err("font load failed", e))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| pdf_err("font load failed", e))?;

    let layer = doc.get_page(page).get_layer(layer);
    let mut cursor = Cursor {
        doc: &doc,
        layer,
        y: TOP_Y,
    };

    cursor.text("Drug Repurposing Report", 24.0, Mm(20.0), &bold, Mm(12.0));

    let generated = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| pdf_err("timestamp format failed", e))?;
    cursor.text(
        &format!("Generated on: {generated}"),
        10.0,
        Mm(20.0),
        &font,
        Mm(10.0),
    );

    for drug in drugs {
        cursor.text(&format!("Drug: {}", drug.name), 14.0, Mm(20.0), &bold, Mm(7.0));
        cursor.text(
            &format!("Confidence Score: {}%", drug.confidence),
            10.0,
            Mm(20.0),
            &font,
            Mm(5.0),
        );
        cursor.wrapped(
            &format!("Indication: {}", drug.indication),
            10.0,
            Mm(20.0),
            &font,
            Mm(5.0),
        );

        if let Some(molecular) = &drug.molecular {
            cursor.text(
                &format!("Molecular Formula: {}", molecular.molecular_formula),
                10.0,
                Mm(20.0),
                &font,
                Mm(5.0),
            );
            cursor.text(
                &format!("Molecular Weight: {}", molecular.molecular_weight),
                10.0,
                Mm(20.0),
                &font,
                Mm(5.0),
            );
        }

        if let Some(trials) = &drug.trials {
            if !trials.trials.is_empty() {
                cursor.text("Clinical Trials:", 11.0, Mm(20.0), &bold, Mm(5.0));
                for trial in trials.trials.iter().take(TRIALS_PER_DRUG) {
                    cursor.wrapped(
                        &format!("- {} ({}, {})", trial.title, trial.phase, trial.status),
                        9.0,
                        Mm(25.0),
                        &font,
                        Mm(4.5),
                    );
                }
            }
        }

        if !drug.interactions.is_empty() {
            cursor.text("Drug Interactions:", 11.0, Mm(20.0), &bold, Mm(5.0));
            for interaction in drug.interactions.iter().take(INTERACTIONS_PER_DRUG) {
                cursor.wrapped(
                    &format!(
                        "- {}: {} - {}",
                        interaction.drug, interaction.severity, interaction.description
                    ),
                    9.0,
                    Mm(25.0),
                    &font,
                    Mm(4.5),
                );
            }
        }

        cursor.advance(Mm(8.0));
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| pdf_err("save failed", e))?;
    buf.into_inner().map_err(|e| pdf_err("buffer flush failed", e))
}
