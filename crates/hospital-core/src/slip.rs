//! Printable appointment slips.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, Mm, PdfDocument};
use thiserror::Error;

use crate::db::{Database, DbError};
use crate::models::AppointmentDetail;

const SLIP_TITLE: &str = "Appointment Slip";

/// Slip errors.
#[derive(Error, Debug)]
pub enum SlipError {
    #[error("Appointment #{0} not found")]
    NotFound(i64),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

pub type SlipResult<T> = Result<T, SlipError>;

/// The `Label: value` lines printed under the title.
pub fn slip_lines(detail: &AppointmentDetail) -> Vec<String> {
    vec![
        format!("Patient: {}", detail.patient_label()),
        format!("Doctor: {}", detail.doctor_label()),
        format!("Date: {}", detail.appointment.date),
        format!("Time: {}", detail.appointment.time),
        format!("Status: {}", detail.appointment.status),
    ]
}

/// File name a slip is written under.
pub fn slip_file_name(appointment_id: i64) -> String {
    format!("appointment_{}.pdf", appointment_id)
}

/// Render a single-page A4 slip.
pub fn render(detail: &AppointmentDetail) -> SlipResult<Vec<u8>> {
    let (doc, page1, layer1) = PdfDocument::new(SLIP_TITLE, Mm(210.0), Mm(297.0), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| SlipError::Pdf(format!("font: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| SlipError::Pdf(format!("font: {e}")))?;

    let mut y = Mm(280.0);
    layer.use_text(SLIP_TITLE, 16.0, Mm(20.0), y, &bold);
    y -= Mm(14.0);

    for line in slip_lines(detail) {
        layer.use_text(line, 12.0, Mm(20.0), y, &font);
        y -= Mm(8.0);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| SlipError::Pdf(format!("save: {e}")))?;
    buf.into_inner()
        .map_err(|e| SlipError::Pdf(format!("buffer: {e}")))
}

/// Writes slips for stored appointments.
pub struct SlipGenerator<'a> {
    db: &'a Database,
    output_dir: PathBuf,
}

impl<'a> SlipGenerator<'a> {
    pub fn new(db: &'a Database, output_dir: impl AsRef<Path>) -> Self {
        Self {
            db,
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Write `appointment_{id}.pdf`, replacing any earlier slip for the same
    /// appointment, and return its path.
    pub fn generate(&self, appointment_id: i64) -> SlipResult<PathBuf> {
        let detail = self
            .db
            .get_appointment_detail(appointment_id)?
            .ok_or(SlipError::NotFound(appointment_id))?;

        let bytes = render(&detail)?;
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(slip_file_name(appointment_id));
        std::fs::write(&path, bytes)?;

        tracing::info!(appointment_id, path = %path.display(), "slip written");
        Ok(path)
    }
}
