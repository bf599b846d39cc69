//! Presentation layers: HTML pages, JSON output, and the PDF report.

pub(crate) mod html;
pub(crate) mod json;
pub(crate) mod pdf;
