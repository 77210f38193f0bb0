use chrono::NaiveDate;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Binary validation report as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl Report {
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.unwrap_or_else(|| PDF_CONTENT_TYPE.to_string()),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type.starts_with(PDF_CONTENT_TYPE)
    }
}

/// `validation_report_YYYY-MM-DD.pdf`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("validation_report_{}.pdf", date.format("%Y-%m-%d"))
}
