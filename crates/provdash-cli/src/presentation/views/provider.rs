use std::fmt;

use super::widgets::{Badge, DriftChip, ProgressBar, or_dash};
use crate::presentation::view_models::{
    FieldExplanationViewModel, FieldRowViewModel, OcrViewModel, ProviderDetailViewModel,
    ProviderListViewModel, QaRowViewModel, SectionViewModel,
};

const CONFIDENCE_BAR_WIDTH: usize = 10;
const OCR_PREVIEW_LINES: usize = 6;

impl fmt::Display for ProviderListViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(search) = &self.search {
            writeln!(
                f,
                "Showing {} of {} providers matching \"{}\"\n",
                self.providers.len(),
                self.total_count,
                search
            )?;
        }
        if self.providers.is_empty() {
            return Ok(());
        }

        let name_width = self
            .providers
            .iter()
            .map(|p| p.name.chars().count())
            .max()
            .unwrap_or(4)
            .max(4);
        writeln!(f, "{:>5}  {:<name_width$}  {:<16}  {:<18}  DRIFT", "ID", "NAME", "SPECIALTY", "PCS")?;
        for row in &self.providers {
            writeln!(
                f,
                "{:>5}  {:<name_width$}  {:<16}  {:<18}  {}",
                row.id,
                row.name,
                or_dash(row.specialty.as_deref()),
                row.pcs.label(),
                row.drift.label()
            )?;
        }
        Ok(())
    }
}

pub struct FieldRowView<'a> {
    data: &'a FieldRowViewModel,
}

impl<'a> FieldRowView<'a> {
    pub fn new(data: &'a FieldRowViewModel) -> Self {
        Self { data }
    }
}

impl fmt::Display for FieldRowView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let row = self.data;
        writeln!(
            f,
            "  {:<16} {:<24} {} {:>4.0}%  {}",
            row.field,
            or_dash(row.value.as_deref()),
            ProgressBar::new(&row.progress, CONFIDENCE_BAR_WIDTH),
            row.confidence * 100.0,
            row.status
        )?;
        if !row.sources.is_empty() {
            let sources: Vec<String> = row
                .sources
                .iter()
                .map(|s| match &s.value {
                    Some(value) => format!("{}={}", s.source, value),
                    None => s.source.clone(),
                })
                .collect();
            writeln!(f, "      sources: {}", sources.join(", "))?;
        }
        if row.explaining {
            writeln!(f, "      Generating explanation...")?;
        }
        if let Some(explanation) = &row.explanation {
            writeln!(f, "      → {explanation}")?;
        }
        Ok(())
    }
}

fn write_ocr(f: &mut fmt::Formatter, ocr: &SectionViewModel<OcrViewModel>) -> fmt::Result {
    match ocr {
        SectionViewModel::Loading => writeln!(f, "  Loading..."),
        SectionViewModel::Failed(err) => writeln!(f, "  Unavailable: {err}"),
        SectionViewModel::Ready(ocr) if !ocr.exists => writeln!(f, "  No document on file."),
        SectionViewModel::Ready(ocr) => {
            write!(f, "  Document: {}", or_dash(ocr.doc_type.as_deref()))?;
            match ocr.ocr_confidence {
                Some(confidence) => writeln!(f, " (OCR confidence {:.0}%)", confidence * 100.0)?,
                None => writeln!(f)?,
            }
            if let Some(text) = &ocr.ocr_text {
                for line in text.lines().take(OCR_PREVIEW_LINES) {
                    writeln!(f, "  | {line}")?;
                }
            }
            Ok(())
        }
    }
}

fn write_qa(f: &mut fmt::Formatter, qa: &SectionViewModel<Vec<QaRowViewModel>>) -> fmt::Result {
    match qa {
        SectionViewModel::Loading => writeln!(f, "  Loading..."),
        SectionViewModel::Failed(err) => writeln!(f, "  Unavailable: {err}"),
        SectionViewModel::Ready(rows) if rows.is_empty() => writeln!(f, "  No history."),
        SectionViewModel::Ready(rows) => {
            for row in rows {
                writeln!(
                    f,
                    "  {:<20} {:<16} {:>4.0}%  {:<14} {} source(s)",
                    or_dash(row.created_at.as_deref()),
                    row.field_name,
                    row.confidence * 100.0,
                    row.status,
                    row.source_count
                )?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for ProviderDetailViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} (#{})  {} {}", self.name, self.id, Badge(&self.pcs), DriftChip(&self.drift))?;
        writeln!(f, "  Specialty:  {}", or_dash(self.specialty.as_deref()))?;
        writeln!(f, "  Phone:      {}", or_dash(self.phone.as_deref()))?;
        writeln!(f, "  Address:    {}", or_dash(self.address.as_deref()))?;
        writeln!(
            f,
            "  License:    {} (expires {})",
            or_dash(self.license_no.as_deref()),
            or_dash(self.license_expiry.as_deref())
        )?;
        if let Some(explanation) = &self.drift_explanation {
            writeln!(f, "  Drift:      {explanation}")?;
        }

        writeln!(f, "\nValidation")?;
        if let Some(error) = &self.explain_error {
            writeln!(f, "  ! {error}")?;
        }
        if self.fields.is_empty() {
            writeln!(f, "  No validated fields.")?;
        }
        for row in &self.fields {
            write!(f, "{}", FieldRowView::new(row))?;
        }

        if !self.pcs_components.is_empty() {
            writeln!(f, "\nPCS breakdown")?;
            for component in &self.pcs_components {
                writeln!(
                    f,
                    "  {:<4} {:<20} {} {:>5.1}",
                    component.code,
                    component.legend,
                    ProgressBar::new(&component.progress, CONFIDENCE_BAR_WIDTH),
                    component.score
                )?;
            }
        }

        if let Some(enrichment) = &self.enrichment {
            writeln!(f, "\nEnrichment")?;
            if let Some(summary) = &enrichment.summary {
                writeln!(f, "  {summary}")?;
            }
            if let Some(education) = &enrichment.education {
                writeln!(f, "  Education:       {education}")?;
            }
            for (label, values) in [
                ("Certifications:", &enrichment.certifications),
                ("Affiliations:", &enrichment.affiliations),
                ("Also practices:", &enrichment.secondary_specialties),
            ] {
                if !values.is_empty() {
                    writeln!(f, "  {:<16} {}", label, values.join(", "))?;
                }
            }
        }

        writeln!(f, "\nDocument (OCR)")?;
        write_ocr(f, &self.ocr)?;
        writeln!(f, "\nQA history")?;
        write_qa(f, &self.qa_history)
    }
}

impl fmt::Display for FieldExplanationViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Provider #{} · {} ({:.0}%, {})",
            self.provider_id,
            self.field,
            self.confidence * 100.0,
            self.status
        )?;
        writeln!(f, "{}", self.explanation)
    }
}
