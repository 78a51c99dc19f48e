use csv::{ReaderBuilder, StringRecord};

use crate::core::{AppError, Result};
use crate::modules::leads::models::{ImportedLead, LeadSource, LeadStatus};

/// Parse a lead sheet CSV export.
///
/// Columns are positional: name, phone, service, address. The first row is a
/// header. Blank lines are ignored. Rows whose name cell is empty are skipped
/// but still count toward the sheet row numbering.
pub fn parse_lead_rows(csv_text: &str) -> Result<Vec<ImportedLead>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let mut leads = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| AppError::SheetSource(format!("Malformed CSV row: {}", e)))?;

        // Header is sheet row 1, so the first data row is row 2
        let sheet_row = index + 2;

        let name = cell(&record, 0);
        if name.is_empty() {
            continue;
        }

        leads.push(ImportedLead {
            name,
            phone: cell(&record, 1),
            service_interested: cell(&record, 2),
            address: cell(&record, 3),
            lead_source: LeadSource::GoogleSheet,
            status: LeadStatus::New,
            sheet_row_id: format!("row_{}", sheet_row),
        });
    }

    Ok(leads)
}

fn cell(record: &StringRecord, index: usize) -> String {
    record.get(index).unwrap_or("").trim().to_string()
}
