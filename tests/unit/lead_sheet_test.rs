// Lead spreadsheet CSV parsing

use ledgerline::leads::services::parse_lead_rows;
use ledgerline::leads::{LeadSource, LeadStatus};

const SHEET: &str = "\
Name,Phone,Service,Address
 Priya Nair ,9845000001, GST registration ,Indiranagar
,9845000002,Trademark,Whitefield
Arjun Rao,9845000003,Company incorporation,
";

#[test]
fn test_header_skipped_and_cells_trimmed() {
    let leads = parse_lead_rows(SHEET).unwrap();

    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0].name, "Priya Nair");
    assert_eq!(leads[0].phone, "9845000001");
    assert_eq!(leads[0].service_interested, "GST registration");
    assert_eq!(leads[0].address, "Indiranagar");
}

#[test]
fn test_blank_name_rows_skipped_but_rows_still_counted() {
    let leads = parse_lead_rows(SHEET).unwrap();

    assert_eq!(leads[0].sheet_row_id, "row_2");
    assert_eq!(leads[1].name, "Arjun Rao");
    assert_eq!(leads[1].sheet_row_id, "row_4");
    assert_eq!(leads[1].address, "");
}

#[test]
fn test_leads_tagged_as_new_sheet_leads() {
    let leads = parse_lead_rows(SHEET).unwrap();

    assert!(leads
        .iter()
        .all(|l| l.lead_source == LeadSource::GoogleSheet && l.status == LeadStatus::New));
}

#[test]
fn test_short_rows_fill_missing_columns() {
    let leads = parse_lead_rows("Name,Phone,Service,Address\nMeera\n").unwrap();

    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].phone, "");
    assert_eq!(leads[0].service_interested, "");
}

#[test]
fn test_empty_sheet_yields_no_leads() {
    assert!(parse_lead_rows("").unwrap().is_empty());
}
