//! `.xlsx` import and export.
//!
//! Imports read the first worksheet into plain string rows and hand them to
//! the roster parser. Exports write a single sheet with a bold header row.

use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use domain::models::attendee::{parse_roster, AttendeeRow, RosterError};
use domain::models::{NewsletterSubscription, TeamMember};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use thiserror::Error;

use crate::error::ApiError;

/// Content type of generated workbooks.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const TEAM_EXPORT_HEADERS: [&str; 8] = [
    "Full Name",
    "Position",
    "Department",
    "Email",
    "LinkedIn",
    "Visible",
    "Display Order",
    "Created At",
];

pub const NEWSLETTER_EXPORT_HEADERS: [&str; 3] = ["Email", "Status", "Subscribed At"];

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("File is not a readable .xlsx workbook: {0}")]
    Unreadable(String),

    #[error("Workbook has no worksheets")]
    NoWorksheet,

    #[error("Spreadsheet has more than {max} attendee rows")]
    TooManyRows { max: usize },

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error("Failed to write workbook: {0}")]
    Write(#[from] XlsxError),
}

impl From<SpreadsheetError> for ApiError {
    fn from(err: SpreadsheetError) -> Self {
        match err {
            SpreadsheetError::Write(e) => {
                ApiError::Internal(format!("Workbook export failed: {}", e))
            }
            other => ApiError::Validation(other.to_string()),
        }
    }
}

/// Reads the first worksheet as rows of trimmed strings.
pub fn read_first_sheet(bytes: &[u8]) -> Result<Vec<Vec<String>>, SpreadsheetError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e: calamine::XlsxError| SpreadsheetError::Unreadable(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoWorksheet)?
        .map_err(|e| SpreadsheetError::Unreadable(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        // Phone numbers typed into a numeric cell come back as floats.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}

/// Reads and validates an attendee roster workbook.
pub fn parse_attendee_workbook(
    bytes: &[u8],
    max_rows: usize,
) -> Result<Vec<AttendeeRow>, SpreadsheetError> {
    let rows = read_first_sheet(bytes)?;

    // Header row plus data rows; empty rows are dropped later but still count.
    if rows.len() > max_rows + 1 {
        return Err(SpreadsheetError::TooManyRows { max: max_rows });
    }

    Ok(parse_roster(&rows)?)
}

fn write_header(sheet: &mut Worksheet, headers: &[&str]) -> Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
        sheet.set_column_width(col as u16, 20)?;
    }
    Ok(())
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Exports the team roster.
pub fn export_team(members: &[TeamMember]) -> Result<Vec<u8>, SpreadsheetError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Team")?;
    write_header(sheet, &TEAM_EXPORT_HEADERS)?;

    for (idx, member) in members.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, &member.full_name)?;
        sheet.write_string(row, 1, &member.position)?;
        sheet.write_string(row, 2, opt(&member.department))?;
        sheet.write_string(row, 3, opt(&member.email))?;
        sheet.write_string(row, 4, opt(&member.linkedin_url))?;
        sheet.write_string(row, 5, if member.is_visible { "Yes" } else { "No" })?;
        sheet.write_number(row, 6, member.display_order as f64)?;
        sheet.write_string(row, 7, member.created_at.to_rfc3339())?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Exports newsletter subscriptions.
pub fn export_newsletter(
    subscriptions: &[NewsletterSubscription],
) -> Result<Vec<u8>, SpreadsheetError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Subscribers")?;
    write_header(sheet, &NEWSLETTER_EXPORT_HEADERS)?;

    for (idx, sub) in subscriptions.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, &sub.email)?;
        sheet.write_string(row, 1, sub.status.as_str())?;
        sheet.write_string(row, 2, sub.subscribed_at.to_rfc3339())?;
    }

    Ok(workbook.save_to_buffer()?)
}
