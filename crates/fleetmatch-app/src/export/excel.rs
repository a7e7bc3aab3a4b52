//! Excel export functionality

use fleetmatch_types::{BatchResults, Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Export batch results to Excel file
pub fn export_to_excel(results: &BatchResults, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    // Add summary sheet
    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, results)?;

    // Add details sheet
    let details_sheet = workbook.add_worksheet();
    write_details_sheet(details_sheet, results)?;

    // Save workbook
    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, results: &BatchResults) -> Result<()> {
    sheet
        .set_name("Summary")
        .map_err(|e| Error::Excel(e.to_string()))?;

    // Header format
    let header_format = Format::new().set_bold();

    sheet
        .write_string_with_format(0, 0, "Fleet Match Report", &header_format)
        .map_err(|e| Error::Excel(e.to_string()))?;

    sheet
        .write_string(2, 0, "Run Date:")
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_string(2, 1, &results.started_at.to_rfc3339())
        .map_err(|e| Error::Excel(e.to_string()))?;

    sheet
        .write_string(3, 0, "Total Measurements:")
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number(3, 1, results.total_measurements as f64)
        .map_err(|e| Error::Excel(e.to_string()))?;

    sheet
        .write_string(4, 0, "Matched:")
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number(4, 1, results.matched as f64)
        .map_err(|e| Error::Excel(e.to_string()))?;

    sheet
        .write_string(5, 0, "Unmatched:")
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number(5, 1, results.unmatched as f64)
        .map_err(|e| Error::Excel(e.to_string()))?;

    if let Some(rate) = results.match_rate_percent() {
        sheet
            .write_string(6, 0, "Match Rate:")
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(6, 1, &format!("{:.1}%", rate))
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    Ok(())
}

fn write_details_sheet(sheet: &mut Worksheet, results: &BatchResults) -> Result<()> {
    sheet
        .set_name("Details")
        .map_err(|e| Error::Excel(e.to_string()))?;

    // Header format
    let header_format = Format::new().set_bold();

    let headers = [
        "File",
        "Extracted VIN",
        "Matched",
        "Matched VIN",
        "Record Date",
        "Engine",
        "Transmission",
        "Reg No",
        "Engine Ever Running",
        "Date",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    for (idx, entry) in results.entries.iter().enumerate() {
        let row = (idx + 1) as u32;
        let cells = [
            entry.source.as_str(),
            entry.vin.as_str(),
            if entry.matched { "yes" } else { "no" },
            entry.matched_vin.as_deref().unwrap_or(""),
            entry.record_date.as_deref().unwrap_or(""),
            entry.engine.as_deref().unwrap_or(""),
            entry.transmission.as_deref().unwrap_or(""),
            entry.registration_number.as_deref().unwrap_or(""),
            if entry.engine_ever_running { "yes" } else { "no" },
            entry.measurement_date.as_str(),
        ];
        for (col, value) in cells.iter().enumerate() {
            sheet
                .write_string(row, col as u16, *value)
                .map_err(|e| Error::Excel(e.to_string()))?;
        }
    }

    Ok(())
}
