use crate::errors::Result;
use crate::export::{Cell, Sheet};
use crate::window::ist;
use chrono::{DateTime, Utc};
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tracing::{debug, info};

/// `telemetry_export_YYYYmmdd_HHMMSS.xlsx`, stamped in IST.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!(
        "telemetry_export_{}.xlsx",
        now.with_timezone(&ist()).format("%Y%m%d_%H%M%S")
    )
}

/// Writes `sheets` to an `.xlsx` file at `path`, in order.
pub fn write_workbook(sheets: &[Sheet], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name.as_str())?;

        for (r, row) in sheet.rows.iter().enumerate() {
            let r = r as u32;
            for (c, cell) in row.iter().enumerate() {
                let c = c as u16;
                match cell {
                    Cell::Text(text) => {
                        worksheet.write_string(r, c, text.as_str())?;
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(r, c, *n)?;
                    }
                    Cell::Bool(b) => {
                        worksheet.write_boolean(r, c, *b)?;
                    }
                    Cell::Empty => {}
                }
            }
        }
        debug!(sheet = %sheet.name, rows = sheet.rows.len(), "Sheet written");
    }

    workbook.save(path)?;
    info!(path = %path.display(), sheets = sheets.len(), "Workbook saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_export_filename_in_ist() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 20, 15, 42).unwrap();
        assert_eq!(export_filename(now), "telemetry_export_20240310_014542.xlsx");
    }

    #[test]
    fn test_write_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let sheets = vec![
            Sheet {
                name: "Boiler".to_string(),
                rows: vec![
                    vec![Cell::from("Timestamp (IST)"), Cell::from("temp")],
                    vec![Cell::from("2024-01-01 05:30:00"), Cell::Number(21.5)],
                    vec![Cell::from("2024-01-01 05:33:00"), Cell::Empty],
                ],
            },
            Sheet {
                name: "Chiller".to_string(),
                rows: vec![vec![Cell::from("Failed to fetch data")]],
            },
        ];

        write_workbook(&sheets, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_invalid_sheet_name_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let sheets = vec![Sheet {
            name: "bad/name".to_string(),
            rows: Vec::new(),
        }];
        assert!(write_workbook(&sheets, &dir.path().join("out.xlsx")).is_err());
    }
}
