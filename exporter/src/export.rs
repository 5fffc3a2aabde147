use crate::client::TelemetrySource;
use crate::errors::Result;
use crate::merge::merge_samples;
use crate::model::{Device, TimeseriesData};
use crate::window::{format_ist, TimeWindow};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{error, info, warn};

pub const TIMESTAMP_HEADER: &str = "Timestamp (IST)";
pub const NO_SUCH_DEVICE: &str = "No such device";
pub const FETCH_FAILED: &str = "Failed to fetch data";
pub const NO_DATA: &str = "No data available for given time range";

const SHEET_NAME_MAX: usize = 31;
const SHEET_NAME_FORBIDDEN: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Empty,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
            Value::String(s) => Cell::Text(s.clone()),
            other => Cell::Text(other.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

/// What happened to one requested device.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceReport {
    Exported { rows: usize },
    NoData,
    Failed(String),
    Missing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceExport {
    pub device: String,
    pub sheet: Sheet,
    pub report: DeviceReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySelection {
    All,
    Only(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub devices: Vec<String>,
    pub keys: KeySelection,
    pub window: TimeWindow,
    pub interval_minutes: u32,
}

/// Builds one sheet per requested device.
///
/// Devices are processed one after another; a failure for one device is
/// recorded on its sheet and never stops the others.
pub async fn export_devices<S>(
    source: &S,
    devices: &[Device],
    request: &ExportRequest,
) -> Vec<DeviceExport>
where
    S: TelemetrySource + Sync + ?Sized,
{
    let mut used_names = HashSet::new();
    let mut exports = Vec::with_capacity(request.devices.len());

    for name in &request.devices {
        let sheet_name = unique_sheet_name(name, &mut used_names);
        let (rows, report) = match devices.iter().find(|device| &device.name == name) {
            None => {
                warn!(device = %name, "No such device");
                (vec![vec![Cell::from(NO_SUCH_DEVICE)]], DeviceReport::Missing)
            }
            Some(device) => match export_device(source, device, request).await {
                Ok(Some(rows)) => {
                    let count = rows.len() - 1;
                    (rows, DeviceReport::Exported { rows: count })
                }
                Ok(None) => {
                    info!(device = %name, "No data for device");
                    (vec![vec![Cell::from(NO_DATA)]], DeviceReport::NoData)
                }
                Err(e) => {
                    error!(device = %name, "Failed to fetch data: {}", e);
                    (
                        vec![vec![Cell::from(FETCH_FAILED)]],
                        DeviceReport::Failed(e.to_string()),
                    )
                }
            },
        };

        exports.push(DeviceExport {
            device: name.clone(),
            sheet: Sheet {
                name: sheet_name,
                rows,
            },
            report,
        });
    }

    exports
}

/// Header plus data rows, or `None` when the device has nothing in the window.
async fn export_device<S>(
    source: &S,
    device: &Device,
    request: &ExportRequest,
) -> Result<Option<Vec<Vec<Cell>>>>
where
    S: TelemetrySource + Sync + ?Sized,
{
    let requested = match &request.keys {
        KeySelection::Only(keys) => keys.clone(),
        KeySelection::All => source.device_keys(device.id()).await?,
    };
    if requested.is_empty() {
        return Ok(None);
    }

    let limit = request.window.fetch_limit(request.interval_minutes)?;
    info!(
        device = %device.name,
        id = device.id(),
        days = %format!("{:.2}", request.window.total_days()),
        interval = request.interval_minutes,
        limit,
        "Fetching telemetry"
    );

    let data = source
        .timeseries(device.id(), &requested, &request.window, limit)
        .await?;
    if data.values().all(Vec::is_empty) {
        return Ok(None);
    }

    let columns = match &request.keys {
        KeySelection::Only(keys) => keys.clone(),
        KeySelection::All => response_columns(&requested, &data),
    };

    let mut rows = Vec::new();
    let mut header = vec![Cell::from(TIMESTAMP_HEADER)];
    header.extend(columns.iter().map(|key| Cell::from(key.as_str())));
    rows.push(header);

    for row in merge_samples(&data, &columns) {
        let mut cells = vec![Cell::Text(format_ist(row.ts))];
        cells.extend(
            row.values
                .iter()
                .map(|value| value.as_ref().map(Cell::from).unwrap_or(Cell::Empty)),
        );
        rows.push(cells);
    }

    Ok(Some(rows))
}

/// Device keys present in the response, in device-key order, then any other
/// response keys.
fn response_columns(device_keys: &[String], data: &TimeseriesData) -> Vec<String> {
    let mut columns: Vec<String> = device_keys
        .iter()
        .filter(|key| data.contains_key(*key))
        .cloned()
        .collect();
    for key in data.keys() {
        if !columns.contains(key) {
            columns.push(key.clone());
        }
    }
    columns
}

/// A valid worksheet name for `device`, distinct from every name in `used`
/// (compared case-insensitively).
pub fn unique_sheet_name(device: &str, used: &mut HashSet<String>) -> String {
    let mut base: String = device
        .chars()
        .map(|c| if SHEET_NAME_FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();
    if base.starts_with('\'') {
        base.replace_range(0..1, "_");
    }
    if base.trim().is_empty() {
        base = "Sheet".to_string();
    }

    let mut candidate = closing_apostrophe_fixed(truncate_chars(&base, SHEET_NAME_MAX));
    let mut n = 2;
    while used.contains(&candidate.to_lowercase()) {
        let suffix = format!(" ({})", n);
        candidate = format!(
            "{}{}",
            truncate_chars(&base, SHEET_NAME_MAX - suffix.chars().count()),
            suffix
        );
        n += 1;
    }

    used.insert(candidate.to_lowercase());
    candidate
}

// a trailing apostrophe is not allowed either
fn closing_apostrophe_fixed(mut name: String) -> String {
    if name.ends_with('\'') {
        name.pop();
        name.push('_');
    }
    name
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_name_truncated() {
        let mut used = HashSet::new();
        let name = unique_sheet_name("Basement boiler room temperature probe", &mut used);
        assert_eq!(name, "Basement boiler room temperatur");
        assert_eq!(name.chars().count(), 31);
    }

    #[test]
    fn test_sheet_name_forbidden_chars() {
        let mut used = HashSet::new();
        assert_eq!(
            unique_sheet_name("Line 1/2 [north]: *", &mut used),
            "Line 1_2 _north__ _"
        );
        assert_eq!(unique_sheet_name("'quoted'", &mut used), "_quoted_");
    }

    #[test]
    fn test_sheet_name_deduplicated() {
        let mut used = HashSet::new();
        let long = "A".repeat(40);
        let first = unique_sheet_name(&long, &mut used);
        let second = unique_sheet_name(&long, &mut used);
        assert_eq!(first, "A".repeat(31));
        assert_eq!(second, format!("{} (2)", "A".repeat(27)));
        assert_eq!(unique_sheet_name("pump", &mut used), "pump");
        assert_eq!(unique_sheet_name("PUMP", &mut used), "PUMP (2)");
    }

    #[test]
    fn test_sheet_name_apostrophe_does_not_collide() {
        let mut used = HashSet::new();
        assert_eq!(unique_sheet_name("ab_", &mut used), "ab_");
        assert_eq!(unique_sheet_name("ab'", &mut used), "ab' (2)");

        let mut used = HashSet::new();
        let long = format!("{}'", "B".repeat(30));
        assert_eq!(unique_sheet_name(&long, &mut used), format!("{}_", "B".repeat(30)));
        assert_eq!(
            unique_sheet_name(&long, &mut used),
            format!("{} (2)", "B".repeat(27))
        );
    }

    #[test]
    fn test_empty_sheet_name() {
        let mut used = HashSet::new();
        assert_eq!(unique_sheet_name("  ", &mut used), "Sheet");
    }

    #[test]
    fn test_cell_from_value() {
        assert_eq!(Cell::from(&Value::from("21.5")), Cell::Text("21.5".to_string()));
        assert_eq!(Cell::from(&Value::from(21.5)), Cell::Number(21.5));
        assert_eq!(Cell::from(&Value::from(true)), Cell::Bool(true));
        assert_eq!(Cell::from(&Value::Null), Cell::Empty);
    }

    #[test]
    fn test_response_columns_order() {
        let mut data = TimeseriesData::new();
        data.insert("humidity".to_string(), Vec::new());
        data.insert("temperature".to_string(), Vec::new());
        data.insert("alarm".to_string(), Vec::new());

        let device_keys = vec![
            "temperature".to_string(),
            "battery".to_string(),
            "humidity".to_string(),
        ];
        assert_eq!(
            response_columns(&device_keys, &data),
            vec!["temperature", "humidity", "alarm"]
        );
    }
}
