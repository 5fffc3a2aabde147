use crate::client::TelemetrySource;
use crate::config::Config;
use crate::errors::{Error, Result};
use crate::export::{export_devices, DeviceReport, ExportRequest, KeySelection, Sheet};
use crate::model::Device;
use crate::window::{parse_ist, TimeWindow};
use crate::workbook::{export_filename, write_workbook};
use chrono::{DateTime, Duration, Utc};
use console::Prompter;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info};

const DATE_PROMPT_HINT: &str = "DDMMYYYY HH:MM AM/PM";

/// Where the workbook went and how each device fared.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub reports: Vec<(String, DeviceReport)>,
}

/// Runs one interactive export.
///
/// `connect` builds the source once the operator has chosen a base URL; `now`
/// anchors the default time range and the output filename.
pub async fn run_session<S, F, R, W>(
    config: &Config,
    prompter: &mut Prompter<R, W>,
    now: DateTime<Utc>,
    connect: F,
) -> Result<ExportSummary>
where
    S: TelemetrySource + Send + Sync,
    F: FnOnce(&str) -> Result<S>,
    R: BufRead,
    W: Write,
{
    prompter.say("===== ThingsBoard Telemetry Exporter =====\n")?;

    let base_url = prompter.ask(
        &format!("Enter Base URL [Default: {}]: ", config.base_url),
        Some(config.base_url.clone()),
        "Base URL must start with http:// or https://",
        parse_base_url,
    )?;
    let username = prompter.ask(
        &format!("Enter Username [Default: {}]: ", config.default_username),
        Some(config.default_username.clone()),
        "Username required",
        |raw| Ok::<_, String>(raw.to_string()),
    )?;
    let password = prompter.ask(
        &format!(
            "Enter Password [Default: {}]: ",
            "*".repeat(config.default_password.len())
        ),
        Some(config.default_password.clone()),
        "Password required",
        |raw| Ok::<_, String>(raw.to_string()),
    )?;

    let mut source = connect(&base_url)?;
    if let Err(e) = source.login(&username, &password).await {
        error!("Login failed: {}", e);
        prompter.say(format!("❌ {}", e))?;
        return Err(e);
    }

    let devices = source.list_devices().await?;
    prompter.say("\nAvailable Devices:")?;
    for device in &devices {
        prompter.say(format!("{} (ID: {})", device.name, device.id()))?;
    }

    let device_names = prompter.ask(
        "\nEnter device names separated by comma or 'all' [Default: all]: ",
        None,
        "Provide at least one device name",
        |raw| parse_device_selection(raw, &devices),
    )?;
    let keys = prompter.ask(
        "\nEnter telemetry keys separated by comma or 'all' [Default: all]: ",
        None,
        "Provide at least one key",
        parse_key_selection,
    )?;

    let window = ask_window(config, prompter, now)?;
    let interval_minutes = prompter.ask(
        &format!(
            "\nEnter data interval in minutes [Default: {}]: ",
            config.default_interval
        ),
        Some(config.default_interval),
        "Interval must be a positive integer",
        parse_interval,
    )?;

    let request = ExportRequest {
        devices: device_names,
        keys,
        window,
        interval_minutes,
    };
    info!(
        devices = request.devices.len(),
        start_ts = window.start_ts(),
        end_ts = window.end_ts(),
        interval_minutes,
        "Starting export"
    );

    let exports = export_devices(&source, &devices, &request).await;

    let mut sheets: Vec<Sheet> = Vec::with_capacity(exports.len());
    let mut reports = Vec::with_capacity(exports.len());
    for export in exports {
        match &export.report {
            DeviceReport::Exported { rows } => {
                prompter.say(format!("✅ {}: {} rows", export.device, rows))?
            }
            DeviceReport::NoData => prompter.say(format!("ℹ️ No data for {}", export.device))?,
            DeviceReport::Failed(reason) => prompter.say(format!(
                "❌ Failed to fetch data for {}: {}",
                export.device, reason
            ))?,
            DeviceReport::Missing => {
                prompter.say(format!("⚠️ No such device: {}", export.device))?
            }
        }
        reports.push((export.device, export.report));
        sheets.push(export.sheet);
    }

    let path = config.output_dir.join(export_filename(now));
    write_workbook(&sheets, &path)?;
    prompter.say(format!(
        "\n✅ Export completed. File saved as {}",
        path.display()
    ))?;

    Ok(ExportSummary { path, reports })
}

fn ask_window<R: BufRead, W: Write>(
    config: &Config,
    prompter: &mut Prompter<R, W>,
    now: DateTime<Utc>,
) -> Result<TimeWindow> {
    let default_end = now.timestamp_millis();
    let default_start = (now - Duration::days(config.default_lookback_days)).timestamp_millis();

    let start_ts = prompter.ask(
        &format!(
            "Enter start date/time ({}) [Default: {} days back]: ",
            DATE_PROMPT_HINT, config.default_lookback_days
        ),
        Some(default_start),
        "Invalid date/time format",
        parse_ist,
    )?;
    // the default end goes through the same start check as a typed one
    prompter.ask(
        &format!("Enter end date/time ({}) [Default: now]: ", DATE_PROMPT_HINT),
        None,
        "Invalid date/time format or not after start",
        |raw: &str| -> Result<TimeWindow> {
            let end_ts = if raw.is_empty() {
                default_end
            } else {
                parse_ist(raw)?
            };
            TimeWindow::new(start_ts, end_ts)
        },
    )
    .map_err(Error::from)
}

/// Accepts `http://` and `https://` URLs.
pub fn parse_base_url(raw: &str) -> std::result::Result<String, String> {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        Ok(raw.trim_end_matches('/').to_string())
    } else {
        Err(format!("{:?} is not an http(s) URL", raw))
    }
}

/// `all` (or nothing) selects every device; otherwise a comma separated list
/// of names, deduplicated in order. Unknown names are kept so they show up as
/// missing in the export.
pub fn parse_device_selection(
    raw: &str,
    devices: &[Device],
) -> std::result::Result<Vec<String>, String> {
    let names: Vec<String> = if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
        devices.iter().map(|device| device.name.clone()).collect()
    } else {
        split_list(raw)
    };

    if names.is_empty() {
        return Err("no devices selected".to_string());
    }
    Ok(names)
}

/// `all` (or nothing) selects every key of each device.
pub fn parse_key_selection(raw: &str) -> std::result::Result<KeySelection, String> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
        return Ok(KeySelection::All);
    }

    let keys = split_list(raw);
    if keys.is_empty() {
        return Err("no keys given".to_string());
    }
    Ok(KeySelection::Only(keys))
}

pub fn parse_interval(raw: &str) -> std::result::Result<u32, Error> {
    match raw.parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(Error::InvalidInterval),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        if !items.iter().any(|seen| seen == item) {
            items.push(item.to_string());
        }
    }
    items
}
