use chrono::Utc;
use clap::Parser;
use console::Prompter;
use exporter::{run_session, Config, Error, ExportSummary, Result, ThingsboardClient};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = Config::parse();

    console::init_tracing("warn");
    info!("Starting telemetry exporter");
    info!("Output directory: {}", config.output_dir.display());

    let mut prompter = Prompter::stdio(config.max_attempts);
    let page_size = config.page_size;
    let result = run_session(&config, &mut prompter, Utc::now(), |base_url| {
        ThingsboardClient::new(base_url, page_size)
    })
    .await;

    report(&result);
    std::process::exit(exit_code(&result));
}

fn report(result: &Result<ExportSummary>) {
    match result {
        Ok(summary) => {
            info!(path = %summary.path.display(), devices = summary.reports.len(), "Export finished")
        }
        Err(Error::Console(console::Error::InputClosed)) => println!("\n\n❌ Cancelled by user"),
        // already reported on the console
        Err(Error::Console(console::Error::AttemptsExceeded { .. })) | Err(Error::InvalidCredentials) => {}
        Err(e) => {
            error!("Export failed: {}", e);
            println!("❌ Export failed: {}", e);
        }
    }
}

/// A written workbook exits 0, even when some devices failed; anything else 1.
fn exit_code(result: &Result<ExportSummary>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exporter::export::DeviceReport;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        let partial = ExportSummary {
            path: PathBuf::from("telemetry_export_20240102_053000.xlsx"),
            reports: vec![
                ("Boiler".to_string(), DeviceReport::Exported { rows: 3 }),
                ("Chiller".to_string(), DeviceReport::Failed("timeout".to_string())),
            ],
        };
        assert_eq!(exit_code(&Ok(partial)), 0);
        assert_eq!(exit_code(&Err(Error::InvalidCredentials)), 1);
        assert_eq!(
            exit_code(&Err(Error::Console(console::Error::InputClosed))),
            1
        );
        assert_eq!(
            exit_code(&Err(Error::InvalidWindow {
                start_ts: 10,
                end_ts: 5
            })),
            1
        );
    }
}
