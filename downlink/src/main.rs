use clap::Parser;
use console::Prompter;
use downlink::{run_session, ChirpstackClient, Config, Error, Outcome, Result};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = Config::parse();

    console::init_tracing("warn");
    info!("Starting downlink sender");
    info!("ChirpStack server: {}", config.server);

    let result = run(&config).await;
    report(&result);
    std::process::exit(exit_code(&result));
}

async fn run(config: &Config) -> Result<Outcome> {
    let mut service = ChirpstackClient::new(&config.endpoint())?;
    let mut prompter = Prompter::stdio(config.max_attempts);
    run_session(config, &mut service, &mut prompter).await
}

fn report(result: &Result<Outcome>) {
    match result {
        Ok(Outcome::Queued { id }) => info!(queue_id = %id, "Done"),
        Ok(Outcome::Cancelled) => {}
        Err(Error::Console(console::Error::InputClosed)) => println!("\n\n❌ Cancelled by user"),
        // already reported on the console
        Err(Error::Console(console::Error::AttemptsExceeded { .. })) => {}
        Err(e @ Error::InvalidEncoding(_)) => println!("❌ Failed to convert data: {}", e),
        Err(e @ Error::Auth(_)) | Err(e @ Error::Login(_)) => println!("❌ {}", e),
        Err(e) => {
            error!("Downlink failed: {}", e);
            println!("❌ Failed to send downlink: {}", e);
        }
    }
}

/// A queued or deliberately cancelled downlink exits 0, anything else 1.
fn exit_code(result: &Result<Outcome>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code(&Ok(Outcome::Queued {
                id: "q-1".to_string()
            })),
            0
        );
        assert_eq!(exit_code(&Ok(Outcome::Cancelled)), 0);
        assert_eq!(
            exit_code(&Err(Error::Console(console::Error::InputClosed))),
            1
        );
        assert_eq!(
            exit_code(&Err(Error::Console(console::Error::AttemptsExceeded {
                attempts: 3
            }))),
            1
        );
        assert_eq!(
            exit_code(&Err(Error::InvalidEncoding("odd length".to_string()))),
            1
        );
        assert_eq!(
            exit_code(&Err(Error::Login(tonic::Status::unavailable("down")))),
            1
        );
    }

    #[test]
    fn test_login_status_reads_as_login_failure() {
        let e = Error::Login(tonic::Status::unavailable("connection refused"));
        let message = e.to_string();
        assert!(message.starts_with("Login failed: "));
        assert!(message.ends_with("connection refused"));
    }
}
