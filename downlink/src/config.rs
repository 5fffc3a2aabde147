use clap::Parser;
use console::DEFAULT_MAX_ATTEMPTS;

pub const DEFAULT_SERVER: &str = "192.168.0.24:8081";
pub const DEFAULT_DEV_EUI: &str = "0792fc1675531112";

/// Runtime settings for the downlink sender. Everything else is asked for
/// interactively.
#[derive(Debug, Clone, Parser)]
#[command(name = "downlink", version, about = "Send a downlink to a LoRaWAN device through ChirpStack")]
pub struct Config {
    /// ChirpStack gRPC API address (host:port or full URL)
    #[arg(long, env = "CHIRPSTACK_SERVER", default_value = DEFAULT_SERVER)]
    pub server: String,

    /// DevEUI offered as the default device
    #[arg(long, env = "DEFAULT_DEV_EUI", default_value = DEFAULT_DEV_EUI)]
    pub default_dev_eui: String,

    /// Label shown next to the default DevEUI
    #[arg(long, env = "DEFAULT_DEVICE_LABEL", default_value = "Grove E5")]
    pub default_device_label: String,

    /// Attempts allowed for each prompt before giving up
    #[arg(long, env = "MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl Config {
    /// Endpoint URI for the plaintext gRPC channel.
    pub fn endpoint(&self) -> String {
        if self.server.starts_with("http://") || self.server.starts_with("https://") {
            self.server.clone()
        } else {
            format!("http://{}", self.server)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            default_dev_eui: DEFAULT_DEV_EUI.to_string(),
            default_device_label: "Grove E5".to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}
