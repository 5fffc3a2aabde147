use crate::client::DownlinkService;
use crate::config::Config;
use crate::errors::Result;
use crate::model::{InputMethod, QueueItem, FPORT_MAX, FPORT_MIN};
use crate::payload::Payload;
use console::Prompter;
use std::io::{BufRead, Write};
use tracing::{error, info, warn};

const DEV_EUI_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Queued { id: String },
    Cancelled,
}

/// Runs one interactive downlink session against `service`.
///
/// Nothing reaches the network after login until the payload has been
/// encoded and the operator has confirmed the summary.
pub async fn run_session<S, R, W>(
    config: &Config,
    service: &mut S,
    prompter: &mut Prompter<R, W>,
) -> Result<Outcome>
where
    S: DownlinkService + Send,
    R: BufRead,
    W: Write,
{
    prompter.rule('=')?;
    prompter.say("   ChirpStack LoRaWAN Downlink Sender")?;
    prompter.rule('=')?;
    prompter.say("")?;

    let username = prompter.line("👤 Username: ")?;
    let password = prompter.line("🔑 Password: ")?;

    prompter.say("🔐 Logging in...")?;
    let token = match service.login(&username, &password).await {
        Ok(token) => token,
        Err(e) => {
            error!("Login failed: {}", e);
            prompter.say("❌ Login failed!")?;
            return Err(e);
        }
    };
    prompter.say("✅ Login successful!")?;
    prompter.say("")?;
    prompter.rule('-')?;

    let dev_eui = select_device(config, prompter)?;
    prompter.say("")?;
    prompter.rule('-')?;

    let f_port = prompter.ask(
        &format!("📡 FPort ({}-{}): ", FPORT_MIN, FPORT_MAX),
        None,
        &format!("FPort must be a number between {} and {}", FPORT_MIN, FPORT_MAX),
        parse_f_port,
    )?;
    prompter.say("")?;

    prompter.say("📝 Data Input Method:")?;
    prompter.say("   1. Enter text (will be converted to hex)")?;
    prompter.say("   2. Enter hex directly")?;
    let method = match prompter.choose("   Choice (1/2): ", &["1", "2"], "Please enter 1 or 2")? {
        0 => InputMethod::Text,
        _ => InputMethod::Hex,
    };
    prompter.say("")?;

    let payload = read_payload(method, prompter)?;
    prompter.say(format!("   📦 Base64 encoded: {}", payload.to_base64()))?;
    prompter.say("")?;

    let confirmed = prompter.confirm("🔔 Require confirmation from device? (y/N): ", false)?;
    prompter.say("")?;
    prompter.rule('-')?;
    prompter.say("")?;

    let item = QueueItem {
        dev_eui,
        f_port,
        payload,
        confirmed,
    };
    print_summary(&item, prompter)?;

    if !prompter.confirm("➡️  Send downlink? (Y/n): ", true)? {
        info!("Downlink cancelled by operator");
        prompter.say("❌ Cancelled")?;
        return Ok(Outcome::Cancelled);
    }
    prompter.say("")?;

    prompter.say(format!("📤 Sending downlink to device {}...", item.dev_eui))?;
    let id = service.enqueue(&token, &item).await?;

    prompter.say("✅ Downlink queued successfully!")?;
    prompter.say(format!("   Queue ID: {}", id))?;
    prompter.say("")?;
    prompter.rule('=')?;
    prompter.say("✅ Downlink sent successfully!")?;
    prompter.say("   The device will receive it on its next uplink (Class A)")?;
    prompter.rule('=')?;

    Ok(Outcome::Queued { id })
}

fn select_device<R: BufRead, W: Write>(
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> Result<String> {
    prompter.say("📱 Device Selection:")?;
    prompter.say(format!(
        "   Default: {} (DevEUI: {})",
        config.default_device_label, config.default_dev_eui
    ))?;

    if prompter.confirm("   Use default device? (Y/n): ", true)? {
        return Ok(config.default_dev_eui.clone());
    }

    let dev_eui = prompter.ask(
        "   Enter DevEUI: ",
        None,
        "DevEUI must be 16 hex digits",
        parse_dev_eui,
    )?;
    Ok(dev_eui)
}

fn read_payload<R: BufRead, W: Write>(
    method: InputMethod,
    prompter: &mut Prompter<R, W>,
) -> Result<Payload> {
    match method {
        InputMethod::Text => {
            let text = prompter.line("✍️  Enter text message: ")?;
            let payload = Payload::from_text(&text);
            prompter.say(format!("   📊 Converted to hex: {}", payload.hex()))?;
            Ok(payload)
        }
        InputMethod::Hex => {
            let raw = prompter.line("🔢 Enter hex data (e.g., 0300 or AABBCC): ")?;
            Payload::from_hex(&raw).map_err(|e| {
                warn!("Rejected payload: {}", e);
                e
            })
        }
    }
}

fn print_summary<R: BufRead, W: Write>(
    item: &QueueItem,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    prompter.say("📋 Summary:")?;
    prompter.say(format!("   Device:    {}", item.dev_eui))?;
    prompter.say(format!("   FPort:     {}", item.f_port))?;
    prompter.say(format!("   Data (hex): {}", item.payload.hex()))?;
    prompter.say(format!("   Data (b64): {}", item.payload.to_base64()))?;
    prompter.say(format!(
        "   Confirmed: {}",
        if item.confirmed { "Yes" } else { "No" }
    ))?;
    prompter.say("")?;
    Ok(())
}

/// FPort in the application range 1-223.
pub fn parse_f_port(raw: &str) -> std::result::Result<u32, String> {
    let port: u32 = raw
        .parse()
        .map_err(|_| format!("{:?} is not a number", raw))?;
    if !(FPORT_MIN..=FPORT_MAX).contains(&port) {
        return Err(format!("{} is outside {}-{}", port, FPORT_MIN, FPORT_MAX));
    }
    Ok(port)
}

/// A DevEUI is 8 bytes written as 16 hex digits; returned lowercased.
pub fn parse_dev_eui(raw: &str) -> std::result::Result<String, String> {
    let dev_eui: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if dev_eui.len() != DEV_EUI_LEN || !dev_eui.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("{:?} is not a 16 digit hex DevEUI", raw));
    }
    Ok(dev_eui.to_lowercase())
}
