use crate::payload::Payload;

pub const FPORT_MIN: u32 = 1;
pub const FPORT_MAX: u32 = 223;

/// A downlink ready to be enqueued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItem {
    pub dev_eui: String,
    pub f_port: u32,
    pub payload: Payload,
    pub confirmed: bool,
}

/// How the operator supplies the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMethod {
    Text,
    Hex,
}
