//! Library components of the `vr-agent` binary.

pub mod logging;
pub mod settings;
