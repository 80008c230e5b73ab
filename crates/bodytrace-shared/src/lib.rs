//! Code shared between the dashboard crates

#![warn(unused_crate_dependencies)]

pub mod const_config;
pub mod device;
pub mod errors;
pub mod id;
pub mod imei;
mod macros;
pub mod pagination;
pub mod req_args;
pub mod routes;
pub mod session;
pub mod uac;
pub mod units;

pub use bodytrace_time as time;

#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;
