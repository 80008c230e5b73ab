//! Talks to the device backend and owns the session
//! NB: The assumption is made that the async runtime has already been started
//! before any functions from this library are called

#![warn(unused_crate_dependencies)]

#[cfg(test)] // Included to prevent unused crate warning
mod warning_suppress {
    use bodytrace_time as _;
    use secrecy as _;
    use wasm_bindgen_test as _;
}

mod client;
mod download;
mod sequence;
mod session_store;

pub use client::{api::FileUpload, Client, UiCallBack};
pub use download::{file_name_from_disposition, Download};
pub use sequence::{RequestSequence, SequenceTag};
pub use session_store::{InMemorySession, SessionPersistence, SessionStore};

#[cfg(not(target_arch = "wasm32"))]
pub use session_store::JsonFileSession;
#[cfg(target_arch = "wasm32")]
pub use session_store::LocalStorageSession;
