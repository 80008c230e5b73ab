//! Settings decided before the first frame

use bodytrace_client_core::SessionStore;
use bodytrace_shared::{
    const_config::client::{CLIENT_DEFAULT_PAGE_SIZE, CLIENT_DEFAULT_SERVER_ADDRESS},
    pagination::PageRequest,
};

#[derive(Debug, Clone)]
pub struct StartupSettings {
    pub server_address: String,
    #[cfg(not(target_arch = "wasm32"))]
    pub session_file: std::path::PathBuf,
    #[cfg(not(target_arch = "wasm32"))]
    pub export_folder: std::path::PathBuf,
    pub default_page_size: u32,
    /// Route path to open once the app starts
    pub open_path: Option<String>,
}

impl Default for StartupSettings {
    fn default() -> Self {
        Self {
            server_address: CLIENT_DEFAULT_SERVER_ADDRESS.to_string(),
            #[cfg(not(target_arch = "wasm32"))]
            session_file: "session.json".into(),
            #[cfg(not(target_arch = "wasm32"))]
            export_folder: "exports".into(),
            default_page_size: CLIENT_DEFAULT_PAGE_SIZE,
            open_path: None,
        }
    }
}

impl StartupSettings {
    /// Command line arguments take precedence over the configuration files
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(settings: crate::configuration::ClientSettings, cli: &crate::cli::Cli) -> Self {
        Self {
            server_address: cli
                .server_address
                .clone()
                .unwrap_or(settings.server_address),
            session_file: settings.session_file,
            export_folder: settings.export_folder,
            default_page_size: settings.default_page_size,
            open_path: cli.open_path.clone(),
        }
    }

    /// The page to open comes from the URL fragment, e.g.
    /// `#/auth/reset-password/<token>` from a password reset email
    #[cfg(target_arch = "wasm32")]
    pub fn from_browser() -> Self {
        let open_path = web_sys::window()
            .and_then(|window| window.location().hash().ok())
            .and_then(|hash| path_from_fragment(&hash));
        Self {
            open_path,
            ..Default::default()
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::first(self.default_page_size).unwrap_or_else(|e| {
            tracing::warn!(?e, "invalid default page size in configuration");
            PageRequest::default()
        })
    }

    pub fn session_store(&self) -> SessionStore {
        #[cfg(not(target_arch = "wasm32"))]
        let persistence = bodytrace_client_core::JsonFileSession::new(&self.session_file);
        #[cfg(target_arch = "wasm32")]
        let persistence = bodytrace_client_core::LocalStorageSession::default();
        SessionStore::new(Box::new(persistence))
    }
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn path_from_fragment(fragment: &str) -> Option<String> {
    let path = fragment.trim_start_matches('#').trim();
    path.starts_with('/').then(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::reset_link("#/auth/reset-password/abc", Some("/auth/reset-password/abc"))]
    #[case::empty("", None)]
    #[case::not_a_path("#section", None)]
    fn fragment_to_path(#[case] fragment: &str, #[case] expected: Option<&str>) {
        assert_eq!(path_from_fragment(fragment).as_deref(), expected);
    }

    #[test]
    fn zero_page_size_falls_back() {
        let settings = StartupSettings {
            default_page_size: 0,
            ..Default::default()
        };
        assert_eq!(settings.page_request(), PageRequest::default());
    }
}
