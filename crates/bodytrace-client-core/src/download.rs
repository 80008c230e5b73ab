//! Files returned by the binary endpoints and saving them for the user

use reqwest::header::{HeaderMap, CONTENT_DISPOSITION};

#[derive(Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for Download {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Download")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Download {
    /// Uses the name from `Content-Disposition` if the server sent one
    pub fn from_response_parts(headers: &HeaderMap, bytes: Vec<u8>, default_name: &str) -> Self {
        let file_name = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(file_name_from_disposition)
            .unwrap_or_else(|| default_name.to_string());
        Self { file_name, bytes }
    }
}

/// Extracts `filename` from a `Content-Disposition` header value. Path
/// components are stripped.
pub fn file_name_from_disposition(value: &str) -> Option<String> {
    let name = value.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("filename")
            .then(|| value.trim().trim_matches('"'))
    })?;
    let name = name.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};

    use anyhow::Context as _;

    use super::Download;

    impl Download {
        /// Writes the file into `folder` and returns the full path written
        #[tracing::instrument(skip(self), fields(file_name = %self.file_name))]
        pub fn save(&self, folder: &Path) -> anyhow::Result<PathBuf> {
            std::fs::create_dir_all(folder)
                .with_context(|| format!("failed to create export folder {folder:?}"))?;
            let path = folder.join(&self.file_name);
            std::fs::write(&path, &self.bytes)
                .with_context(|| format!("failed to save {path:?}"))?;
            tracing::info!(?path, "download saved");
            Ok(path)
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use anyhow::{anyhow, Context as _};
    use web_sys::{
        js_sys,
        wasm_bindgen::{closure::Closure, JsCast as _},
    };

    use super::Download;

    const OBJECT_URL_REVOKE_DELAY_MS: i32 = 1_000;

    impl Download {
        /// Hands the file to the browser by clicking a temporary link
        #[tracing::instrument(skip(self), fields(file_name = %self.file_name))]
        pub fn save(&self) -> anyhow::Result<()> {
            let window = web_sys::window().context("no window found")?;
            let document = window
                .document()
                .context("no document found")?;

            let parts = js_sys::Array::new();
            parts.push(&js_sys::Uint8Array::from(self.bytes.as_slice()));
            let blob = web_sys::Blob::new_with_u8_array_sequence(&parts)
                .map_err(|e| anyhow!("failed to create blob: {e:?}"))?;
            let url = web_sys::Url::create_object_url_with_blob(&blob)
                .map_err(|e| anyhow!("failed to create object url: {e:?}"))?;

            let anchor = document
                .create_element("a")
                .map_err(|e| anyhow!("failed to create anchor: {e:?}"))?
                .dyn_into::<web_sys::HtmlAnchorElement>()
                .map_err(|_| anyhow!("created element was not an anchor"))?;
            anchor.set_href(&url);
            anchor.set_download(&self.file_name);
            anchor.click();

            // The browser reads the url after this task ends
            let revoke = Closure::once_into_js(move || {
                if let Err(e) = web_sys::Url::revoke_object_url(&url) {
                    tracing::warn!("failed to revoke object url: {e:?}");
                }
            });
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    revoke.unchecked_ref(),
                    OBJECT_URL_REVOKE_DELAY_MS,
                )
                .map_err(|e| anyhow!("failed to schedule object url revoke: {e:?}"))?;
            Ok(())
        }
    }
}
