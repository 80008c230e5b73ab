//! Browser only. From the folder "crates/bodytrace-client-core" run one of
//! the following to execute the tests
//! - `wasm-pack test --headless --firefox`
//! - `wasm-pack test --headless --chrome`
#![cfg(target_arch = "wasm32")]

use bodytrace_client_core::Download;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn save_hands_file_to_browser() {
    // Arrange
    let download = Download {
        file_name: "device_data.csv".to_string(),
        bytes: b"imei,weight\n111,70000\n".to_vec(),
    };

    // Act
    let first = download.save();
    let second = download.save();

    // Assert
    assert!(first.is_ok(), "{first:?}");
    assert!(second.is_ok(), "{second:?}");
}
