//! Browser only. From the folder "crates/bodytrace-client-core" run one of
//! the following to execute the tests
//! - `wasm-pack test --headless --firefox`
//! - `wasm-pack test --headless --chrome`
#![cfg(target_arch = "wasm32")]

use bodytrace_client_core::{LocalStorageSession, SessionStore};
use bodytrace_shared::{
    imei::{Imei, ImeiSelection},
    session::Session,
    uac::{LoginIdentity, Role},
};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

const TEST_KEY: &str = "bodytrace_session_test";

fn store() -> SessionStore {
    SessionStore::new(Box::new(LocalStorageSession::new(TEST_KEY)))
}

#[wasm_bindgen_test]
fn session_survives_reload_and_clears() {
    // Arrange
    let identity = LoginIdentity {
        name: "Mid".to_string(),
        email: "mid@clinic.com".to_string(),
        imei: ImeiSelection::One(Imei::parse("111").unwrap()),
        role: Role::MiddleAdmin,
    };

    // Act
    let expected = store().set_session(identity).unwrap();
    let reloaded = store();

    // Assert
    assert_eq!(reloaded.session(), expected);

    // Act - logout
    reloaded.clear_session();

    // Assert
    assert_eq!(*store().session(), Session::default());
}
