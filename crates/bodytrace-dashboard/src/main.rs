#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use bodytrace_dashboard::StartupSettings;
    use clap::Parser;
    let args = bodytrace_dashboard::cli::Cli::parse();

    if let Err(e) = bodytrace_dashboard::tracing::init(&args) {
        eprintln!("Failed to start tracing: {e}");
    }

    let settings = match bodytrace_dashboard::configuration::get_configuration() {
        Ok(configuration) => StartupSettings::new(configuration.client, &args),
        Err(e) => {
            tracing::error!("Failed to read configuration, using defaults: {e:#}");
            let defaults = StartupSettings::default();
            StartupSettings {
                server_address: args
                    .server_address
                    .clone()
                    .unwrap_or(defaults.server_address),
                open_path: args.open_path.clone(),
                ..defaults
            }
        }
    };
    tracing::info!(?settings, "starting dashboard");

    let rt = bodytrace_dashboard::background_worker::create_runtime();
    let _enter = rt.enter(); // This Guard must be held to call `tokio::spawn` anywhere in the program
    bodytrace_dashboard::background_worker::start_background_worker(rt); // This is also needed to prevent the runtime from stopping

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "BodyTrace Dashboard",
        native_options,
        Box::new(|cc| {
            Ok(Box::new(bodytrace_dashboard::DashboardApp::new(
                cc, settings,
            )))
        }),
    )
}

// When compiling to web using trunk
#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(bodytrace_dashboard::wasm_log_level()).ok();

    let web_options = eframe::WebOptions::default();
    let settings = bodytrace_dashboard::StartupSettings::from_browser();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window found")
            .document()
            .expect("No document found (No DOM)");

        let canvas = document
            .get_element_by_id("the_canvas_id")
            .expect("Failed to find the_canvas_id")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("the_canvas_id was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| {
                    Ok(Box::new(bodytrace_dashboard::DashboardApp::new(
                        cc, settings,
                    )))
                }),
            )
            .await;

        // Remove the loading text and spinner:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p> The app has crashed. See the developer console for details. </p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}
