use wasm_bindgen::prelude::*;

use crate::domain::config::DashboardConfig;
use crate::domain::logging::{LogComponent, get_logger};

pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;

/// Wire up panics, logging and the clock before anything else runs.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = Box::new(infrastructure::services::ConsoleLogger::new_development());
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    get_logger().info(LogComponent::Presentation("Initialize"), "dashboard services initialized");
}

/// Mount the dashboard shell and kick off one refresh pass over all panels.
#[wasm_bindgen]
pub fn mount_dashboard() {
    leptos::mount_to_body(app::App);
    wasm_bindgen_futures::spawn_local(async {
        application::dashboard::run_dashboard(DashboardConfig::default()).await;
    });
}
