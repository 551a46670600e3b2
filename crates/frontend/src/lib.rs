pub mod app;
pub mod domain;
pub mod layout;
pub mod routes;
pub mod shared;
pub mod system;

use contracts::shared::config::{ConfigSource, ConsoleConfig};
use leptos::prelude::*;
use system::auth::storage;
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    let (config, source) = ConsoleConfig::resolve(storage::get_config_override().as_deref());

    // initializes logging using the `log` crate
    let level = config
        .display
        .log_level
        .parse::<log::Level>()
        .unwrap_or(log::Level::Debug);
    _ = console_log::init_with_level(level);
    console_error_panic_hook::set_once();

    match &source {
        ConfigSource::Override => log::info!("Using stored console configuration"),
        ConfigSource::Default => log::debug!("Using default embedded configuration"),
        ConfigSource::InvalidOverride(err) => {
            log::warn!("Stored console configuration ignored: {err}")
        }
    }
    log::info!("API base: {}", config.api.base_url);

    leptos::mount::mount_to_body(move || view! { <app::App config=config /> });
}
