//! Browser entry point for the Postboard web client.

mod api;
mod app;
mod components;
mod config;
mod containers;
mod logging;
mod models;
mod pages;
mod routes;
mod storage;

use app::Root;
use config::FrontendConfig;
use yew::Renderer;

fn main() {
    // Disable truncation of panic payloads to debug any panics
    std::panic::set_hook(Box::new(|info| {
        let payload = info
            .payload()
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| info.payload().downcast_ref::<&str>().copied())
            .unwrap_or("Unknown panic");
        let location = info.location().map_or_else(String::new, |location| {
            format!(" at {}:{}:{}", location.file(), location.line(), location.column())
        });
        web_sys::console::error_1(&format!("Panic: {payload}{location}").into());
    }));

    let config = FrontendConfig::new();
    logging::init(config.log_level());
    tracing::info!(api = config.api_base_url(), "starting Postboard");

    Renderer::<Root>::new().render();
}
