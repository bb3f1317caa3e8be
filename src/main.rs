//! Donation Platform Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod donation;
mod error;
mod format;
mod markdown;
mod models;
mod notification_center;
mod pages;
mod query;
mod routes;
mod settlement;
mod storage;
mod store;
mod validation;
mod wizard;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info };
    if let Err(e) = rolling_logger::init(level, config::AppConfig::from_env().log_capacity) {
        web_sys::console::error_1(&format!("logger init failed: {}", e).into());
    }
    log::info!("starting frontend v{}", env!("CARGO_PKG_VERSION"));

    mount_to_body(App);
}
