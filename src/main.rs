#![allow(warnings)]
//! Catalog Frontend Entry Point

mod app;
mod commands;
mod components;
mod context;
mod format;
mod store;

use std::sync::Arc;

use app::App;
use catalog_sync::AppConfig;
use components::ConfigErrorScreen;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let _ = console_logger::init_logger("Catalog", level);

    match AppConfig::from_build_env() {
        Ok(config) => {
            log::info!("[APP] Starting for client {}", config.client_id());
            let config = Arc::new(config);
            mount_to_body(move || view! { <App config=config /> });
        }
        Err(err) => {
            log::error!("[APP] Invalid configuration: {}", err);
            let message = err.to_string();
            mount_to_body(move || view! { <ConfigErrorScreen message=message /> });
        }
    }
}
