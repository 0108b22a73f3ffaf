use log::{info, Level};

pub mod api;
mod components;
pub mod config;
pub mod pages;
mod router;
pub mod state;
#[cfg(test)]
mod test_support;
pub mod utils;

pub use router::{app_root, mount_app};

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(Level::Debug);
    info!("Starting Staffdesk frontend");

    // Runtime config loads in the background; the gateway awaits it on first use.
    leptos::spawn_local(config::init());

    mount_app();
}
