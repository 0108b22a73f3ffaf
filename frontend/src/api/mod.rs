mod attendance;
pub mod client;
mod employees;
pub mod sample;
pub mod types;

pub use client::*;
pub use employees::SAMPLE_DATA_NOTICE;
pub use sample::*;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests;
