//! Animated neural-network page background.
//!
//! The simulation in [`core`] is plain Rust and runs anywhere; the browser
//! glue (DOM, listeners, animation frames, the exported `NeuralBackground`)
//! only exists on `wasm32`.

pub mod constants;
pub mod core;
pub mod input;
pub mod render;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod mount;

#[cfg(target_arch = "wasm32")]
pub use mount::NeuralBackground;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("neural-backdrop loaded");
    Ok(())
}
