//! Browser binding for the page controller.
//!
//! Without the `web` feature on a wasm32 target this crate only carries the
//! platform-independent pieces (config parsing, console line assembly) so the
//! workspace builds natively.
//!
//! Enable the binding with: `--features web --target wasm32-unknown-unknown`.

pub mod config;
pub mod console;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;
