//! Types shared between the page server, the page controller and the CLI.

pub mod domain;
pub mod error;
pub mod protocol;
