//! CLI command implementations.

pub mod analyze;
pub mod batch;
pub mod common;
pub mod generate;
pub mod hrir;
pub mod info;
pub mod note;
pub mod response;
pub mod spatialize;
pub mod spectrum;
pub mod split;
