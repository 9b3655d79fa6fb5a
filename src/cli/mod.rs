//! Terminal front end: renders the pipeline's output and writes exports

pub mod export;
pub mod list;
pub mod setup;
pub mod show;
pub mod ui;
