//! Used Car Explorer: filter a table of used-car listings and summarise the
//! matches in an egui dashboard.

pub mod app;
pub mod color;
pub mod data;
pub mod state;
pub mod ui;
