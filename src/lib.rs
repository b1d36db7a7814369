//! Traffic Dashboard - CSV accident data analysis & interactive charts
//!
//! Loads a CSV of traffic-accident records, normalizes its free-text fields,
//! filters by city, weather and severity, and summarizes the result for the
//! dashboard window.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod stats;
