//! Stats module - aggregates over filtered views

mod aggregator;

pub use aggregator::{DashboardSummary, SummaryCalculator, TrendPoint};
