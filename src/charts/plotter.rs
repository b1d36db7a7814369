//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::stats::TrendPoint;
use chrono::DateTime;
use egui::{Color32, RichText, Sense, Shape, Stroke};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};
use std::collections::BTreeMap;
use std::f32::consts::TAU;

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

const CHART_HEIGHT: f32 = 280.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const BLANK_LABEL: &str = "(blank)";

/// A pie slice as fractions of a full turn.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub share: f64,
    pub start: f64,
    pub end: f64,
}

/// Creates dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Category text as shown to the user; empty cells read "(blank)".
    pub fn display_label(value: &str) -> &str {
        if value.is_empty() {
            BLANK_LABEL
        } else {
            value
        }
    }

    pub fn color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Bar chart of category -> count, categories along the x-axis.
    pub fn draw_count_bars(
        ui: &mut egui::Ui,
        id: &str,
        counts: &BTreeMap<String, usize>,
        x_label: &str,
        color: Color32,
    ) {
        let labels: Vec<String> = counts
            .keys()
            .map(|k| Self::display_label(k).to_string())
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_label)
            .y_axis_label("Accidents")
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 {
                    labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = counts
                    .iter()
                    .enumerate()
                    .map(|(i, (name, &n))| {
                        Bar::new(i as f64, n as f64)
                            .name(Self::display_label(name))
                            .width(0.6)
                            .fill(color.gamma_multiply(0.8))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).color(color));
            });
    }

    /// Cumulative slice bounds, in key order.
    pub fn pie_slices(shares: &BTreeMap<String, f64>) -> Vec<PieSlice> {
        let mut start = 0.0;
        shares
            .iter()
            .map(|(label, &share)| {
                let slice = PieSlice {
                    label: label.clone(),
                    share,
                    start,
                    end: start + share,
                };
                start += share;
                slice
            })
            .collect()
    }

    /// Pie chart of category -> proportion with a legend.
    pub fn draw_share_pie(ui: &mut egui::Ui, shares: &BTreeMap<String, f64>, decimals: usize) {
        let slices = Self::pie_slices(shares);
        if slices.is_empty() {
            ui.label(RichText::new("No Data").color(Color32::GRAY));
            return;
        }

        ui.horizontal(|ui| {
            let size = CHART_HEIGHT - 20.0;
            let (response, painter) = ui.allocate_painter(egui::vec2(size, size), Sense::hover());
            let center = response.rect.center();
            let radius = size / 2.0 - 4.0;

            for (i, slice) in slices.iter().enumerate() {
                let color = Self::color(i);
                let from = slice.start as f32 * TAU;
                let to = slice.end as f32 * TAU;
                // One triangle per step keeps every polygon convex
                let steps = (((to - from) / TAU) * 96.0).ceil().max(1.0) as usize;
                for s in 0..steps {
                    let a0 = from + (to - from) * s as f32 / steps as f32;
                    let a1 = from + (to - from) * (s + 1) as f32 / steps as f32;
                    let p0 = center + radius * egui::vec2(a0.sin(), -a0.cos());
                    let p1 = center + radius * egui::vec2(a1.sin(), -a1.cos());
                    painter.add(Shape::convex_polygon(vec![center, p0, p1], color, Stroke::NONE));
                }
            }

            ui.vertical(|ui| {
                for (i, slice) in slices.iter().enumerate() {
                    ui.horizontal(|ui| {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
                        ui.painter().rect_filled(rect, 3.0, Self::color(i));
                        ui.label(format!(
                            "{}  {:.*}%",
                            Self::display_label(&slice.label),
                            decimals,
                            slice.share * 100.0
                        ));
                    });
                }
            });
        });
    }

    /// Points with a parseable date as (days since epoch, vehicles), sorted by time.
    pub fn trend_series(points: &[TrendPoint]) -> Vec<[f64; 2]> {
        let mut series: Vec<[f64; 2]> = points
            .iter()
            .filter_map(|p| {
                let ts = p.occurred_at?.and_utc().timestamp();
                Some([ts as f64 / SECONDS_PER_DAY, p.vehicles as f64])
            })
            .collect();
        series.sort_by(|a, b| a[0].partial_cmp(&b[0]).unwrap_or(std::cmp::Ordering::Equal));
        series
    }

    pub fn format_day(days: f64) -> String {
        DateTime::from_timestamp((days * SECONDS_PER_DAY).round() as i64, 0)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// Line chart of vehicles involved over time.
    pub fn draw_trend_line(ui: &mut egui::Ui, points: &[TrendPoint]) {
        let series = Self::trend_series(points);
        let undated = points.len() - series.len();

        Plot::new("vehicle_trend")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Date")
            .y_axis_label("Vehicles Involved")
            .include_y(0.0)
            .x_axis_formatter(|mark, _range| Self::format_day(mark.value))
            .label_formatter(|_name, value| {
                format!("{}\n{:.0} vehicles", Self::format_day(value.x), value.y)
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(series.iter().copied()))
                        .color(Self::color(0))
                        .width(1.5)
                        .name("Vehicles"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(series.iter().copied()))
                        .radius(3.0)
                        .color(Self::color(0)),
                );
            });

        if undated > 0 {
            ui.label(
                RichText::new(format!("{} rows without a readable date are not plotted", undated))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }
    }
}
