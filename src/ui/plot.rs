use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, VLine};

use crate::chart::{ChartDescription, HoverMode};
use crate::color::band_fill;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Tumour volume chart (central panel)
// ---------------------------------------------------------------------------

/// Render the current chart description.
pub fn tumour_plot(ui: &mut Ui, state: &AppState) {
    let chart = &state.chart;
    let layout = &chart.layout;
    let margin = layout.margin;

    ui.add_space(margin.top);

    let width = (ui.available_width() - margin.left - margin.right).max(100.0);
    let height = layout
        .height
        .min(ui.available_height() - margin.bottom)
        .max(100.0);
    let hover = layout.hover;

    ui.horizontal(|ui: &mut Ui| {
        ui.add_space(margin.left);

        let plot = Plot::new("tumour_plot")
            .legend(Legend::default())
            .x_axis_label(layout.x_title.as_str())
            .y_axis_label(layout.y_title.as_str())
            .width(width)
            .height(height)
            .allow_boxed_zoom(true)
            .allow_drag(true)
            .allow_scroll(true)
            .allow_zoom(true);

        // Unified hover replaces the per-point label with one tooltip.
        let plot = match hover {
            HoverMode::XUnified => plot.show_x(false).show_y(false),
            HoverMode::Closest => plot.label_formatter(closest_label),
        };

        let response = plot.show(ui, |plot_ui| {
            if chart.is_empty() {
                return None;
            }

            if let Some((y_lo, y_hi)) = y_extent(chart) {
                let fill = band_fill(&layout.band_style);
                let stroke = Stroke::new(layout.band_style.line_width, fill);
                for band in &chart.bands {
                    let corners = vec![
                        [band.start, y_lo],
                        [band.end, y_lo],
                        [band.end, y_hi],
                        [band.start, y_hi],
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(corners))
                            .fill_color(fill)
                            .stroke(stroke),
                    );
                }
            }

            for series in &chart.series {
                let color = state.colors.color_for(&series.subject);
                let xy: Vec<[f64; 2]> = series.points.iter().map(|&(x, y)| [x, y]).collect();

                let mut line = Line::new(PlotPoints::from(xy.clone()))
                    .name(&series.label)
                    .color(color)
                    .width(2.0);
                if series.dashed {
                    line = line.style(egui_plot::LineStyle::dashed_loose());
                }
                plot_ui.line(line);

                if series.markers {
                    plot_ui.points(
                        Points::new(PlotPoints::from(xy))
                            .name(&series.label)
                            .color(color)
                            .radius(3.0),
                    );
                }
            }

            if hover != HoverMode::XUnified {
                return None;
            }
            let x = plot_ui.pointer_coordinate()?.x;
            let (lo, hi) = chart.x_range()?;
            if !(lo..=hi).contains(&x) {
                return None;
            }
            plot_ui.vline(VLine::new(x).color(Color32::GRAY).width(1.0));
            Some(x)
        });

        if let Some(x) = response.inner {
            if response.response.hovered() {
                let rows = unified_rows(chart, state, x);
                response.response.on_hover_ui_at_pointer(|ui: &mut Ui| {
                    ui.strong(format!("Day {x:.1}"));
                    for (label, color, (px, py)) in rows {
                        ui.label(
                            RichText::new(format!("{label}: {py:.1} (day {px:.1})")).color(color),
                        );
                    }
                });
            }
        }
    });

    ui.add_space(margin.bottom);
}

/// Vertical extent of all series with 5 % padding, used to size the bands.
fn y_extent(chart: &ChartDescription) -> Option<(f64, f64)> {
    let (lo, hi) = chart
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.1))
        .fold(None, |acc: Option<(f64, f64)>, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })?;
    let pad = ((hi - lo) * 0.05).max(1.0);
    Some((lo.min(0.0) - pad, hi + pad))
}

/// One row per series with a point near `x`: label, colour and point.
fn unified_rows(
    chart: &ChartDescription,
    state: &AppState,
    x: f64,
) -> Vec<(String, Color32, (f64, f64))> {
    chart
        .points_near(x)
        .into_iter()
        .map(|(series, point)| {
            (
                series.label.clone(),
                state.colors.color_for(&series.subject),
                point,
            )
        })
        .collect()
}

fn closest_label(name: &str, value: &PlotPoint) -> String {
    if name.is_empty() {
        format!("Day {:.1}\n{:.1}", value.x, value.y)
    } else {
        format!("{name}\nDay {:.1}: {:.1}", value.x, value.y)
    }
}
