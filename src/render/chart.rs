//! Stacked bar chart rendering as SVG.
//!
//! One bar per period, one colored segment per participant stacked bottom
//! to top in column order. Drawing goes through `plotters` and its SVG
//! backend; the participant legend sits in a strip right of the plot.

use std::fs;
use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::config::ChartConfig;
use crate::core::AggregationTable;
use crate::error::{ChatstatError, Result};

const FONT: &str = "sans-serif";
const LEGEND_WIDTH: i32 = 180;
const LEGEND_ROW: i32 = 22;
const X_LABEL_AREA: u32 = 110;
const Y_LABEL_AREA: u32 = 70;
/// Horizontal room one x label needs, in pixels.
const ROTATED_LABEL_SPACING: u32 = 16;
const FLAT_LABEL_SPACING: u32 = 90;

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

/// Renders `table` as a standalone SVG document.
///
/// # Errors
///
/// Returns [`ChatstatError::EmptyDataset`] if the table has no periods or no
/// participants, and [`ChatstatError::Chart`] if drawing fails.
///
/// # Example
///
/// ```rust
/// use chatstat::config::ChartConfig;
/// use chatstat::core::{Granularity, aggregate};
/// use chatstat::render::render_svg;
/// use chatstat::MessageRecord;
/// use chrono::NaiveDate;
///
/// let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let table = aggregate(&[MessageRecord::new(ts, "Alice")], Granularity::Weekly, ts)?;
///
/// let svg = render_svg(&table, &ChartConfig::new())?;
/// assert!(svg.contains("<svg"));
/// assert!(svg.contains("Message Count by Weekly"));
/// # Ok::<(), chatstat::ChatstatError>(())
/// ```
pub fn render_svg(table: &AggregationTable, config: &ChartConfig) -> Result<String> {
    if table.is_empty() || table.column_count() == 0 {
        return Err(ChatstatError::EmptyDataset);
    }

    let granularity = table.granularity().to_string();
    let title = config
        .title
        .clone()
        .unwrap_or_else(|| format!("Message Count by {granularity}"));
    let labels: Vec<String> = table.periods().iter().map(|p| p.label()).collect();
    let rows = table.row_count() as u32;
    let peak = table.max_period_total();
    let y_max = peak + peak / 10 + 1;

    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (config.width, config.height)).into_drawing_area();
        root.fill(&WHITE).map_err(ChatstatError::chart)?;

        let width = i32::try_from(config.width).unwrap_or(i32::MAX);
        let legend_width = if config.show_legend {
            LEGEND_WIDTH.min(width / 3)
        } else {
            0
        };
        let (plot_area, legend_area) = root.split_horizontally(width - legend_width);

        let spacing = if config.rotate_labels {
            ROTATED_LABEL_SPACING
        } else {
            FLAT_LABEL_SPACING
        };
        let max_labels = (plot_area.dim_in_pixel().0 / spacing).max(1) as usize;
        let mut label_style = (FONT, 12).into_font();
        if config.rotate_labels {
            label_style = label_style.transform(FontTransform::Rotate90);
        }

        let mut chart = ChartBuilder::on(&plot_area)
            .caption(&title, (FONT, 22).into_font())
            .margin(12)
            .x_label_area_size(X_LABEL_AREA)
            .y_label_area_size(Y_LABEL_AREA)
            .build_cartesian_2d((0u32..rows).into_segmented(), 0u64..y_max)
            .map_err(ChatstatError::chart)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(max_labels)
            .x_label_formatter(&|value: &SegmentValue<u32>| match value {
                SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .x_label_style(label_style)
            .x_desc(granularity.as_str())
            .y_desc("Number of Messages")
            .axis_desc_style((FONT, 14).into_font())
            .draw()
            .map_err(ChatstatError::chart)?;

        let mut bases = vec![0u64; table.row_count()];
        for series in 0..table.column_count() {
            let color = rgb(config.color(series));
            let bars: Vec<_> = table
                .rows()
                .enumerate()
                .filter_map(|(row, (_, counts))| {
                    let count = counts[series];
                    if count == 0 {
                        return None;
                    }
                    let base = bases[row];
                    bases[row] += count;
                    let x = row as u32;
                    let mut bar = Rectangle::new(
                        [
                            (SegmentValue::Exact(x), base),
                            (SegmentValue::Exact(x + 1), base + count),
                        ],
                        color.filled(),
                    );
                    bar.set_margin(0, 0, 2, 2);
                    Some(bar)
                })
                .collect();
            chart.draw_series(bars).map_err(ChatstatError::chart)?;
        }

        if config.show_legend {
            let x = 10;
            let mut y = 60;
            legend_area
                .draw(&Text::new(
                    "Participants",
                    (x, y),
                    (FONT, 15).into_font().style(FontStyle::Bold),
                ))
                .map_err(ChatstatError::chart)?;
            for (series, participant) in table.participants().iter().enumerate() {
                y += LEGEND_ROW;
                legend_area
                    .draw(&Rectangle::new(
                        [(x, y), (x + 12, y + 12)],
                        rgb(config.color(series)).filled(),
                    ))
                    .map_err(ChatstatError::chart)?;
                legend_area
                    .draw(&Text::new(
                        participant.as_str(),
                        (x + 20, y),
                        (FONT, 13).into_font(),
                    ))
                    .map_err(ChatstatError::chart)?;
            }
        }

        root.present().map_err(ChatstatError::chart)?;
    }

    Ok(svg)
}

/// Renders `table` and writes the SVG to `path`.
pub fn write_svg(table: &AggregationTable, path: &Path, config: &ChartConfig) -> Result<()> {
    let svg = render_svg(table, config)?;
    fs::write(path, svg)?;
    info!(path = %path.display(), periods = table.row_count(), "chart written");
    Ok(())
}
