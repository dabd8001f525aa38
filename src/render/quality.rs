use crate::Result;
use crate::dataset::RttRow;
use crate::model::{JitterSample, QualityReport};
use crate::render::grid;
use crate::render::style::ChartStyle;
use plotters::chart::SeriesLabelPosition;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

const RTT_LINE: RGBColor = BLUE;
const RTT_MEAN: RGBColor = RED;
const JITTER_BAR: RGBColor = RGBColor(255, 165, 0); // orange
const JITTER_MEAN: RGBColor = RGBColor(128, 0, 128); // purple

/// Render the two-panel RTT / jitter chart to `out`.
///
/// Top panel: RTT per probe with the mean as a dashed reference line.
/// Bottom panel: signed jitter bars with their own mean reference line. The
/// jitter series already excludes the first probe, so both panels take their
/// inputs as-is.
pub fn quality_chart(
    rows: &[RttRow],
    report: &QualityReport,
    out: &str,
    style: &ChartStyle,
) -> Result<()> {
    let root = BitMapBackend::new(out, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 1));

    draw_rtt_panel(&panels[0], rows, report.mean_rtt, style)?;
    draw_jitter_panel(&panels[1], &report.jitter, report.mean_jitter, style)?;

    root.present()?;
    Ok(())
}

fn draw_rtt_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    rows: &[RttRow],
    mean_rtt: f64,
    style: &ChartStyle,
) -> Result<()> {
    let x_lo = rows.first().map_or(0.0, |r| r.seq as f64) - 0.5;
    let x_hi = rows.last().map_or(0.0, |r| r.seq as f64) + 0.5;

    let rtt_lo = rows
        .iter()
        .map(|r| r.rtt)
        .fold(mean_rtt, f64::min);
    let rtt_hi = rows
        .iter()
        .map(|r| r.rtt)
        .fold(mean_rtt, f64::max);
    let pad = ((rtt_hi - rtt_lo) * 0.15).max(0.5);
    let (y_lo, y_hi) = (rtt_lo - pad, rtt_hi + pad);

    let mut chart = ChartBuilder::on(area)
        .caption("ICMP Network Quality - RTT Variation", style.caption())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_desc("Round Trip Time (ms)")
        .axis_desc_style(style.axis_desc())
        .label_style(style.tick_label())
        .draw()?;

    draw_grid(&mut chart, (x_lo, x_hi), (y_lo, y_hi), style)?;

    chart
        .draw_series(LineSeries::new(
            rows.iter().map(|r| (r.seq as f64, r.rtt)),
            RTT_LINE.stroke_width(2),
        ))?
        .label("RTT (ms)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RTT_LINE.stroke_width(2)));

    // Markers at each sample.
    chart.draw_series(
        rows.iter()
            .map(|r| Circle::new((r.seq as f64, r.rtt), 3, RTT_LINE.filled())),
    )?;

    chart
        .draw_series(DashedLineSeries::new(
            vec![(x_lo, mean_rtt), (x_hi, mean_rtt)],
            style.mean_dash.0,
            style.mean_dash.1,
            RTT_MEAN.stroke_width(2),
        ))?
        .label(format!("Avg RTT: {:.2} ms", mean_rtt))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RTT_MEAN.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .border_style(BLACK)
        .background_style(WHITE.mix(0.7))
        .label_font(style.tick_label())
        .draw()?;

    Ok(())
}

fn draw_jitter_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    samples: &[JitterSample],
    mean_jitter: f64,
    style: &ChartStyle,
) -> Result<()> {
    let x_lo = samples.first().map_or(0.0, |s| s.seq as f64) - 0.5;
    let x_hi = samples.last().map_or(0.0, |s| s.seq as f64) + 0.5;

    // Jitter is signed; keep zero in range so bars have a baseline.
    let j_lo = samples
        .iter()
        .map(|s| s.jitter)
        .fold(mean_jitter.min(0.0), f64::min);
    let j_hi = samples
        .iter()
        .map(|s| s.jitter)
        .fold(mean_jitter.max(0.0), f64::max);
    let pad = ((j_hi - j_lo) * 0.15).max(0.5);
    let (y_lo, y_hi) = (j_lo - pad, j_hi + pad);

    let mut chart = ChartBuilder::on(area)
        .caption("Jitter Variation", style.caption())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_label_formatter(&|x| format!("{:.0}", x))
        .x_desc("Packet Sequence")
        .y_desc("Jitter (ms)")
        .axis_desc_style(style.axis_desc())
        .label_style(style.tick_label())
        .draw()?;

    draw_grid(&mut chart, (x_lo, x_hi), (y_lo, y_hi), style)?;

    chart
        .draw_series(samples.iter().map(|s| {
            let x = s.seq as f64;
            Rectangle::new([(x - 0.35, 0.0), (x + 0.35, s.jitter)], JITTER_BAR.mix(0.7).filled())
        }))?
        .label("Jitter (ms)")
        .legend(|(x, y)| {
            Rectangle::new([(x, y - 5), (x + 10, y + 5)], JITTER_BAR.mix(0.7).filled())
        });

    chart
        .draw_series(DashedLineSeries::new(
            vec![(x_lo, mean_jitter), (x_hi, mean_jitter)],
            style.mean_dash.0,
            style.mean_dash.1,
            JITTER_MEAN.stroke_width(2),
        ))?
        .label(format!("Avg Jitter: {:.2} ms", mean_jitter))
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], JITTER_MEAN.stroke_width(2))
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .border_style(BLACK)
        .background_style(WHITE.mix(0.7))
        .label_font(style.tick_label())
        .draw()?;

    Ok(())
}

/// Dashed, faded gridlines in both directions (the stock mesh is solid).
fn draw_grid(
    chart: &mut ChartContext<'_, BitMapBackend<'_>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    (x_lo, x_hi): (f64, f64),
    (y_lo, y_hi): (f64, f64),
    style: &ChartStyle,
) -> Result<()> {
    let y_step = grid::nice_step(y_hi - y_lo, 8);
    for y in grid::ticks(y_lo, y_hi, y_step) {
        chart.draw_series(DashedLineSeries::new(
            vec![(x_lo, y), (x_hi, y)],
            style.grid_dash.0,
            style.grid_dash.1,
            style.grid_color.stroke_width(1),
        ))?;
    }

    let x_step = grid::nice_step(x_hi - x_lo, 12).max(1.0);
    for x in grid::ticks(x_lo, x_hi, x_step) {
        chart.draw_series(DashedLineSeries::new(
            vec![(x, y_lo), (x, y_hi)],
            style.grid_dash.0,
            style.grid_dash.1,
            style.grid_color.stroke_width(1),
        ))?;
    }

    Ok(())
}
