use crate::Result;
use crate::model::BandwidthBar;
use crate::render::grid;
use crate::render::style::ChartStyle;
use plotters::prelude::*;

const BAR_FILL: RGBColor = RGBColor(135, 206, 235); // sky blue

/// Render the estimated-bandwidth bar chart to `out`.
///
/// Payload sizes land on a categorical axis (one segment per input row, in
/// input order), so bars stay evenly spaced and duplicates stay visible.
pub fn bandwidth_chart(bars: &[BandwidthBar], out: &str, style: &ChartStyle) -> Result<()> {
    let root = BitMapBackend::new(out, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let top = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    let step = grid::nice_step(top, 8);
    // Headroom above the tallest bar so its value label fits.
    let y_max = grid::round_up(top * 1.15, step).max(step);

    let mut chart = ChartBuilder::on(&root)
        .caption("ICMP Bandwidth Estimation", style.caption())
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d((0..bars.len()).into_segmented(), 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(bars.len() + 1)
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                bars.get(*i).map(|b| b.label.clone()).unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .x_desc("Packet Size (bytes)")
        .y_desc("Bandwidth (kbps)")
        .axis_desc_style(style.axis_desc())
        .label_style(style.tick_label())
        .draw()?;

    // Horizontal reference lines only; the stock mesh is disabled above.
    for y in grid::ticks(step, y_max, step) {
        chart.draw_series(DashedLineSeries::new(
            vec![
                (SegmentValue::Exact(0), y),
                (SegmentValue::Exact(bars.len()), y),
            ],
            style.grid_dash.0,
            style.grid_dash.1,
            style.grid_color.stroke_width(1),
        ))?;
    }

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BAR_FILL.filled())
            .margin(8)
            .data(bars.iter().enumerate().map(|(i, bar)| (i, bar.value))),
    )?;
    // Black bar edges over the fill.
    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLACK.stroke_width(1))
            .margin(8)
            .data(bars.iter().enumerate().map(|(i, bar)| (i, bar.value))),
    )?;

    let annotation = style.annotation();
    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        Text::new(
            format!("{:.2} kbps", bar.value),
            (SegmentValue::CenterOf(i), bar.value + y_max * 0.01),
            annotation.clone(),
        )
    }))?;

    root.present()?;
    Ok(())
}
