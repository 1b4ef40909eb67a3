use crate::analysis::EquityExtrema;
use crate::config::FigureSpec;
use crate::data::{format_timestamp, EquitySample};
use chrono::DateTime;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

//axis label pattern for the shared time axes
const AXIS_TIME_FORMAT: &str = "%m.%d-%H:%M";

//renders the composite three-panel figure to a png file
//
//left quarter holds the extrema bar panel; the right column stacks the
//equity-vs-balance series over the drawdown series on an identical x-range
//so the two time axes stay visually aligned
pub fn render_combined(
    samples: &[EquitySample],
    extrema: &EquityExtrema,
    figure: &FigureSpec,
    output_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(output_path, (figure.width, figure.height)).into_drawing_area();
    root.fill(&WHITE)?;

    //left quarter for the bar panel, right three quarters for the series
    let (left, right) = root.split_horizontally((figure.width / 4) as i32);
    let rows = right.split_evenly((2, 1));

    //shared x-range across both series panels
    let (start_ts, end_ts) = timestamp_range(samples);

    draw_extrema_panel(&left, extrema)?;
    draw_equity_balance_panel(&rows[0], samples, start_ts, end_ts)?;
    draw_drawdown_panel(&rows[1], samples, start_ts, end_ts)?;

    root.present()?;
    Ok(())
}

fn draw_extrema_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    extrema: &EquityExtrema,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    //pad below for the timestamp labels and above for the value labels,
    //matching the original figure's -15%/+10% headroom
    let span = pad_span(extrema.max_equity);
    let y_lower = extrema.min_equity - span * 0.15;
    let y_upper = extrema.max_equity + span * 0.10;

    let mut chart = ChartBuilder::on(area)
        .caption("Equity Extremes", ("sans-serif", 18).into_font())
        .margin(10)
        .x_label_area_size(10)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0f64..2.0f64, y_lower..y_upper)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_x_axis()
        .y_desc("Equity Value ($)")
        .y_labels(8)
        .draw()?;

    //lowest equity in red, highest in green
    let bar_base = y_lower + span * 0.05;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(0.2, bar_base), (0.8, extrema.min_equity)],
        RED.mix(0.7).filled(),
    )))?;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(1.2, bar_base), (1.8, extrema.max_equity)],
        GREEN.mix(0.7).filled(),
    )))?;

    let value_style = TextStyle::from(("sans-serif", 14).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    let label_style = TextStyle::from(("sans-serif", 12).into_font())
        .pos(Pos::new(HPos::Center, VPos::Top));

    //value above each bar, category and timestamp beneath
    chart.draw_series(std::iter::once(Text::new(
        format!("${:.2}", extrema.min_equity),
        (0.5, extrema.min_equity + span * 0.01),
        value_style.clone(),
    )))?;
    chart.draw_series(std::iter::once(Text::new(
        format!("${:.2}", extrema.max_equity),
        (1.5, extrema.max_equity + span * 0.01),
        value_style,
    )))?;

    chart.draw_series(std::iter::once(Text::new(
        "Lowest".to_string(),
        (0.5, bar_base - span * 0.005),
        label_style.clone(),
    )))?;
    chart.draw_series(std::iter::once(Text::new(
        format_timestamp(extrema.min_equity_time),
        (0.5, bar_base - span * 0.03),
        label_style.clone(),
    )))?;
    chart.draw_series(std::iter::once(Text::new(
        "Highest".to_string(),
        (1.5, bar_base - span * 0.005),
        label_style.clone(),
    )))?;
    chart.draw_series(std::iter::once(Text::new(
        format_timestamp(extrema.max_equity_time),
        (1.5, bar_base - span * 0.03),
        label_style,
    )))?;

    Ok(())
}

fn draw_equity_balance_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    samples: &[EquitySample],
    start_ts: i64,
    end_ts: i64,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    //y-range covers the union of equity and balance
    let min_value = samples
        .iter()
        .flat_map(|s| [s.equity, s.balance])
        .fold(f64::INFINITY, f64::min);
    let max_value = samples
        .iter()
        .flat_map(|s| [s.equity, s.balance])
        .fold(f64::NEG_INFINITY, f64::max);
    let (y_lower, y_upper) = padded_value_range(min_value, max_value);

    let mut chart = ChartBuilder::on(area)
        .caption("Equity vs Balance Over Time", ("sans-serif", 18).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(start_ts..end_ts, y_lower..y_upper)?;

    chart
        .configure_mesh()
        .x_label_formatter(&format_axis_timestamp)
        .x_labels(8)
        .y_labels(5)
        .y_desc("Value ($)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            samples
                .iter()
                .map(|s| (s.timestamp.and_utc().timestamp(), s.equity)),
            &BLUE,
        ))?
        .label("Equity")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart
        .draw_series(LineSeries::new(
            samples
                .iter()
                .map(|s| (s.timestamp.and_utc().timestamp(), s.balance)),
            &GREEN,
        ))?
        .label("Balance")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &GREEN));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    Ok(())
}

fn draw_drawdown_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    samples: &[EquitySample],
    start_ts: i64,
    end_ts: i64,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    let peak = samples.iter().map(|s| s.drawdown).fold(0.0f64, f64::max);
    //flat zero drawdown still needs a visible axis
    let y_upper = if peak > 0.0 { peak * 1.1 } else { 0.01 };

    let mut chart = ChartBuilder::on(area)
        .caption("Drawdown Over Time", ("sans-serif", 18).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(start_ts..end_ts, 0.0f64..y_upper)?;

    chart
        .configure_mesh()
        .x_label_formatter(&format_axis_timestamp)
        .x_labels(8)
        .y_labels(5)
        .x_desc("Date and Time")
        .y_desc("Drawdown")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            samples
                .iter()
                .map(|s| (s.timestamp.and_utc().timestamp(), s.drawdown)),
            &RED,
        ))?
        .label("Drawdown")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    Ok(())
}

fn format_axis_timestamp(ts: &i64) -> String {
    DateTime::from_timestamp(*ts, 0)
        .map(|dt| dt.naive_utc().format(AXIS_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

//unix-timestamp x-range of the series, widened when it would collapse
fn timestamp_range(samples: &[EquitySample]) -> (i64, i64) {
    let start = samples
        .first()
        .map(|s| s.timestamp.and_utc().timestamp())
        .unwrap_or(0);
    let end = samples
        .last()
        .map(|s| s.timestamp.and_utc().timestamp())
        .unwrap_or(0);

    if start == end {
        (start - 1, end + 1)
    } else {
        (start, end)
    }
}

//widens a value range so a flat series never yields a zero-height axis
fn padded_value_range(min_value: f64, max_value: f64) -> (f64, f64) {
    if (max_value - min_value).abs() < f64::EPSILON {
        (min_value - 1.0, max_value + 1.0)
    } else {
        let pad = (max_value - min_value) * 0.05;
        (min_value - pad, max_value + pad)
    }
}

fn pad_span(max_equity: f64) -> f64 {
    let span = max_equity.abs();
    if span < f64::EPSILON {
        1.0
    } else {
        span
    }
}
