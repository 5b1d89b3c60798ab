//! SVG document generation for the heat map.
//!
//! Layout of the produced document:
//! - `#title` and `#description` headings in the top margin
//! - the plot group, translated by the left/top margins, holding one
//!   `rect.cell` per record plus `#x-axis` and `#y-axis`
//! - `#legend` below the plot, one swatch per palette colour
//!
//! Hover tooltips are `<title>` children of each cell, which viewers show
//! on mouse-over without any script.

use std::fmt::Write;

use heatmap_common::{HeatmapError, HeatmapResult};
use tracing::{debug, instrument};

use crate::quantize::Quantization;
use crate::scale::{decade_ticks, month_ticks, BandScale, Tick};
use crate::style::HeatmapStyle;

/// Tick mark length in pixels.
const TICK_SIZE: f64 = 6.0;

/// Gap between the x-axis labels and the legend.
const LEGEND_GAP: f64 = 50.0;

/// Text shown above the plot.
#[derive(Debug, Clone, Default)]
pub struct ChartText {
    pub title: String,
    pub description: String,
}

impl ChartText {
    /// Title from the style name and a description of the year span and
    /// baseline.
    pub fn for_quantization(style: &HeatmapStyle, quant: &Quantization) -> Self {
        let description = match (quant.domains.years.first(), quant.domains.years.last()) {
            (Some(first), Some(last)) => format!(
                "{} - {}: base temperature {}{}",
                first, last, quant.baseline, style.units
            ),
            _ => format!("No data: base temperature {}{}", quant.baseline, style.units),
        };
        Self {
            title: style.name.clone(),
            description,
        }
    }
}

/// Render the complete SVG document.
#[instrument(skip_all, fields(cells = quant.cells.len()))]
pub fn render_svg(quant: &Quantization, style: &HeatmapStyle, text: &ChartText) -> HeatmapResult<String> {
    let mut out = String::with_capacity(256 + quant.cells.len() * 200);
    write_document(&mut out, quant, style, text)
        .map_err(|e| HeatmapError::RenderError(format!("SVG formatting failed: {}", e)))?;
    debug!(bytes = out.len(), "Rendered SVG document");
    Ok(out)
}

fn write_document(
    out: &mut String,
    quant: &Quantization,
    style: &HeatmapStyle,
    text: &ChartText,
) -> std::fmt::Result {
    let layout = &style.layout;
    let plot_width = layout.plot_width();
    let plot_height = layout.plot_height();

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="10">"#,
        w = layout.width,
        h = layout.height
    )?;
    writeln!(out, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    writeln!(
        out,
        r#"<text id="title" x="{}" y="24" text-anchor="middle" font-size="20">{}</text>"#,
        layout.width / 2.0,
        escape_xml(&text.title)
    )?;
    writeln!(
        out,
        r#"<text id="description" x="{}" y="44" text-anchor="middle" font-size="13">{}</text>"#,
        layout.width / 2.0,
        escape_xml(&text.description)
    )?;

    let x_scale = BandScale::new(quant.domains.years.iter().copied(), (0.0, plot_width));
    let y_scale = BandScale::new(quant.domains.months.iter().copied(), (0.0, plot_height));

    writeln!(
        out,
        r#"<g id="plot" transform="translate({},{})">"#,
        layout.margin_left, layout.margin_top
    )?;

    write_cells(out, quant, style, &x_scale, &y_scale)?;
    write_x_axis(out, &decade_ticks(&x_scale), plot_width, plot_height)?;
    write_y_axis(out, &month_ticks(&y_scale), plot_height)?;

    writeln!(out, "</g>")?;

    write_legend(
        out,
        quant,
        style,
        layout.margin_left,
        layout.margin_top + plot_height + LEGEND_GAP,
    )?;

    writeln!(out, "</svg>")
}

fn write_cells(
    out: &mut String,
    quant: &Quantization,
    style: &HeatmapStyle,
    x_scale: &BandScale<i32>,
    y_scale: &BandScale<u32>,
) -> std::fmt::Result {
    let width = x_scale.bandwidth();
    let height = y_scale.bandwidth();

    for cell in &quant.cells {
        // Domains are built from the same records, so both lookups succeed
        let (Some(x), Some(y)) = (x_scale.position(cell.year), y_scale.position(cell.month)) else {
            continue;
        };
        writeln!(
            out,
            r#"<rect class="cell" data-year="{year}" data-month="{month0}" data-temp="{temp}" x="{x}" y="{y}" width="{width}" height="{height}" fill="{fill}"><title>{year} - {month}&#10;Temp: {temp:.2}{units}</title></rect>"#,
            year = cell.year,
            month0 = cell.month.saturating_sub(1),
            month = cell.month,
            temp = cell.temperature,
            fill = style.color_for_bucket(cell.bucket),
            units = escape_xml(&style.units),
        )?;
    }
    Ok(())
}

fn write_x_axis(out: &mut String, ticks: &[Tick], plot_width: f64, plot_height: f64) -> std::fmt::Result {
    writeln!(out, r#"<g id="x-axis" transform="translate(0,{})">"#, plot_height)?;
    writeln!(
        out,
        r#"<path class="domain" stroke="currentColor" d="M0,{t}V0H{w}V{t}"/>"#,
        t = TICK_SIZE,
        w = plot_width
    )?;
    for tick in ticks {
        writeln!(
            out,
            r#"<g class="tick" transform="translate({},0)"><line stroke="currentColor" y2="{}"/><text fill="currentColor" y="{}" dy="0.71em" text-anchor="middle">{}</text></g>"#,
            tick.offset,
            TICK_SIZE,
            TICK_SIZE + 3.0,
            escape_xml(&tick.label)
        )?;
    }
    writeln!(out, "</g>")
}

fn write_y_axis(out: &mut String, ticks: &[Tick], plot_height: f64) -> std::fmt::Result {
    writeln!(out, r#"<g id="y-axis">"#)?;
    writeln!(
        out,
        r#"<path class="domain" stroke="currentColor" d="M-{t},0H0V{h}H-{t}"/>"#,
        t = TICK_SIZE,
        h = plot_height
    )?;
    for tick in ticks {
        writeln!(
            out,
            r#"<g class="tick" transform="translate(0,{})"><line stroke="currentColor" x2="-{}"/><text fill="currentColor" x="-{}" dy="0.32em" text-anchor="end">{}</text></g>"#,
            tick.offset,
            TICK_SIZE,
            TICK_SIZE + 3.0,
            escape_xml(&tick.label)
        )?;
    }
    writeln!(out, "</g>")
}

fn write_legend(
    out: &mut String,
    quant: &Quantization,
    style: &HeatmapStyle,
    left: f64,
    top: f64,
) -> std::fmt::Result {
    let legend = &style.legend;
    let swatch = legend.width / style.palette.len().max(1) as f64;

    writeln!(out, r#"<g id="legend" transform="translate({},{})">"#, left, top)?;
    for (i, color) in style.palette.iter().enumerate() {
        let x = i as f64 * swatch;
        write!(
            out,
            r#"<rect class="swatch" x="{}" y="0" width="{}" height="{}" fill="{}""#,
            x,
            swatch,
            legend.height,
            escape_xml(color)
        )?;
        match quant.scale.bucket_range(i) {
            Some((lo, hi)) => writeln!(out, "><title>{:.1} to {:.1}</title></rect>", lo, hi)?,
            None => writeln!(out, "/>")?,
        }
    }

    if legend.show_thresholds {
        // Lower bound under each swatch, plus the upper bound of the last one
        let buckets = quant.scale.bucket_count().min(style.palette.len());
        for bucket in 0..buckets {
            let Some((lo, hi)) = quant.scale.bucket_range(bucket) else {
                break;
            };
            write_legend_label(out, bucket as f64 * swatch, legend.height, lo)?;
            if bucket + 1 == buckets {
                write_legend_label(out, (bucket + 1) as f64 * swatch, legend.height, hi)?;
            }
        }
    }
    writeln!(out, "</g>")
}

fn write_legend_label(out: &mut String, x: f64, height: f64, value: f64) -> std::fmt::Result {
    writeln!(
        out,
        r#"<text class="threshold" x="{}" y="{}" text-anchor="middle">{:.1}</text>"#,
        x,
        height + 12.0,
        value
    )
}

/// Escape text for use in XML content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_xml(r#""q""#), "&quot;q&quot;");
        assert_eq!(escape_xml("°C"), "°C");
    }
}
