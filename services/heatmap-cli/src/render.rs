//! Runs the rendering pipeline and writes the outputs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use heatmap_common::TemperatureDataset;
use renderer::{quantize, render_png, render_svg, ChartText, HeatmapStyle, RasterOptions};
use tracing::{info, instrument};

/// A rendered heat map held in memory.
#[derive(Debug)]
pub struct RenderedChart {
    pub svg: String,
    pub png: Option<Vec<u8>>,
    pub cells: usize,
    pub bucket_sizes: Vec<usize>,
}

/// Quantize the dataset and build the SVG, plus a PNG if raster options
/// are given.
#[instrument(skip_all, fields(records = dataset.len()))]
pub fn render_chart(
    dataset: &TemperatureDataset,
    style: &HeatmapStyle,
    raster: Option<&RasterOptions>,
) -> Result<RenderedChart> {
    let quant = quantize(
        dataset.base_temperature,
        &dataset.monthly_variance,
        style.bucket_count(),
    );
    let text = ChartText::for_quantization(style, &quant);
    let svg = render_svg(&quant, style, &text)?;

    let png = match raster {
        Some(options) => Some(render_png(&svg, options).context("Failed to rasterize heat map")?),
        None => None,
    };

    let bucket_sizes = quant.bucket_sizes();
    info!(
        cells = quant.cells.len(),
        buckets = ?bucket_sizes,
        extent = ?quant.scale.extent(),
        "Rendered heat map"
    );

    Ok(RenderedChart {
        svg,
        png,
        cells: quant.cells.len(),
        bucket_sizes,
    })
}

/// Output destinations.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub svg: PathBuf,
    pub png: Option<PathBuf>,
}

/// Write the chart, creating parent directories as needed.
pub async fn write_outputs(chart: &RenderedChart, paths: &OutputPaths) -> Result<()> {
    write_file(&paths.svg, chart.svg.as_bytes()).await?;
    info!(path = %paths.svg.display(), bytes = chart.svg.len(), "Wrote SVG");

    if let (Some(path), Some(png)) = (&paths.png, &chart.png) {
        write_file(path, png).await?;
        info!(path = %path.display(), bytes = png.len(), "Wrote PNG");
    }

    Ok(())
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
