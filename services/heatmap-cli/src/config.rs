//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use heatmap_common::DEFAULT_DATASET_URL;
use renderer::{HeatmapStyle, RasterOptions};
use tracing::{debug, info};

use crate::fetch::{DatasetSource, FetchConfig};

#[derive(Parser, Debug, Clone)]
#[command(name = "heatmap")]
#[command(about = "Render the monthly global land-surface temperature heat map")]
pub struct Args {
    /// URL of the temperature dataset
    #[arg(long, env = "HEATMAP_URL", default_value = DEFAULT_DATASET_URL)]
    pub url: String,

    /// Read the dataset from a local file instead of fetching it
    #[arg(short, long, env = "HEATMAP_INPUT")]
    pub input: Option<PathBuf>,

    /// SVG output path
    #[arg(short, long, env = "HEATMAP_OUTPUT", default_value = "heatmap.svg")]
    pub output: PathBuf,

    /// Also rasterize to this PNG path
    #[arg(long, env = "HEATMAP_PNG")]
    pub png: Option<PathBuf>,

    /// PNG pixels per SVG unit
    #[arg(long, default_value = "1.0")]
    pub png_scale: f32,

    /// Skip loading system fonts when rasterizing (text is not drawn)
    #[arg(long)]
    pub no_system_fonts: bool,

    /// Style file (JSON) with palette, layout and legend settings
    #[arg(long, env = "HEATMAP_STYLE")]
    pub style: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "HEATMAP_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Args {
    /// Local file wins over the URL when both are given.
    pub fn source(&self) -> DatasetSource {
        match &self.input {
            Some(path) => DatasetSource::File(path.clone()),
            None => DatasetSource::Url(self.url.clone()),
        }
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..FetchConfig::default()
        }
    }

    /// Raster options, or `None` when no PNG was requested.
    pub fn raster_options(&self) -> Result<Option<RasterOptions>> {
        if self.png.is_none() {
            return Ok(None);
        }
        if !(self.png_scale.is_finite() && self.png_scale > 0.0) {
            bail!("--png-scale must be positive, got {}", self.png_scale);
        }
        Ok(Some(RasterOptions {
            scale: self.png_scale,
            load_system_fonts: !self.no_system_fonts,
        }))
    }

    /// Load and validate the style, falling back to the built-in default.
    pub fn load_style(&self) -> Result<HeatmapStyle> {
        let style = match &self.style {
            Some(path) => {
                info!(path = %path.display(), "Loading style");
                HeatmapStyle::from_file(path)
                    .with_context(|| format!("Failed to load style from {}", path.display()))?
            }
            None => HeatmapStyle::default(),
        };
        style.validate().context("Invalid style")?;
        debug!(name = %style.name, colours = style.palette.len(), "Style ready");
        Ok(style)
    }
}
