//! Monthly global temperature heat map renderer.
//!
//! Fetches the temperature variance dataset once, assigns every month to a
//! quantile colour bucket and writes the chart as SVG (and optionally PNG).

mod config;
mod fetch;
mod render;

use anyhow::Result;
use clap::Parser;
use heatmap_common::HeatmapError;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use config::Args;
use fetch::DatasetFetcher;
use render::{render_chart, write_outputs, OutputPaths};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_tracing(&args)?;

    if let Err(e) = run(args).await {
        error!(
            error = %format!("{:#}", e),
            kind = failure_kind(&e),
            "Heat map rendering failed"
        );
        return Err(e);
    }

    Ok(())
}

/// Coarse failure category logged alongside the error chain.
fn failure_kind(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<HeatmapError>() {
        Some(e) if e.is_input_error() => "dataset",
        Some(HeatmapError::FetchError { .. }) => "fetch",
        Some(HeatmapError::RenderError(_)) => "render",
        _ => "other",
    }
}

fn init_tracing(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let source = args.source();
    let style = args.load_style()?;
    let raster = args.raster_options()?;

    info!(source = %source, "Starting heat map render");

    let fetcher = DatasetFetcher::new(&args.fetch_config())?;
    let dataset = fetcher.fetch(&source).await?;

    let chart = render_chart(&dataset, &style, raster.as_ref())?;

    let paths = OutputPaths {
        svg: args.output.clone(),
        png: args.png.clone(),
    };
    write_outputs(&chart, &paths).await?;

    info!(cells = chart.cells, "Heat map complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind() {
        let invalid = anyhow::Error::new(HeatmapError::InvalidMonth {
            index: 0,
            year: 1900,
            month: 13,
        });
        assert_eq!(failure_kind(&invalid), "dataset");

        let fetch = anyhow::Error::new(HeatmapError::FetchError {
            url: "http://localhost".into(),
            message: "refused".into(),
        });
        assert_eq!(failure_kind(&fetch), "fetch");

        let other = anyhow::anyhow!("Failed to write out.svg");
        assert_eq!(failure_kind(&other), "other");
    }
}
