//! Heat map rendering for monthly temperature variance.
//!
//! - `quantize`: derived temperatures and quantile colour buckets
//! - `scale`: band scales and axis ticks
//! - `style`: palette, layout and legend configuration
//! - `svg`: SVG document output
//! - `raster`: PNG output via resvg

pub mod quantize;
pub mod raster;
pub mod scale;
pub mod style;
pub mod svg;

pub use quantize::{quantize, AxisDomains, CellAssignment, QuantileScale, Quantization};
pub use raster::{render_png, RasterError, RasterOptions};
pub use style::{HeatmapStyle, StyleError};
pub use svg::{render_svg, ChartText};
