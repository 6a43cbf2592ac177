/*!
# dnaseg Chart Rendering

Turns the derived series from `dnaseg-core` into charts and writes them as
SVG or PNG.

- [`chart`]: backend-neutral chart model (marks in world coordinates)
- [`charts`]: one builder per plot (word frequency, GC skew, the four
  isochore views, scatter)
- [`vector_export`]: SVG and PNG exporters
*/

pub mod chart;
pub mod charts;
pub mod vector_export;

pub use chart::{Bar, Bounds, Chart, Mark, Point, Shape, XAxis};
pub use charts::ChartColors;
pub use vector_export::{ChartExporter, ExportConfig, ImageFormat};

/// Version stamped into SVG footers
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
