pub mod align;
pub mod dataset;
pub mod render;
pub mod theme;

pub use align::{align_rates, year_axis, year_number};
pub use dataset::{ChartData, Dataset, YAxis, SERIES_COLORS};
pub use render::{render_png, ChartError};
pub use theme::{Palette, Theme};
