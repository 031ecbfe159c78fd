//! Run reporting: summary text, terminal charts and JSON export

mod export;
mod sparkline;
mod summary;

pub use export::{read_records, write_records};
pub use sparkline::{extent, sparkline, sparkline_range, SPARK_CHARS};
pub use summary::{caption, render_plots, render_summary};
