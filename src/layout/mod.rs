//! Classification and pagination of body text.
//!
//! [`classify`](crate::layout::classify()) turns a raw body string into
//! typed lines, and [`flow_lines`](crate::layout::flow_lines) walks those
//! lines with a vertical cursor, measuring each block through the injected
//! [`FontMetrics`](crate::FontMetrics) capability and opening a new page
//! whenever a block would cross the page floor. Both are pure over their
//! inputs; neither touches the output format.

mod classify;
mod flow;
mod margins;

pub use classify::*;
pub use flow::*;
pub use margins::*;
