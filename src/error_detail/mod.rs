//! Structured error detail: traced errors and the formatters that render them

pub mod formatter;
pub mod params;
pub mod traced;

pub use formatter::{new_formatter, ErrorFormat, ErrorFormatter, JsonErrorFormatter, RawErrorFormatter};
pub use params::{default_baseline, hide_path, FormatterParams, PathHidingMethod};
pub use traced::{find_traced, StackFrame, TracedError};
