//! Call-site capture for the `where` field

use crate::error_detail::FormatterParams;
use std::fmt;
use std::panic::Location;

/// Source position of a leveled call
///
/// Captured with `#[track_caller]` at the logger's public entry points and
/// passed down explicitly, so internal helpers never shift the reported frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    /// The location of whoever called the current `#[track_caller]` function
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    /// `<hidden path>:<line>`
    pub fn render(&self, params: &FormatterParams) -> String {
        format!("{}:{}", params.hide_path(self.file), self.line)
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
