//! Formatter parameters and source path hiding

use serde::{Deserialize, Serialize};
use std::path::MAIN_SEPARATOR;

/// How source file paths are shortened before they are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathHidingMethod {
    /// Paths are written as captured
    None,
    /// Strip the baseline prefix given as the hiding value
    #[default]
    FullBaseline,
    /// Keep the path from the last folder named by the hiding value onwards
    ToFolder,
    /// Keep only the file name
    FileNameOnly,
}

/// Options understood by error detail formatters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterParams {
    /// Pretty-print instead of compact output
    pub beautify: bool,
    /// Write the most recent frame first
    pub invert_callstack: bool,
    pub path_hiding_method: PathHidingMethod,
    pub path_hiding_value: String,
}

impl Default for FormatterParams {
    fn default() -> Self {
        Self {
            beautify: false,
            invert_callstack: false,
            path_hiding_method: PathHidingMethod::FullBaseline,
            path_hiding_value: default_baseline(),
        }
    }
}

impl FormatterParams {
    #[must_use]
    pub fn with_beautify(mut self, beautify: bool) -> Self {
        self.beautify = beautify;
        self
    }

    #[must_use]
    pub fn with_invert_callstack(mut self, invert: bool) -> Self {
        self.invert_callstack = invert;
        self
    }

    #[must_use]
    pub fn with_path_hiding(mut self, method: PathHidingMethod, value: impl Into<String>) -> Self {
        self.path_hiding_method = method;
        self.path_hiding_value = value.into();
        self
    }

    /// Apply the configured path hiding to `file`
    pub fn hide_path(&self, file: &str) -> String {
        hide_path(file, self.path_hiding_method, &self.path_hiding_value)
    }
}

/// This crate's own directory, with a trailing separator.
pub fn default_baseline() -> String {
    format!("{}{}", env!("CARGO_MANIFEST_DIR"), MAIN_SEPARATOR)
}

pub fn hide_path(file: &str, method: PathHidingMethod, value: &str) -> String {
    match method {
        PathHidingMethod::None => file.to_string(),
        PathHidingMethod::FullBaseline => {
            if value.is_empty() {
                return file.to_string();
            }
            file.strip_prefix(value).unwrap_or(file).to_string()
        }
        PathHidingMethod::ToFolder => {
            let parts: Vec<&str> = file.split(['/', '\\']).collect();
            let dirs = &parts[..parts.len().saturating_sub(1)];
            match dirs.iter().rposition(|part| *part == value) {
                Some(start) => parts[start..].join("/"),
                None => file.to_string(),
            }
        }
        PathHidingMethod::FileNameOnly => file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(file)
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_baseline_strips_prefix() {
        let hidden = hide_path(
            "/home/dev/app/src/main.rs",
            PathHidingMethod::FullBaseline,
            "/home/dev/app/",
        );
        assert_eq!(hidden, "src/main.rs");
    }

    #[test]
    fn test_full_baseline_leaves_other_paths() {
        let hidden = hide_path("src/main.rs", PathHidingMethod::FullBaseline, "/home/dev/app/");
        assert_eq!(hidden, "src/main.rs");
        assert_eq!(hide_path("src/main.rs", PathHidingMethod::FullBaseline, ""), "src/main.rs");
    }

    #[test]
    fn test_to_folder() {
        let file = "/home/dev/app/src/net/server.rs";
        assert_eq!(hide_path(file, PathHidingMethod::ToFolder, "src"), "src/net/server.rs");
        assert_eq!(hide_path(file, PathHidingMethod::ToFolder, "missing"), file);
    }

    #[test]
    fn test_to_folder_ignores_file_name() {
        let file = "lib/src";
        assert_eq!(hide_path(file, PathHidingMethod::ToFolder, "src"), file);
    }

    #[test]
    fn test_file_name_only() {
        assert_eq!(
            hide_path("/a/b/c.rs", PathHidingMethod::FileNameOnly, ""),
            "c.rs"
        );
        assert_eq!(hide_path("c.rs", PathHidingMethod::FileNameOnly, ""), "c.rs");
        assert_eq!(
            hide_path("C:\\work\\d.rs", PathHidingMethod::FileNameOnly, ""),
            "d.rs"
        );
    }

    #[test]
    fn test_default_params_hide_crate_dir() {
        let params = FormatterParams::default();
        let file = format!("{}src/lib.rs", params.path_hiding_value);
        assert_eq!(params.hide_path(&file), "src/lib.rs");
        assert!(!params.beautify);
        assert!(!params.invert_callstack);
    }

    #[test]
    fn test_params_deserialize_with_defaults() {
        let params: FormatterParams =
            serde_json::from_str(r#"{"path_hiding_method":"file_name_only"}"#).unwrap();
        assert_eq!(params.path_hiding_method, PathHidingMethod::FileNameOnly);
        assert!(!params.beautify);
    }
}
