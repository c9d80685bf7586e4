use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::status::{FormatOptions, IndicatorOptions, RangeCountPolicy};

const APP_DIR: &str = "caret-status";
const LOCAL_FILE: &str = ".caretstatusrc";

/// Options that can come from the command line or a flag file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub delay_ms: Option<u64>,
    pub separator: Option<String>,
    pub range_count: Option<RangeCountPolicy>,
    pub rec_label: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; values in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            delay_ms: other.delay_ms.or(self.delay_ms),
            separator: other.separator.clone().or_else(|| self.separator.clone()),
            range_count: other.range_count.or(self.range_count),
            rec_label: other.rec_label.clone().or_else(|| self.rec_label.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    /// Indicator options with unset flags left at their defaults.
    pub fn to_indicator_options(&self) -> IndicatorOptions {
        let defaults = IndicatorOptions::default();
        let format = FormatOptions {
            separator: self
                .separator
                .clone()
                .unwrap_or(defaults.format.separator),
            recording_label: self
                .rec_label
                .clone()
                .unwrap_or(defaults.format.recording_label),
            range_count: self.range_count.unwrap_or(defaults.format.range_count),
        };
        IndicatorOptions {
            delay: self.delay_ms.map_or(defaults.delay, Duration::from_millis),
            format,
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR).join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR)
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR).join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join(APP_DIR).join("config");
        }
    }

    PathBuf::from(LOCAL_FILE)
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_FILE)
}

/// Read a flag file. A missing file yields empty flags.
///
/// # Errors
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    Ok(parse_flag_tokens(&file_tokens(&content)))
}

/// Split a flag file into tokens. A `--flag=value` line is kept whole so
/// quoted values may contain spaces.
fn file_tokens(content: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with("--") && line.contains('=') {
            tokens.push(line.to_string());
        } else {
            tokens.extend(line.split_whitespace().map(ToOwned::to_owned));
        }
    }
    tokens
}

/// Write `flags` as a flag file, creating parent directories.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# caret-status defaults (saved with --save)".to_string());
    if let Some(delay) = flags.delay_ms {
        lines.push(format!("--delay-ms {delay}"));
    }
    if let Some(separator) = &flags.separator {
        lines.push(format!("--separator=\"{separator}\""));
    }
    if let Some(policy) = flags.range_count {
        lines.push(format!("--range-count {}", policy.as_str()));
    }
    if let Some(label) = &flags.rec_label {
        lines.push(format!("--rec-label=\"{label}\""));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a flag file if present.
///
/// # Errors
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list. Unknown tokens and invalid values
/// are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(unquote(value))),
            _ => (token, None),
        };
        let takes_value = matches!(
            name,
            "--delay-ms" | "--separator" | "--range-count" | "--rec-label" | "--log-file"
        );
        if !takes_value {
            i += 1;
            continue;
        }
        let value = match inline {
            Some(value) => Some(value.to_string()),
            None => {
                let next = tokens.get(i + 1).cloned();
                if next.is_some() {
                    i += 1;
                }
                next
            }
        };
        if let Some(value) = value {
            apply_flag(&mut flags, name, value);
        }
        i += 1;
    }
    flags
}

fn apply_flag(flags: &mut ConfigFlags, name: &str, value: String) {
    match name {
        "--delay-ms" => {
            if let Ok(ms) = value.parse() {
                flags.delay_ms = Some(ms);
            }
        }
        "--separator" => flags.separator = Some(value),
        "--range-count" => {
            if let Some(policy) = RangeCountPolicy::parse(&value) {
                flags.range_count = Some(policy);
            }
        }
        "--rec-label" => flags.rec_label = Some(value),
        "--log-file" => flags.log_file = Some(PathBuf::from(value)),
        _ => {}
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
