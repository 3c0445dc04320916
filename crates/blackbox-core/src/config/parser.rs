//! TOML parser with helpful error messages

use super::schema::BlackboxConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse blackbox.toml with detailed error messages
pub fn parse_blackbox_toml(path: &Path) -> Result<BlackboxConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_blackbox_toml_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse blackbox.toml content from string
pub fn parse_blackbox_toml_str(content: &str) -> Result<BlackboxConfig> {
    let config = parse_layer_str(content)?;

    config.validate()?;

    Ok(config)
}

/// Parse one config layer without validating it.
///
/// A layer may rely on values from another scope, so validation runs on the
/// merged result instead.
pub fn parse_blackbox_toml_layer(path: &Path) -> Result<BlackboxConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_layer_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn parse_layer_str(content: &str) -> Result<BlackboxConfig> {
    toml::from_str(content).map_err(|e| enhance_toml_error(e, content))
}

/// Enhance TOML parsing errors with the offending lines
fn enhance_toml_error(error: toml::de::Error, content: &str) -> anyhow::Error {
    let error_msg = error.message().to_string();

    let last_line = content.lines().count().max(1);
    let line_hint = error.span().map(|span| {
        let offset = span.start.min(content.len());
        (content[..offset].matches('\n').count() + 1).min(last_line)
    });

    match line_hint {
        Some(line_num) => {
            let context = get_line_context(content, line_num);
            anyhow::anyhow!(
                "TOML parsing error at line {}:\n{}\n\nError: {}",
                line_num,
                context,
                error_msg
            )
        }
        None => anyhow::anyhow!("TOML parsing error: {}", error_msg),
    }
}

/// Get context lines around an error
fn get_line_context(content: &str, line_num: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = line_num.saturating_sub(2).min(lines.len());
    let end = (line_num + 1).min(lines.len());

    lines[start..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            let marker = if num == line_num { ">>>" } else { "   " };
            format!("{} {:4} | {}", marker, num, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize a configuration to TOML string
pub fn to_toml(config: &BlackboxConfig) -> Result<String> {
    toml::to_string_pretty(config).with_context(|| "Failed to serialize configuration to TOML")
}
