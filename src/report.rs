// src/report.rs
use crate::checker::{CheckResult, FailureKind};
use crate::config::KEY_VAR;
use std::fmt::Write as _;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One line per stage the probe reached.
pub fn render_text(result: &CheckResult) -> String {
    let mut out = String::new();
    let key_present = !result.missing.iter().any(|name| name == KEY_VAR);

    let _ = writeln!(out, "Testing Supabase connection...");
    let _ = writeln!(
        out,
        "URL: {}",
        result.endpoint_url.as_deref().filter(|u| !u.trim().is_empty()).unwrap_or("(not set)")
    );
    let _ = writeln!(out, "Key: {}", if key_present { "Present" } else { "Missing" });

    let detail = result.error_detail.as_deref().unwrap_or("unknown error");

    if !result.config_present {
        let _ = writeln!(out, "❌ {}", detail);
        return out;
    }

    if !result.client_created() {
        let _ = writeln!(out, "❌ Supabase client error: {}", detail);
        return out;
    }
    let _ = writeln!(out, "✅ Supabase client created successfully");

    match (result.connection_ok, result.failure) {
        (Some(true), _) => {
            let _ = writeln!(out, "✅ Supabase connection successful!");
            if let Some(data) = &result.data {
                let _ = writeln!(out, "📊 {} count: {}", result.resource, data);
            }
        }
        (_, Some(FailureKind::Transport)) => {
            let _ = writeln!(out, "❌ Supabase unreachable: {}", detail);
        }
        _ => {
            let _ = writeln!(out, "❌ Supabase connection failed: {}", detail);
        }
    }

    if let Some(ms) = result.elapsed_ms {
        let _ = writeln!(out, "Round trip: {} ms", ms);
    }
    out
}

pub fn render_json(result: &CheckResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

pub fn write_report<W: io::Write>(
    writer: &mut W,
    result: &CheckResult,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => writer.write_all(render_text(result).as_bytes()),
        OutputFormat::Json => {
            let json = render_json(result).map_err(io::Error::other)?;
            writeln!(writer, "{}", json)
        }
    }
}
