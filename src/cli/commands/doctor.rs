//! Doctor command - verify API keys and configuration.

use crate::cli::Output;
use crate::config::{Settings, YOUTUBE_API_KEY_ENV};
use crate::video_store::VideoStore;
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("Kalima Doctor");
    println!();
    println!("Checking API keys and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("API Configuration").bold());
    let api_checks = vec![
        check_openai_api_key(std::env::var("OPENAI_API_KEY").ok()),
        check_youtube_api_key(settings),
    ];
    for check in &api_checks {
        check.print();
    }
    checks.extend(api_checks);

    println!();

    println!("{}", style("Output").bold());
    let output_checks = check_output(settings);
    for check in &output_checks {
        check.print();
    }
    checks.extend(output_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(config_path);
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Kalima.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Kalima is ready to use.");
    }

    Ok(())
}

/// Check the OpenAI key used for speech synthesis.
///
/// Missing is a warning, since `--text-only` runs work without it.
fn check_openai_api_key(key: Option<String>) -> CheckResult {
    match key {
        Some(key) if key.starts_with("sk-") && key.len() > 20 => {
            CheckResult::ok("OPENAI_API_KEY", &format!("configured ({})", mask(&key)))
        }
        Some(key) if key.is_empty() => CheckResult::error(
            "OPENAI_API_KEY",
            "empty",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
        Some(_) => CheckResult::warning(
            "OPENAI_API_KEY",
            "set but format looks unusual",
            "Expected format: sk-... (OpenAI API key)",
        ),
        None => CheckResult::warning(
            "OPENAI_API_KEY",
            "not set (audio disabled)",
            "Set with: export OPENAI_API_KEY='sk-...' or generate with --text-only",
        ),
    }
}

/// Check the YouTube key used for video resolution.
fn check_youtube_api_key(settings: &Settings) -> CheckResult {
    match settings.youtube_api_key() {
        Some(key) => CheckResult::ok(YOUTUBE_API_KEY_ENV, &format!("configured ({})", mask(&key))),
        None => CheckResult::warning(
            YOUTUBE_API_KEY_ENV,
            "not set (video resolution disabled)",
            &format!(
                "Set with: export {}='...' or api_key under [youtube]",
                YOUTUBE_API_KEY_ENV
            ),
        ),
    }
}

/// Check the output directory and the two video maps.
fn check_output(settings: &Settings) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let output_dir = settings.output_dir();
    if output_dir.is_dir() {
        results.push(CheckResult::ok(
            "Output directory",
            &format!("{}", output_dir.display()),
        ));
    } else if output_dir.exists() {
        results.push(CheckResult::error(
            "Output directory",
            &format!("{} is not a directory", output_dir.display()),
            "Change general.output_dir in the config",
        ));
    } else {
        results.push(CheckResult::warning(
            "Output directory",
            &format!("{} (will be created)", output_dir.display()),
            "Directory will be created on first use",
        ));
    }

    for (name, path) in [
        ("Day videos", settings.days_video_path()),
        ("Supplementary videos", settings.supplementary_video_path()),
    ] {
        let store = VideoStore::new(path);
        if !store.path().exists() {
            results.push(CheckResult::warning(
                name,
                &format!("{} (not created yet)", store.path().display()),
                "Created by: kalima videos resolve",
            ));
            continue;
        }

        match store.load() {
            Ok(map) => results.push(CheckResult::ok(
                name,
                &format!(
                    "{} ({} of {} resolved)",
                    store.path().display(),
                    map.resolved_count(),
                    map.len()
                ),
            )),
            Err(e) => results.push(CheckResult::error(
                name,
                &e.to_string(),
                "Fix or remove the file, then run: kalima videos resolve",
            )),
        }
    }

    results
}

/// Check if config file exists.
fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        match Settings::load_from(Some(&config_path.to_path_buf())) {
            Ok(_) => CheckResult::ok("Config file", &format!("{}", config_path.display())),
            Err(e) => CheckResult::error("Config file", &e.to_string(), "Fix with: kalima config edit"),
        }
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: kalima config edit",
        )
    }
}

/// Show only the ends of a secret.
fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_openai_key_states() {
        assert_eq!(check_openai_api_key(None).status, CheckStatus::Warning);
        assert_eq!(check_openai_api_key(Some(String::new())).status, CheckStatus::Error);
        assert_eq!(
            check_openai_api_key(Some("sk-abcdefghijklmnopqrstuvwxyz".to_string())).status,
            CheckStatus::Ok
        );
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("short"), "***");
        assert_eq!(mask("sk-abcdefghijklmnop"), "sk-abcd...mnop");
    }

    #[test]
    fn test_malformed_video_map_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.general.output_dir = dir.path().to_string_lossy().to_string();
        std::fs::write(settings.days_video_path(), "{").unwrap();

        let results = check_output(&settings);
        assert_eq!(results[0].status, CheckStatus::Ok);
        assert_eq!(results[1].status, CheckStatus::Error);
        assert_eq!(results[2].status, CheckStatus::Warning);
    }
}
