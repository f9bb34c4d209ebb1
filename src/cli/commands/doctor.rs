//! Doctor command - verify keys, credentials, and configuration.

use crate::cli::Output;
use crate::config::Settings;
use crate::speech::ServiceAccountKey;
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
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("tubestudy doctor");
    println!();

    let mut checks = Vec::new();

    println!("{}", style("Language Model").bold());
    let key_env = &settings.llm.api_key_env;
    let section = vec![
        check_api_key(key_env, std::env::var(key_env).ok().as_deref()),
        CheckResult::ok("Endpoint", &settings.llm.api_base),
    ];
    print_section(section, &mut checks);

    println!("{}", style("Text-to-Speech").bold());
    let tts_path = std::env::var(&settings.tts.credentials_env)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| settings.tts.default_credentials_path.clone());
    let section = vec![check_tts_credentials(
        &Settings::expand_path(&tts_path),
        &settings.tts.credentials_env,
    )];
    print_section(section, &mut checks);

    println!("{}", style("Configuration").bold());
    let mut section = vec![check_config_file()];
    if let Some(dir) = &settings.prompts.custom_dir {
        section.push(check_prompts_dir(&Settings::expand_path(dir)));
    }
    print_section(section, &mut checks);

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before generating study material.",
            errors
        ));
        anyhow::bail!("{} doctor check(s) failed", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! tubestudy is ready to use.");
    }

    Ok(())
}

fn print_section(section: Vec<CheckResult>, all: &mut Vec<CheckResult>) {
    for check in &section {
        check.print();
    }
    println!();
    all.extend(section);
}

/// Check the LLM API key value.
fn check_api_key(name: &str, value: Option<&str>) -> CheckResult {
    match value.map(str::trim) {
        Some(key) if key.len() > 12 => {
            let prefix: String = key.chars().take(4).collect();
            let suffix: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
            CheckResult::ok(name, &format!("configured ({}...{})", prefix, suffix))
        }
        Some("") => CheckResult::error(name, "empty", &format!("Set with: export {}='...'", name)),
        Some(_) => CheckResult::warning(
            name,
            "set but unusually short",
            "Check that the full API key was copied",
        ),
        None => CheckResult::error(name, "not set", &format!("Set with: export {}='...'", name)),
    }
}

/// Check the service-account key file used for speech synthesis.
fn check_tts_credentials(path: &Path, env_var: &str) -> CheckResult {
    if !path.exists() {
        return CheckResult::warning(
            "Service account",
            &format!("{} not found", path.display()),
            &format!("Audio generation needs it. Set {} to your JSON key.", env_var),
        );
    }

    match ServiceAccountKey::load(path) {
        Ok(key) => CheckResult::ok(
            "Service account",
            &format!("{} ({})", key.client_email, path.display()),
        ),
        Err(e) => CheckResult::error(
            "Service account",
            &e.to_string(),
            "Download a fresh JSON key from the Google Cloud console",
        ),
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            &format!("Create {} to override", config_path.display()),
        )
    }
}

fn check_prompts_dir(dir: &Path) -> CheckResult {
    if dir.is_dir() {
        CheckResult::ok("Custom prompts", &format!("{}", dir.display()))
    } else {
        CheckResult::error(
            "Custom prompts",
            &format!("{} is not a directory", dir.display()),
            "Fix prompts.custom_dir in the config file",
        )
    }
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
    fn test_api_key_checks() {
        let ok = check_api_key("GROQ_API_KEY", Some("gsk_abcdefghijklmnop1234"));
        assert_eq!(ok.status, CheckStatus::Ok);
        assert_eq!(ok.message, "configured (gsk_...1234)");

        assert_eq!(check_api_key("K", None).status, CheckStatus::Error);
        assert_eq!(check_api_key("K", Some("  ")).status, CheckStatus::Error);
        assert_eq!(check_api_key("K", Some("short")).status, CheckStatus::Warning);
    }

    #[test]
    fn test_tts_credentials_checks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");

        assert_eq!(check_tts_credentials(&path, "GOOGLE_APPLICATION_CREDENTIALS").status, CheckStatus::Warning);

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(check_tts_credentials(&path, "GOOGLE_APPLICATION_CREDENTIALS").status, CheckStatus::Error);

        std::fs::write(&path, r#"{"client_email": "tts@example.com", "private_key": "pem"}"#).unwrap();
        let ok = check_tts_credentials(&path, "GOOGLE_APPLICATION_CREDENTIALS");
        assert_eq!(ok.status, CheckStatus::Ok);
        assert!(ok.message.starts_with("tts@example.com"));
    }

    #[test]
    fn test_prompts_dir_check() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(check_prompts_dir(dir.path()).status, CheckStatus::Ok);
        assert_eq!(check_prompts_dir(&dir.path().join("missing")).status, CheckStatus::Error);
    }
}
