use std::{fs, path::Path, time::Duration};

use client_core::{CoordinatorOptions, DEFAULT_API_URL};

pub const DEFAULT_CONFIG_FILE: &str = "blog_browser.toml";

const SETTING_KEYS: [&str; 4] = ["api_url", "stale_time_secs", "refetch_on_focus", "log_filter"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub stale_time_secs: u64,
    pub refetch_on_focus: bool,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            stale_time_secs: 300,
            refetch_on_focus: false,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn coordinator_options(&self) -> CoordinatorOptions {
        CoordinatorOptions {
            stale_time: Duration::from_secs(self.stale_time_secs),
            refetch_on_focus: self.refetch_on_focus,
        }
    }
}

/// Defaults, then the TOML file at `path` if it exists, then the environment.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

/// Reads each known key on its own; a key with a bad value is skipped
/// without discarding the rest of the file.
fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(table) = toml::from_str::<toml::Table>(raw) else {
        return;
    };
    for key in SETTING_KEYS {
        let value = match table.get(key) {
            Some(toml::Value::String(v)) => v.clone(),
            Some(toml::Value::Integer(v)) => v.to_string(),
            Some(toml::Value::Boolean(v)) => v.to_string(),
            _ => continue,
        };
        apply_value(settings, key, &value);
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("BLOG_API_URL") {
        apply_value(settings, "api_url", &v);
    }
    for key in SETTING_KEYS {
        if let Some(v) = lookup(&format!("APP__{}", key.to_ascii_uppercase())) {
            apply_value(settings, key, &v);
        }
    }
}

fn apply_value(settings: &mut Settings, key: &str, value: &str) {
    match key {
        "api_url" => settings.api_url = value.to_string(),
        "stale_time_secs" => {
            if let Ok(parsed) = value.trim().parse::<u64>() {
                settings.stale_time_secs = parsed;
            }
        }
        "refetch_on_focus" => {
            if let Ok(parsed) = value.trim().parse::<bool>() {
                settings.refetch_on_focus = parsed;
            }
        }
        "log_filter" => settings.log_filter = value.to_string(),
        _ => {}
    }
}
