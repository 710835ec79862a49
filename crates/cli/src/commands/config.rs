use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use encore_core::config::{AppConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let doc = config_file_doc.as_ref();
    let path = config_file_path.as_deref();

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "notifications.birthday_days_before",
        &config.notifications.birthday_days_before.to_string(),
        field_source(
            "notifications.birthday_days_before",
            &["ENCORE_NOTIFICATIONS_BIRTHDAY_DAYS_BEFORE"],
            doc,
            path,
        ),
    ));
    lines.push(render_line(
        "notifications.max_distance",
        &config.notifications.max_distance.to_string(),
        field_source(
            "notifications.max_distance",
            &["ENCORE_NOTIFICATIONS_MAX_DISTANCE"],
            doc,
            path,
        ),
    ));
    lines.push(render_line(
        "notifications.max_results",
        &config.notifications.max_results.to_string(),
        field_source("notifications.max_results", &["ENCORE_NOTIFICATIONS_MAX_RESULTS"], doc, path),
    ));
    lines.push(render_line(
        "notifications.max_price",
        &config.notifications.max_price.to_string(),
        field_source("notifications.max_price", &["ENCORE_NOTIFICATIONS_MAX_PRICE"], doc, path),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source("logging.level", &["ENCORE_LOGGING_LEVEL", "ENCORE_LOG_LEVEL"], doc, path),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format).to_lowercase(),
        field_source("logging.format", &["ENCORE_LOGGING_FORMAT", "ENCORE_LOG_FORMAT"], doc, path),
    ));

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("encore.toml"), PathBuf::from("config/encore.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let raw = fs::read_to_string(path?).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    dotted: &str,
    env_keys: &[&str],
    doc: Option<&Value>,
    path: Option<&Path>,
) -> String {
    for key in env_keys {
        let is_set = env::var(key).map(|value| !value.trim().is_empty()).unwrap_or(false);
        if is_set {
            return format!("env:{key}");
        }
    }

    if let (Some(doc), Some(path)) = (doc, path) {
        if file_has_key(doc, dotted) {
            return format!("file:{}", path.display());
        }
    }

    "default".to_string()
}

fn file_has_key(doc: &Value, dotted: &str) -> bool {
    let mut current = doc;
    for part in dotted.split('.') {
        match current.get(part) {
            Some(next) => current = next,
            None => return false,
        }
    }
    true
}

fn render_line(field: &str, value: &str, source: String) -> String {
    format!("- {field} = {value}  [{source}]")
}

#[cfg(test)]
mod tests {
    use toml::Value;

    use super::file_has_key;

    #[test]
    fn dotted_lookup_walks_nested_tables() {
        let doc: Value = "[notifications]\nmax_results = 3\n".parse().expect("valid toml");

        assert!(file_has_key(&doc, "notifications.max_results"));
        assert!(!file_has_key(&doc, "notifications.max_price"));
        assert!(!file_has_key(&doc, "logging.level"));
    }
}
