use std::collections::HashMap;
use std::env;
use std::fs;

pub const DEFAULT_RUN_MODE: &str = "api";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_CALENDAR_ID: &str = "primary";
pub const DEFAULT_PORT: u16 = 8000;

/// Key/value settings parsed from an optional env-style file, with process
/// environment variables as the fallback for any key the file doesn't set.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    /// Loads from the file named by `CONFIG_FILE`, or an empty config when
    /// the variable is unset or the file is unreadable.
    pub fn load() -> Self {
        match env::var("CONFIG_FILE") {
            Ok(path) => Self::from_file(&path).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(format!("Invalid config line {}: {}", idx + 1, line));
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if (value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\''))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| env::var(key).ok())
    }

    pub fn run_mode(&self) -> String {
        self.get("RUN_MODE")
            .unwrap_or_else(|| DEFAULT_RUN_MODE.to_string())
    }

    pub fn openai_api_key(&self) -> Option<String> {
        self.get("OPENAI_API_KEY")
    }

    pub fn openai_model(&self) -> String {
        self.get("OPENAI_MODEL")
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// Bearer token for the calendar service. Obtaining and refreshing it is
    /// the deployment's problem; the gateway just sends it.
    pub fn calendar_token(&self) -> Option<String> {
        self.get("CALENDAR_API_TOKEN")
    }

    pub fn calendar_id(&self) -> String {
        self.get("CALENDAR_ID")
            .unwrap_or_else(|| DEFAULT_CALENDAR_ID.to_string())
    }

    pub fn port(&self) -> u16 {
        self.get("PORT")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_PORT)
    }
}
