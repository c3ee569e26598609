use serde_json::json;

use policydesk_core::config::{AppConfig, LoadOptions};

/// Renders the effective configuration after defaults, file, and environment
/// layering. Secrets are reported as present/absent, never printed.
pub fn run() -> String {
    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            let payload = json!({
                "command": "config",
                "status": "ok",
                "document": {
                    "path": config.document.path,
                },
                "llm": {
                    "provider": config.llm.provider,
                    "api_key": if config.llm.api_key.is_some() { "<redacted>" } else { "<unset>" },
                    "base_url": config.llm.base_url,
                    "model": config.llm.model,
                    "timeout_secs": config.llm.timeout_secs,
                    "max_retries": config.llm.max_retries,
                },
                "logging": {
                    "level": config.logging.level,
                    "format": config.logging.format,
                },
            });
            serde_json::to_string_pretty(&payload).unwrap_or_else(|error| error.to_string())
        }
        Err(error) => {
            let payload = json!({
                "command": "config",
                "status": "error",
                "error_class": "config_validation",
                "message": error.to_string(),
            });
            serde_json::to_string_pretty(&payload).unwrap_or_else(|error| error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::run;
    use crate::commands::test_env::with_env;

    #[test]
    fn secrets_never_appear_in_output() {
        with_env(&[("POLICYDESK_LLM_API_KEY", "sk-super-secret")], || {
            let output = run();

            assert!(!output.contains("sk-super-secret"));
            let payload: Value = serde_json::from_str(&output).expect("json output");
            assert_eq!(payload["llm"]["api_key"], "<redacted>");
        });
    }
}
