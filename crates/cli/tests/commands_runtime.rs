use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use policydesk_cli::commands::{classify, doctor, excerpt};
use policydesk_core::keywords::Topic;
use serde_json::Value;
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn with_env<F: FnOnce()>(vars: &[(&str, &str)], body: F) {
    let _guard = ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env lock");
    for (key, value) in vars {
        env::set_var(key, value);
    }
    body();
    for (key, _) in vars {
        env::remove_var(key);
    }
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).unwrap_or_else(|error| {
        panic!("command output should be JSON ({error}): {output}");
    })
}

#[test]
fn classify_and_excerpt_agree_on_topic_keywords() {
    let dir = TempDir::new().expect("tempdir");
    let document_path = dir.path().join("policy.txt");
    fs::write(
        &document_path,
        "plan overview\n\
         the death benefit is payable to the nominee\n\
         a first year discount applies to annual premium payment\n\
         closing remarks",
    )
    .expect("write document");
    let path = document_path.to_str().expect("utf-8 path").to_string();

    with_env(&[("POLICYDESK_DOCUMENT_PATH", &path)], || {
        let classified = classify::run("What is the death benefit coverage?");
        let classify_payload = parse_payload(&classified.output);
        assert_eq!(classify_payload["data"]["decision"], "benefit");

        let excerpted = excerpt::run(Topic::Benefit, None);
        assert_eq!(excerpted.exit_code, 0, "output: {}", excerpted.output);
        let excerpt_payload = parse_payload(&excerpted.output);
        assert!(excerpt_payload["data"]["text"]
            .as_str()
            .expect("text")
            .contains("death benefit"));
    });
}

#[test]
fn doctor_reports_failure_for_missing_document() {
    with_env(&[("POLICYDESK_DOCUMENT_PATH", "/nonexistent/policy.txt")], || {
        let output = doctor::run(true);
        let report = parse_payload(&output);
        assert_eq!(report["overall_status"], "fail");
        assert_eq!(report["checks"][0]["name"], "config_validation");
        assert_eq!(report["checks"][0]["status"], "pass");
    });
}
