use secrecy::ExposeSecret;
use serde::Serialize;

use policydesk_core::config::{AppConfig, LlmProvider, LoadOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                error.to_string().replace('"', "\\\"")
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_document(&config));
            checks.push(check_backend(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "document_presence",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
            checks.push(DoctorCheck {
                name: "backend_readiness",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_document(config: &AppConfig) -> DoctorCheck {
    let path = &config.document.path;
    if path.exists() {
        DoctorCheck {
            name: "document_presence",
            status: CheckStatus::Pass,
            details: format!("source document found at `{}`", path.display()),
        }
    } else {
        DoctorCheck {
            name: "document_presence",
            status: CheckStatus::Fail,
            details: format!(
                "source document missing at `{}`; chat will degrade to placeholder content",
                path.display()
            ),
        }
    }
}

fn check_backend(config: &AppConfig) -> DoctorCheck {
    let ready = match config.llm.provider {
        LlmProvider::OpenAi => config
            .llm
            .api_key
            .as_ref()
            .map(|key| !key.expose_secret().trim().is_empty())
            .unwrap_or(false),
        LlmProvider::Ollama => config
            .llm
            .base_url
            .as_ref()
            .map(|url| !url.trim().is_empty())
            .unwrap_or(false),
    };

    DoctorCheck {
        name: "backend_readiness",
        status: if ready { CheckStatus::Pass } else { CheckStatus::Fail },
        details: if ready {
            format!("{:?} backend credentials are configured", config.llm.provider)
        } else {
            "backend credentials are incomplete for the configured provider".to_string()
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::with_capacity(report.checks.len() + 2);
    lines.push(report.summary.clone());
    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("  [{marker}] {}: {}", check.name, check.details));
    }
    lines.join("\n")
}
