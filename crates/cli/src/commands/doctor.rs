use encore_core::config::{AppConfig, LoadOptions};
use encore_core::fixtures::{sample_catalog, sample_customer};
use encore_core::geo::{reference_cities, DistanceCache};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
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
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let checks = vec![
        check_config(),
        check_city_reference(),
        check_fixture_catalog(),
        check_customer_city(),
    ];

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_config() -> DoctorCheck {
    match AppConfig::load(LoadOptions::default()) {
        Ok(_) => DoctorCheck {
            name: "config_validation",
            status: CheckStatus::Pass,
            details: "configuration loaded and validated".to_string(),
        },
        Err(error) => DoctorCheck {
            name: "config_validation",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn check_city_reference() -> DoctorCheck {
    let table = reference_cities();
    let cache = DistanceCache::build(&table);

    if cache.len() != table.len() * table.len() {
        return DoctorCheck {
            name: "city_reference_integrity",
            status: CheckStatus::Fail,
            details: format!(
                "expected {} cached pairs, found {}",
                table.len() * table.len(),
                cache.len()
            ),
        };
    }

    for (a, _) in table.iter() {
        if cache.distance(a, a) != Some(0) {
            return DoctorCheck {
                name: "city_reference_integrity",
                status: CheckStatus::Fail,
                details: format!("self-distance for `{a}` is not zero"),
            };
        }
        for (b, _) in table.iter() {
            if cache.distance(a, b) != cache.distance(b, a) {
                return DoctorCheck {
                    name: "city_reference_integrity",
                    status: CheckStatus::Fail,
                    details: format!("distance between `{a}` and `{b}` is not symmetric"),
                };
            }
        }
    }

    DoctorCheck {
        name: "city_reference_integrity",
        status: CheckStatus::Pass,
        details: format!("{} cities, {} cached pairs", table.len(), cache.len()),
    }
}

fn check_fixture_catalog() -> DoctorCheck {
    let catalog = sample_catalog();

    if catalog.is_empty() {
        return DoctorCheck {
            name: "fixture_catalog",
            status: CheckStatus::Fail,
            details: "sample catalog is empty".to_string(),
        };
    }

    let mut seen = std::collections::HashSet::new();
    for event in catalog.iter() {
        if !seen.insert(event.id) {
            return DoctorCheck {
                name: "fixture_catalog",
                status: CheckStatus::Fail,
                details: format!("duplicate event id {}", event.id.0),
            };
        }
        if event.price.is_some_and(|price| price.is_sign_negative()) {
            return DoctorCheck {
                name: "fixture_catalog",
                status: CheckStatus::Fail,
                details: format!("event {} has a negative price", event.id.0),
            };
        }
    }

    DoctorCheck {
        name: "fixture_catalog",
        status: CheckStatus::Pass,
        details: format!("{} events with unique ids and well-formed prices", catalog.len()),
    }
}

fn check_customer_city() -> DoctorCheck {
    let customer = sample_customer();
    let table = reference_cities();

    if table.contains(&customer.city) {
        DoctorCheck {
            name: "customer_city_resolution",
            status: CheckStatus::Pass,
            details: format!("`{}` resolves in the city reference table", customer.city),
        }
    } else {
        DoctorCheck {
            name: "customer_city_resolution",
            status: CheckStatus::Fail,
            details: format!(
                "customer home city `{}` is not in the city reference table",
                customer.city
            ),
        }
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
