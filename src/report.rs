//! Plan and deployment output.

use std::fmt::Write;
use std::sync::Arc;

use serde::Serialize;

use wsboot_core::{DeployedEndpoint, StartupPlan, StartupReport};

#[derive(Serialize)]
struct DeploymentView<'a> {
    report: &'a StartupReport,
    endpoints: Vec<&'a DeployedEndpoint>,
}

/// Render a plan as `table` or `json`.
pub(crate) fn render_plan(plan: &StartupPlan, format: &str) -> anyhow::Result<String> {
    if format == "json" {
        return Ok(serde_json::to_string_pretty(plan)?);
    }

    let classification = &plan.classification;
    let mut out = String::new();
    writeln!(out, "Plan")?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out, "Application configs: {}", classification.application_configs.len())?;
    writeln!(out, "Endpoint configs:    {}", classification.endpoint_configs.len())?;
    writeln!(out, "Annotated endpoints: {}", classification.pojo_endpoints.len())?;
    writeln!(out, "Excluded:            {}", classification.excluded.len())?;
    writeln!(out)?;

    if plan.deployment.is_empty() {
        writeln!(out, "Nothing to deploy.")?;
        return Ok(out);
    }

    write_header(&mut out, "PATH")?;
    for config in &plan.deployment.configs {
        write_row(
            &mut out,
            &config.path,
            "config",
            config.endpoint_class.as_str(),
            &config.subprotocols,
        )?;
    }
    for pojo in &plan.deployment.pojos {
        write_row(
            &mut out,
            pojo.path(),
            "annotated",
            pojo.class.as_str(),
            &pojo.annotation.subprotocols,
        )?;
    }
    Ok(out)
}

/// Render a finished startup and the endpoints the container now holds.
pub(crate) fn render_deployment(
    report: &StartupReport,
    endpoints: &[Arc<DeployedEndpoint>],
    format: &str,
) -> anyhow::Result<String> {
    if format == "json" {
        let view = DeploymentView {
            report,
            endpoints: endpoints.iter().map(|e| e.as_ref()).collect(),
        };
        return Ok(serde_json::to_string_pretty(&view)?);
    }

    let mut out = String::new();
    let context = if report.context_path.is_empty() {
        "/"
    } else {
        report.context_path.as_str()
    };
    writeln!(out, "Startup {} under {}", report.startup_id, context)?;
    writeln!(
        out,
        "Registered {} endpoint configs and {} annotated endpoints",
        report.registration.endpoints, report.registration.pojos
    )?;
    writeln!(out)?;

    if endpoints.is_empty() {
        writeln!(out, "No endpoints deployed.")?;
        return Ok(out);
    }

    write_header(&mut out, "FULL PATH")?;
    for endpoint in endpoints {
        let kind = if endpoint.is_annotated() { "annotated" } else { "config" };
        write_row(
            &mut out,
            endpoint.full_path(),
            kind,
            endpoint.endpoint_class().as_str(),
            endpoint.subprotocols(),
        )?;
    }
    Ok(out)
}

fn write_header(out: &mut String, path_title: &str) -> std::fmt::Result {
    writeln!(out, "{:<30} {:<10} {:<30} {}", path_title, "KIND", "CLASS", "SUBPROTOCOLS")?;
    writeln!(out, "{}", "-".repeat(80))
}

fn write_row(
    out: &mut String,
    path: &str,
    kind: &str,
    class: &str,
    subprotocols: &[String],
) -> std::fmt::Result {
    let subprotocols = if subprotocols.is_empty() {
        "-".to_string()
    } else {
        subprotocols.join(", ")
    };
    writeln!(out, "{:<30} {:<10} {:<30} {}", path, kind, class, subprotocols)
}
