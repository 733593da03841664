use colored::Colorize;
use pep_xacml::{Decision, DecisionResult, Response, StatusCode};
use std::fmt::{self, Write};

/// Human readable rendering of a response.
pub fn render_text(response: &Response) -> Result<String, fmt::Error> {
    let mut out = String::new();
    if response.results.is_empty() {
        out.push_str("No decision returned\n");
    }
    for result in &response.results {
        render_result(&mut out, result)?;
    }
    Ok(out)
}

fn render_result(out: &mut String, result: &DecisionResult) -> fmt::Result {
    let decision = result.decision.to_string();
    let decision = match result.decision {
        Decision::Permit => decision.green().bold(),
        Decision::Deny => decision.red().bold(),
        Decision::Indeterminate | Decision::NotApplicable => decision.yellow().bold(),
    };
    writeln!(
        out,
        "Resource: {}",
        result.resource_id.as_deref().unwrap_or("<unspecified>")
    )?;
    writeln!(out, "Decision: {decision}")?;

    if let Some(status) = &result.status {
        let code = status
            .code
            .as_ref()
            .map_or_else(|| "<no code>".to_owned(), status_chain);
        write!(out, "Status: {code}")?;
        if let Some(message) = &status.message {
            write!(out, " ({message})")?;
        }
        writeln!(out)?;
    }

    for obligation in result.applicable_obligations() {
        writeln!(
            out,
            "Obligation: {} (fulfill on {})",
            obligation.id, obligation.fulfill_on
        )?;
        for assignment in &obligation.assignments {
            writeln!(
                out,
                "  {} = {}",
                assignment.id,
                assignment.value.as_deref().unwrap_or_default()
            )?;
        }
    }
    Ok(())
}

fn status_chain(code: &StatusCode) -> String {
    let mut chain = code.code.clone();
    let mut next = code.sub_code.as_deref();
    while let Some(sub) = next {
        chain.push_str(" > ");
        chain.push_str(&sub.code);
        next = sub.sub_code.as_deref();
    }
    chain
}

/// JSON rendering of a response.
pub fn render_json(response: &Response) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(response)?)
}
