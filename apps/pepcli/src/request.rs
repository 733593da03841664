use anyhow::{Context, bail};
use pep_xacml::{Action, Attribute, Environment, Request, Resource, Subject, ids};
use std::path::Path;

use crate::cli::{Cli, Scope};

const PEM_CERT_HEADER: &str = "-----BEGIN CERTIFICATE-----";

/// Builds the XACML request described by the command-line options.
pub fn build_request(cli: &Cli) -> anyhow::Result<Request> {
    let resource_id = cli
        .resourceid
        .as_deref()
        .context("--resourceid is required")?;
    let action_id = cli.actionid.as_deref().context("--actionid is required")?;
    if cli.subjectid.is_none() && cli.certchain.is_none() {
        bail!("either --subjectid or --certchain is required");
    }

    let mut subject = Subject {
        category: Some(cli.subject_category.clone()),
        attributes: Vec::new(),
    };
    if let Some(subject_id) = &cli.subjectid {
        subject
            .attributes
            .push(Attribute::string(ids::SUBJECT_ID, subject_id));
    }
    if let Some(path) = &cli.certchain {
        subject
            .attributes
            .push(Attribute::string(ids::SUBJECT_KEY_INFO, read_cert_chain(path)?));
    }

    let mut resource = Resource::with_id(resource_id);
    let mut action = Action::with_id(action_id);
    let mut environment = Environment::default();
    for extra in &cli.attribute {
        let attribute = Attribute::string(&extra.id, &extra.value);
        match extra.scope {
            Scope::Subject => subject.attributes.push(attribute),
            Scope::Resource => resource.attributes.push(attribute),
            Scope::Action => action.attributes.push(attribute),
            Scope::Environment => environment.attributes.push(attribute),
        }
    }

    Ok(Request {
        subjects: vec![subject],
        resources: vec![resource],
        action: Some(action),
        environment: (!environment.attributes.is_empty()).then_some(environment),
    })
}

fn read_cert_chain(path: &Path) -> anyhow::Result<String> {
    let pem = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read certificate chain {}", path.display()))?;
    if !pem.contains(PEM_CERT_HEADER) {
        bail!("{} does not contain a PEM certificate", path.display());
    }
    Ok(pem.trim().to_owned())
}
