//! Request side of the XACML model.

use crate::ids;
use serde::Serialize;

/// A named attribute with zero or more string values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    pub values: Vec<String>,
}

impl Attribute {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data_type: None,
            issuer: None,
            values: Vec::new(),
        }
    }

    /// String-typed attribute holding a single value.
    pub fn string(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(id)
            .with_data_type(ids::DATATYPE_STRING)
            .with_value(value)
    }

    #[must_use]
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Subject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub attributes: Vec<Attribute>,
}

impl Subject {
    /// Access subject identified by `subject_id`.
    pub fn access_subject(subject_id: impl Into<String>) -> Self {
        Self {
            category: Some(ids::SUBJECT_CATEGORY_ACCESS.to_owned()),
            attributes: vec![Attribute::string(ids::SUBJECT_ID, subject_id)],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub attributes: Vec<Attribute>,
}

impl Resource {
    pub fn with_id(resource_id: impl Into<String>) -> Self {
        Self {
            content: None,
            attributes: vec![Attribute::string(ids::RESOURCE_ID, resource_id)],
        }
    }

    /// First value of the resource-id attribute.
    #[must_use]
    pub fn resource_id(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.id == ids::RESOURCE_ID)
            .and_then(|a| a.values.first())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Action {
    pub attributes: Vec<Attribute>,
}

impl Action {
    pub fn with_id(action_id: impl Into<String>) -> Self {
        Self {
            attributes: vec![Attribute::string(ids::ACTION_ID, action_id)],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Environment {
    pub attributes: Vec<Attribute>,
}

/// Authorization request sent to the PDP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Request {
    pub subjects: Vec<Subject>,
    pub resources: Vec<Resource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
}

impl Request {
    /// One access subject, one resource and one action, all string-typed.
    pub fn simple(
        subject_id: impl Into<String>,
        resource_id: impl Into<String>,
        action_id: impl Into<String>,
    ) -> Self {
        Self {
            subjects: vec![Subject::access_subject(subject_id)],
            resources: vec![Resource::with_id(resource_id)],
            action: Some(Action::with_id(action_id)),
            environment: None,
        }
    }
}
