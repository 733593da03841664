//! Response side of the XACML model.

use serde::Serialize;
use std::fmt;

/// Outcome of a policy evaluation. Wire values are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Decision {
    Deny,
    Permit,
    Indeterminate,
    NotApplicable,
}

impl Decision {
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Decision::Deny => 0,
            Decision::Permit => 1,
            Decision::Indeterminate => 2,
            Decision::NotApplicable => 3,
        }
    }

    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Decision::Deny),
            1 => Some(Decision::Permit),
            2 => Some(Decision::Indeterminate),
            3 => Some(Decision::NotApplicable),
            _ => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Decision::Deny => "Deny",
            Decision::Permit => "Permit",
            Decision::Indeterminate => "Indeterminate",
            Decision::NotApplicable => "NotApplicable",
        })
    }
}

/// Decision an obligation is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FulfillOn {
    Deny,
    Permit,
}

impl FulfillOn {
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            FulfillOn::Deny => 0,
            FulfillOn::Permit => 1,
        }
    }

    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(FulfillOn::Deny),
            1 => Some(FulfillOn::Permit),
            _ => None,
        }
    }

    /// Whether an obligation with this trigger applies to `decision`.
    #[must_use]
    pub fn matches(self, decision: Decision) -> bool {
        matches!(
            (self, decision),
            (FulfillOn::Deny, Decision::Deny) | (FulfillOn::Permit, Decision::Permit)
        )
    }
}

impl fmt::Display for FulfillOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FulfillOn::Deny => "Deny",
            FulfillOn::Permit => "Permit",
        })
    }
}

/// Status code, optionally refined by a nested sub-code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCode {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_code: Option<Box<StatusCode>>,
}

impl StatusCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            sub_code: None,
        }
    }

    #[must_use]
    pub fn with_sub_code(mut self, sub_code: StatusCode) -> Self {
        self.sub_code = Some(Box::new(sub_code));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Status {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<StatusCode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeAssignment {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl AttributeAssignment {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data_type: None,
            value: Some(value.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Obligation {
    pub id: String,
    pub fulfill_on: FulfillOn,
    pub assignments: Vec<AttributeAssignment>,
}

impl Obligation {
    pub fn new(id: impl Into<String>, fulfill_on: FulfillOn) -> Self {
        Self {
            id: id.into(),
            fulfill_on,
            assignments: Vec::new(),
        }
    }

    /// Value of the first assignment with the given id.
    #[must_use]
    pub fn assignment(&self, id: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.id == id)
            .and_then(|a| a.value.as_deref())
    }
}

/// Decision for one resource, named `Result` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResult {
    pub decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    pub obligations: Vec<Obligation>,
}

impl DecisionResult {
    #[must_use]
    pub fn new(decision: Decision) -> Self {
        Self {
            decision,
            resource_id: None,
            status: None,
            obligations: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_permit(&self) -> bool {
        self.decision == Decision::Permit
    }

    /// Obligations whose trigger matches this result's decision.
    pub fn applicable_obligations(&self) -> impl Iterator<Item = &Obligation> {
        self.obligations
            .iter()
            .filter(|o| o.fulfill_on.matches(self.decision))
    }
}

/// PDP answer, optionally echoing the effective request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<crate::Request>,
    pub results: Vec<DecisionResult>,
}

impl Response {
    /// Decision of the result whose resource id equals `resource_id`.
    #[must_use]
    pub fn decision_for(&self, resource_id: &str) -> Option<Decision> {
        self.results
            .iter()
            .find(|r| r.resource_id.as_deref() == Some(resource_id))
            .map(|r| r.decision)
    }

    /// Decision of the first result, the common single-resource case.
    #[must_use]
    pub fn first_decision(&self) -> Option<Decision> {
        self.results.first().map(|r| r.decision)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_decision_codes_round_trip() {
        for d in [
            Decision::Deny,
            Decision::Permit,
            Decision::Indeterminate,
            Decision::NotApplicable,
        ] {
            assert_eq!(Decision::from_code(d.code()), Some(d));
        }
        assert_eq!(Decision::from_code(4), None);
        assert_eq!(Decision::NotApplicable.to_string(), "NotApplicable");
    }

    #[test]
    fn test_fulfill_on_matching() {
        assert!(FulfillOn::Permit.matches(Decision::Permit));
        assert!(!FulfillOn::Permit.matches(Decision::Indeterminate));
        assert_eq!(FulfillOn::from_code(-1), None);
    }

    #[test]
    fn test_decision_for_resource() {
        let mut a = DecisionResult::new(Decision::Deny);
        a.resource_id = Some("r1".to_owned());
        let mut b = DecisionResult::new(Decision::Permit);
        b.resource_id = Some("r2".to_owned());
        let response = Response {
            request: None,
            results: vec![a, b],
        };
        assert_eq!(response.decision_for("r2"), Some(Decision::Permit));
        assert_eq!(response.decision_for("r3"), None);
        assert_eq!(response.first_decision(), Some(Decision::Deny));
        assert!(response.results[1].is_permit());
    }

    #[test]
    fn test_applicable_obligations() {
        let mut result = DecisionResult::new(Decision::Permit);
        result.obligations = vec![
            Obligation::new("on-permit", FulfillOn::Permit),
            Obligation::new("on-deny", FulfillOn::Deny),
        ];
        let ids: Vec<&str> = result
            .applicable_obligations()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, vec!["on-permit"]);
    }
}
