//! Class and field names shared with the PEP daemon. Changing any of these
//! breaks interoperability.

pub const CLASS_PREFIX: &str = "org.glite.authz.pep.model.";

pub const CLASS_REQUEST: &str = "org.glite.authz.pep.model.Request";
pub const CLASS_SUBJECT: &str = "org.glite.authz.pep.model.Subject";
pub const CLASS_RESOURCE: &str = "org.glite.authz.pep.model.Resource";
pub const CLASS_ACTION: &str = "org.glite.authz.pep.model.Action";
pub const CLASS_ENVIRONMENT: &str = "org.glite.authz.pep.model.Environment";
pub const CLASS_ATTRIBUTE: &str = "org.glite.authz.pep.model.Attribute";
pub const CLASS_RESPONSE: &str = "org.glite.authz.pep.model.Response";
pub const CLASS_RESULT: &str = "org.glite.authz.pep.model.Result";
pub const CLASS_STATUS: &str = "org.glite.authz.pep.model.Status";
pub const CLASS_STATUS_CODE: &str = "org.glite.authz.pep.model.StatusCode";
pub const CLASS_OBLIGATION: &str = "org.glite.authz.pep.model.Obligation";
pub const CLASS_ATTRIBUTE_ASSIGNMENT: &str = "org.glite.authz.pep.model.AttributeAssignment";

pub const FIELD_SUBJECTS: &str = "subjects";
pub const FIELD_RESOURCES: &str = "resources";
pub const FIELD_ACTION: &str = "action";
pub const FIELD_ENVIRONMENT: &str = "environment";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_ATTRIBUTES: &str = "attributes";
pub const FIELD_CONTENT: &str = "content";
pub const FIELD_ID: &str = "id";
pub const FIELD_DATA_TYPE: &str = "dataType";
pub const FIELD_ISSUER: &str = "issuer";
pub const FIELD_VALUES: &str = "values";
pub const FIELD_VALUE: &str = "value";
pub const FIELD_REQUEST: &str = "request";
pub const FIELD_RESULTS: &str = "results";
pub const FIELD_DECISION: &str = "decision";
pub const FIELD_RESOURCE_ID: &str = "resourceId";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_OBLIGATIONS: &str = "obligations";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_CODE: &str = "code";
pub const FIELD_SUB_CODE: &str = "subCode";
pub const FIELD_FULFILL_ON: &str = "fulfillOn";
pub const FIELD_ASSIGNMENTS: &str = "assignments";

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_class_names_share_the_prefix() {
        for class in [
            CLASS_REQUEST,
            CLASS_SUBJECT,
            CLASS_RESOURCE,
            CLASS_ACTION,
            CLASS_ENVIRONMENT,
            CLASS_ATTRIBUTE,
            CLASS_RESPONSE,
            CLASS_RESULT,
            CLASS_STATUS,
            CLASS_STATUS_CODE,
            CLASS_OBLIGATION,
            CLASS_ATTRIBUTE_ASSIGNMENT,
        ] {
            assert!(class.starts_with(CLASS_PREFIX), "{class}");
        }
    }
}
