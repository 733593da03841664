//! Well-known XACML 1.0/2.0 identifiers used when building requests.

pub const SUBJECT_ID: &str = "urn:oasis:names:tc:xacml:1.0:subject:subject-id";
pub const SUBJECT_KEY_INFO: &str = "urn:oasis:names:tc:xacml:1.0:subject:key-info";
pub const RESOURCE_ID: &str = "urn:oasis:names:tc:xacml:1.0:resource:resource-id";
pub const ACTION_ID: &str = "urn:oasis:names:tc:xacml:1.0:action:action-id";

pub const SUBJECT_CATEGORY_ACCESS: &str =
    "urn:oasis:names:tc:xacml:1.0:subject-category:access-subject";

pub const DATATYPE_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const DATATYPE_ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
pub const DATATYPE_BASE64_BINARY: &str = "http://www.w3.org/2001/XMLSchema#base64Binary";

pub const STATUS_OK: &str = "urn:oasis:names:tc:xacml:1.0:status:ok";
pub const STATUS_MISSING_ATTRIBUTE: &str = "urn:oasis:names:tc:xacml:1.0:status:missing-attribute";
pub const STATUS_SYNTAX_ERROR: &str = "urn:oasis:names:tc:xacml:1.0:status:syntax-error";
pub const STATUS_PROCESSING_ERROR: &str = "urn:oasis:names:tc:xacml:1.0:status:processing-error";
