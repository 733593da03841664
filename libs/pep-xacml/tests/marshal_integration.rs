#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Model <-> Hessian bytes, as exchanged with the PEP daemon.

use pep_hessian::{ByteBuffer, HessianMap, HessianValue};
use pep_xacml::marshal::dictionary::{CLASS_ATTRIBUTE, CLASS_RESPONSE, CLASS_RESULT};
use pep_xacml::{
    Attribute, AttributeAssignment, Decision, DecisionResult, Environment, FulfillOn,
    HessianMarshal, MarshalError, Obligation, Request, Response, Status, StatusCode, ids,
    read_object, write_object,
};
use std::sync::{Arc, Mutex};
use tracing_subscriber::layer::SubscriberExt;

fn full_request() -> Request {
    let mut request = Request::simple("CN=Alice,O=Example", "urn:example:ce:1", "submit-job");
    request.subjects[0].attributes.push(
        Attribute::new(ids::SUBJECT_KEY_INFO)
            .with_data_type(ids::DATATYPE_STRING)
            .with_issuer("CN=CA")
            .with_value("-----BEGIN CERTIFICATE-----\n...\n-----END CERTIFICATE-----"),
    );
    request.resources[0].content = Some("<job/>".to_owned());
    request.environment = Some(Environment {
        attributes: vec![Attribute::new("urn:env:empty")],
    });
    request
}

fn full_response(request: Request) -> Response {
    let mut obligation = Obligation::new("urn:example:obligation:map-account", FulfillOn::Permit);
    obligation.assignments.push(AttributeAssignment {
        id: "urn:example:account".to_owned(),
        data_type: Some(ids::DATATYPE_STRING.to_owned()),
        value: Some("alice001".to_owned()),
    });
    obligation.assignments.push(AttributeAssignment {
        id: "urn:example:group".to_owned(),
        data_type: None,
        value: None,
    });

    let mut result = DecisionResult::new(Decision::Permit);
    result.resource_id = Some("urn:example:ce:1".to_owned());
    result.status = Some(Status {
        message: Some("ok".to_owned()),
        code: Some(StatusCode::new(ids::STATUS_OK)),
    });
    result.obligations.push(obligation);

    Response {
        request: Some(request),
        results: vec![result, DecisionResult::new(Decision::Indeterminate)],
    }
}

#[test]
fn test_request_round_trips_through_bytes() {
    let request = full_request();
    let mut buffer = ByteBuffer::new();
    write_object(&request, &mut buffer).unwrap();
    let decoded: Request = read_object(&mut buffer).unwrap();
    assert_eq!(decoded, request);
    assert!(buffer.is_eof());
}

#[test]
fn test_response_round_trips_through_bytes() {
    let response = full_response(full_request());
    let mut buffer = ByteBuffer::new();
    write_object(&response, &mut buffer).unwrap();
    let decoded: Response = read_object(&mut buffer).unwrap();
    assert_eq!(decoded, response);
    assert_eq!(decoded.decision_for("urn:example:ce:1"), Some(Decision::Permit));
    assert_eq!(
        decoded.results[0].obligations[0].assignment("urn:example:account"),
        Some("alice001")
    );
}

#[test]
fn test_request_map_starts_with_class_name() {
    let bytes = full_request().marshal().to_bytes().unwrap();
    let class = b"org.glite.authz.pep.model.Request";
    assert_eq!(bytes[0], b'M');
    assert_eq!(bytes[1], b't');
    assert_eq!(&bytes[2..4], &[0, 33]);
    assert_eq!(&bytes[4..4 + class.len()], class);
    assert_eq!(bytes.last(), Some(&b'z'));
}

#[derive(Debug, Default)]
struct Warning {
    message: String,
    key: Option<String>,
}

impl tracing::field::Visit for Warning {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "key" {
            self.key = Some(value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }
}

#[derive(Clone, Default)]
struct WarningCapture {
    warnings: Arc<Mutex<Vec<Warning>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for WarningCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if *event.metadata().level() == tracing::Level::WARN {
            let mut warning = Warning::default();
            event.record(&mut warning);
            self.warnings.lock().unwrap().push(warning);
        }
    }
}

/// Runs `f` under a subscriber that records every WARN event.
fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<Warning>) {
    let capture = WarningCapture::default();
    let warnings = capture.warnings.clone();
    let subscriber = tracing_subscriber::registry().with(capture);
    let out = tracing::subscriber::with_default(subscriber, f);
    let captured = std::mem::take(&mut *warnings.lock().unwrap());
    (out, captured)
}

#[test]
fn test_attribute_map_with_extra_key() {
    let value = HessianValue::map(
        HessianMap::typed(CLASS_ATTRIBUTE)
            .with("id", "x")
            .with("values", HessianValue::list(vec![HessianValue::string("v1")]))
            .with("unexpected", HessianValue::integer(42)),
    );

    let (attribute, warnings) = capture_warnings(|| Attribute::unmarshal(&value));
    let attribute = attribute.unwrap();
    assert_eq!(attribute.id, "x");
    assert_eq!(attribute.values, vec!["v1"]);
    assert_eq!(attribute.data_type, None);
    assert_eq!(attribute.issuer, None);

    assert_eq!(warnings.len(), 1, "expected one warning, got: {warnings:?}");
    assert_eq!(warnings[0].message, "ignoring unrecognized key");
    assert_eq!(warnings[0].key.as_deref(), Some("unexpected"));
}

#[test]
fn test_known_keys_do_not_warn() {
    let bytes = full_request().marshal().to_bytes().unwrap();
    let (request, warnings) =
        capture_warnings(|| read_object::<Request>(&mut ByteBuffer::from_slice(&bytes).unwrap()));
    assert_eq!(request.unwrap(), full_request());
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
}

#[test]
fn test_minimal_response_from_daemon() {
    // Only the keys a daemon must send; everything else defaults.
    let value = HessianValue::map(HessianMap::typed(CLASS_RESPONSE).with(
        "results",
        HessianValue::list(vec![HessianValue::map(
            HessianMap::typed(CLASS_RESULT).with("decision", 0_i32),
        )]),
    ));
    let bytes = value.to_bytes().unwrap();
    let response: Response = read_object(&mut ByteBuffer::from_slice(&bytes).unwrap()).unwrap();
    assert!(response.request.is_none());
    assert_eq!(response.first_decision(), Some(Decision::Deny));
    assert!(response.results[0].obligations.is_empty());
}

#[test]
fn test_truncated_bytes_surface_codec_error() {
    let bytes = full_response(Request::default()).marshal().to_bytes().unwrap();
    let mut buffer = ByteBuffer::from_slice(&bytes[..bytes.len() - 1]).unwrap();
    let err = read_object::<Response>(&mut buffer).unwrap_err();
    assert!(matches!(err, MarshalError::Codec(_)));
}

#[test]
fn test_response_json_view() {
    let json = serde_json::to_value(full_response(Request::default())).unwrap();
    assert_eq!(json["results"][0]["decision"], "Permit");
    assert_eq!(json["results"][0]["resourceId"], "urn:example:ce:1");
    assert_eq!(
        json["results"][0]["obligations"][0]["fulfillOn"],
        "Permit"
    );
    assert!(json["results"][1].get("status").is_none());
}
