//! HTTP body encoding: base64 (standard alphabet, padded) over the Hessian
//! encoding of the marshalled object.

use pep_hessian::{ByteBuffer, HessianValue};
use pep_xacml::{HessianMarshal, Request, Response, write_object};

use crate::error::PepError;

/// Content type of authorization requests.
pub const CONTENT_TYPE: &str = "application/octet-stream";

mod base64_std {
    use base64::Engine;

    pub(super) fn encode(bytes: &[u8]) -> String {
        base64::engine::general_purpose::STANDARD.encode(bytes)
    }

    pub(super) fn decode(text: &[u8]) -> Result<Vec<u8>, base64::DecodeError> {
        base64::engine::general_purpose::STANDARD.decode(text)
    }
}

/// Encodes `request` into the body of an authorization POST.
///
/// # Errors
/// Returns [`PepError::Marshal`] if the Hessian encoding cannot be written.
pub fn encode_request(request: &Request) -> Result<String, PepError> {
    let mut buffer = ByteBuffer::new();
    write_object(request, &mut buffer)?;
    Ok(base64_std::encode(buffer.written()))
}

/// Decodes a PEP daemon answer. ASCII whitespace, such as line breaks
/// inserted by the daemon, is ignored.
///
/// # Errors
/// Returns [`PepError::Base64`] for invalid text, [`PepError::Codec`] for
/// malformed Hessian bytes and [`PepError::Marshal`] when the value is not a
/// response.
pub fn decode_response(body: &[u8]) -> Result<Response, PepError> {
    let text: Vec<u8> = body
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let bytes = base64_std::decode(&text)?;
    let mut input = ByteBuffer::from_slice(&bytes)?;
    let value = HessianValue::deserialize(&mut input)?;
    if !input.is_eof() {
        tracing::debug!(trailing = input.len(), "ignoring bytes after the response");
    }
    Ok(Response::unmarshal(&value)?)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use pep_xacml::{Decision, DecisionResult, read_object};

    fn encode_response(response: &Response) -> String {
        let mut buffer = ByteBuffer::new();
        write_object(response, &mut buffer).unwrap();
        base64_std::encode(buffer.written())
    }

    #[test]
    fn test_request_body_is_base64_of_hessian() {
        let request = Request::simple("CN=alice", "urn:res", "read");
        let body = encode_request(&request).unwrap();
        let bytes = base64_std::decode(body.as_bytes()).unwrap();
        assert_eq!(bytes[0], b'M');

        let mut input = ByteBuffer::from_slice(&bytes).unwrap();
        let decoded: Request = read_object(&mut input).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_response_tolerates_line_breaks() {
        let mut result = DecisionResult::new(Decision::Permit);
        result.resource_id = Some("urn:res".to_owned());
        let response = Response {
            request: None,
            results: vec![result],
        };

        let body = encode_response(&response);
        let wrapped: String = body
            .as_bytes()
            .chunks(16)
            .map(|line| format!("{}\r\n", std::str::from_utf8(line).unwrap()))
            .collect();

        let decoded = decode_response(wrapped.as_bytes()).unwrap();
        assert_eq!(decoded, response);
        assert_eq!(decoded.decision_for("urn:res"), Some(Decision::Permit));
    }

    #[test]
    fn test_invalid_base64() {
        let err = decode_response(b"not base64 at all!").unwrap_err();
        assert!(matches!(err, PepError::Base64(_)));
    }

    #[test]
    fn test_malformed_hessian() {
        let body = base64_std::encode(b"Mt\x00");
        let err = decode_response(body.as_bytes()).unwrap_err();
        assert!(matches!(err, PepError::Codec(_)));
    }

    #[test]
    fn test_wrong_object() {
        let body = encode_request(&Request::default()).unwrap();
        let err = decode_response(body.as_bytes()).unwrap_err();
        assert!(matches!(err, PepError::Marshal(_)));
    }

    #[test]
    fn test_empty_body() {
        let err = decode_response(b"").unwrap_err();
        assert!(matches!(err, PepError::Codec(_)));
    }
}
