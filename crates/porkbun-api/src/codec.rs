// Envelope protocol codec
//
// Request side: flatten the body to a JSON object and stamp the
// credential pair into it. Response side: check the HTTP status, then
// the `{status, message}` envelope, then (optionally) decode the same
// bytes a second time into the caller's payload shape. The two decodes
// are kept separate so payload types never model envelope fields.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::auth::Credentials;
use crate::error::Error;
use crate::models::Envelope;

/// Build the authenticated JSON body for a request.
///
/// `None` yields exactly the two credential keys. Any caller-supplied
/// `apikey` / `secretapikey` is overwritten.
pub fn authenticated_body(
    credentials: &Credentials,
    body: Option<Value>,
) -> Result<Map<String, Value>, Error> {
    let mut map = match body {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(Error::Encoding(serde::ser::Error::custom(format!(
                "request body must be a JSON object, got {other}"
            ))));
        }
    };
    credentials.inject(&mut map);
    Ok(map)
}

/// Serialize the authenticated body to wire bytes.
pub fn encode_body(credentials: &Credentials, body: Option<Value>) -> Result<Vec<u8>, Error> {
    let map = authenticated_body(credentials, body)?;
    serde_json::to_vec(&map).map_err(Error::Encoding)
}

/// Convert a typed body into the generic form [`encode_body`] accepts.
pub fn to_body<B: serde::Serialize + ?Sized>(body: &B) -> Result<Value, Error> {
    serde_json::to_value(body).map_err(Error::Encoding)
}

/// Check the HTTP status and the response envelope.
///
/// Anything but 200 is an [`Error::Http`] carrying the raw body, even if
/// that body is a success-shaped envelope. On 200 an envelope with
/// `"status": "ERROR"` becomes [`Error::Api`].
pub fn check_envelope(status: StatusCode, body: &[u8]) -> Result<(), Error> {
    if status != StatusCode::OK {
        return Err(Error::Http {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    let envelope: Envelope = serde_json::from_slice(body).map_err(|e| decoding(e, body))?;

    if envelope.is_error() {
        return Err(Error::Api {
            message: envelope.message.unwrap_or_default(),
        });
    }

    Ok(())
}

/// Second decode of an already-checked body into the payload shape.
pub fn decode_payload<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|e| decoding(e, body))
}

/// Full response pipeline for operations that return a payload.
pub fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, Error> {
    check_envelope(status, body)?;
    decode_payload(body)
}

fn decoding(source: serde_json::Error, body: &[u8]) -> Error {
    Error::Decoding {
        source,
        body: String::from_utf8_lossy(body).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    fn creds() -> Credentials {
        Credentials::from(("pk1_test", "sk1_test"))
    }

    #[derive(Debug, Deserialize)]
    struct IpPayload {
        #[serde(rename = "yourIp")]
        your_ip: String,
    }

    #[test]
    fn empty_body_is_exactly_the_credentials() {
        let body = authenticated_body(&creds(), None).unwrap();
        assert_eq!(
            Value::Object(body),
            json!({"apikey": "pk1_test", "secretapikey": "sk1_test"})
        );
    }

    #[test]
    fn body_fields_survive_and_credentials_win() {
        let body = authenticated_body(
            &creds(),
            Some(json!({"ns": ["ns1.example.net"], "apikey": "caller-value"})),
        )
        .unwrap();
        assert_eq!(body["ns"], json!(["ns1.example.net"]));
        assert_eq!(body["apikey"], "pk1_test");
    }

    #[test]
    fn non_object_body_is_an_encoding_error() {
        let err = authenticated_body(&creds(), Some(json!(["not", "an", "object"]))).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)), "got {err:?}");
    }

    #[test]
    fn non_200_keeps_raw_body_even_when_it_looks_successful() {
        let raw = br#"{"status":"SUCCESS","yourIp":"1.2.3.4"}"#;
        let err = decode_response::<IpPayload>(StatusCode::INTERNAL_SERVER_ERROR, raw).unwrap_err();
        match err {
            Error::Http { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body.as_bytes(), raw);
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[test]
    fn non_200_with_non_json_body() {
        let err = check_envelope(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>").unwrap_err();
        assert_eq!(err.http_status(), Some(502));
    }

    #[test]
    fn error_status_becomes_api_error_without_payload_decode() {
        // The payload type would fail to decode (no `yourIp`), proving the
        // envelope check short-circuits first.
        let raw = br#"{"status":"ERROR","message":"Invalid API key"}"#;
        let err = decode_response::<IpPayload>(StatusCode::OK, raw).unwrap_err();
        assert_eq!(err.api_message(), Some("Invalid API key"));
    }

    #[test]
    fn status_match_is_case_sensitive() {
        let raw = br#"{"status":"error","message":"lowercase"}"#;
        assert!(check_envelope(StatusCode::OK, raw).is_ok());
    }

    #[test]
    fn malformed_json_is_a_decoding_error() {
        let err = check_envelope(StatusCode::OK, b"{not json").unwrap_err();
        match err {
            Error::Decoding { body, .. } => assert_eq!(body, "{not json"),
            other => panic!("expected Decoding error, got {other:?}"),
        }
    }

    #[test]
    fn payload_shape_mismatch_is_a_decoding_error() {
        let raw = br#"{"status":"SUCCESS","yourIp":42}"#;
        let err = decode_response::<IpPayload>(StatusCode::OK, raw).unwrap_err();
        assert!(matches!(err, Error::Decoding { .. }), "got {err:?}");
    }

    #[test]
    fn success_decodes_payload_next_to_envelope() {
        let raw = br#"{"status":"SUCCESS","yourIp":"203.0.113.7"}"#;
        let payload = decode_response::<IpPayload>(StatusCode::OK, raw).unwrap();
        assert_eq!(payload.your_ip, "203.0.113.7");
    }
}
