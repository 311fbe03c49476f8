use serde::Deserialize;

use crate::{Answer, FailureKind, IngestReceipt, ServiceError};

#[derive(Debug, Deserialize)]
struct UploadBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ChatBody {
    response: ChatResponse,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Decode an `/upload` success body: a JSON object with a `message` string.
pub fn decode_ingest_response(body: &[u8]) -> Result<IngestReceipt, ServiceError> {
    let parsed: UploadBody = serde_json::from_slice(body).map_err(malformed)?;
    Ok(IngestReceipt {
        message: parsed.message,
    })
}

/// Decode a `/chat` success body: the answer lives at `response.result`.
pub fn decode_answer_response(body: &[u8]) -> Result<Answer, ServiceError> {
    let parsed: ChatBody = serde_json::from_slice(body).map_err(malformed)?;
    Ok(Answer {
        text: parsed.response.result,
    })
}

/// Extract the `error` text the service puts in non-2xx bodies, if any.
pub fn decode_error_detail(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|parsed| parsed.error)
}

fn malformed(err: serde_json::Error) -> ServiceError {
    ServiceError::new(FailureKind::MalformedResponse, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_reads_message() {
        let receipt = decode_ingest_response(br#"{"message":"Indexed 3 pages"}"#).unwrap();
        assert_eq!(receipt.message, "Indexed 3 pages");
    }

    #[test]
    fn ingest_ignores_extra_fields() {
        let receipt =
            decode_ingest_response(br#"{"message":"ok","chunks":12,"extra":{"a":1}}"#).unwrap();
        assert_eq!(receipt.message, "ok");
    }

    #[test]
    fn ingest_without_message_is_malformed() {
        let err = decode_ingest_response(br#"{"status":"done"}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }

    #[test]
    fn ingest_non_json_is_malformed() {
        let err = decode_ingest_response(b"<html>Internal Server Error</html>").unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }

    #[test]
    fn answer_reads_nested_result() {
        let answer =
            decode_answer_response(br#"{"response":{"query":"q","result":"42"}}"#).unwrap();
        assert_eq!(answer.text, "42");
    }

    #[test]
    fn answer_with_flat_result_is_malformed() {
        let err = decode_answer_response(br#"{"result":"42"}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }

    #[test]
    fn answer_with_non_string_result_is_malformed() {
        let err = decode_answer_response(br#"{"response":{"result":42}}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }

    #[test]
    fn error_detail_is_optional() {
        assert_eq!(
            decode_error_detail(br#"{"error":"No documents uploaded."}"#).as_deref(),
            Some("No documents uploaded.")
        );
        assert_eq!(decode_error_detail(b"oops"), None);
    }
}
