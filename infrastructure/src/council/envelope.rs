//! Response envelope decoding for the council server.
//!
//! Every stage endpoint answers with
//!
//! ```text
//! { "success": true,  "stage": N, "data": <stage payload> }
//! { "success": false, "error": "<message>" }
//! ```
//!
//! Decoding is kept free of I/O so every failure path can be tested
//! without a server.

use council_application::{StageError, StagePayload};
use council_domain::Stage;
use serde::{Deserialize, Serialize};

/// Request body sent to every stage endpoint
#[derive(Debug, Serialize)]
pub(crate) struct StageRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    /// Absent counts as failure
    #[serde(default)]
    success: bool,
    #[serde(default)]
    stage: Option<u8>,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Decode a stage response into its payload.
///
/// A non-2xx `status` fails as a transport error before the body is
/// looked at.
pub fn decode_stage_response(
    stage: Stage,
    status: u16,
    body: &[u8],
) -> Result<StagePayload, StageError> {
    if !(200..300).contains(&status) {
        return Err(StageError::http_status(stage, status));
    }

    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|e| StageError::malformed(stage, format!("invalid envelope: {}", e)))?;

    if !envelope.success {
        return Err(StageError::application(stage, envelope.error));
    }

    if let Some(reported) = envelope.stage
        && reported != stage.number()
    {
        return Err(StageError::malformed(
            stage,
            format!("server answered for stage {}", reported),
        ));
    }

    let data = envelope
        .data
        .ok_or_else(|| StageError::malformed(stage, "missing `data` field"))?;

    let payload = match stage {
        Stage::Opinions => serde_json::from_value(data).map(StagePayload::Opinions),
        Stage::Review => serde_json::from_value(data).map(StagePayload::Reviews),
        Stage::Synthesis => serde_json::from_value(data).map(StagePayload::Synthesis),
    };
    payload.map_err(|e| StageError::malformed(stage, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(stage: Stage, status: u16, body: &str) -> Result<StagePayload, StageError> {
        decode_stage_response(stage, status, body.as_bytes())
    }

    #[test]
    fn test_decode_opinions() {
        let body = r##"{
            "success": true,
            "stage": 1,
            "data": [
                {"author": "Alpha", "content": "4", "tokens": 3, "latency": 0.5,
                 "color": "#ff6b6b", "timestamp": "2024-05-01T12:00:00.000001"}
            ]
        }"##;
        let StagePayload::Opinions(opinions) = decode(Stage::Opinions, 200, body).unwrap() else {
            panic!("expected opinions");
        };
        assert_eq!(opinions.len(), 1);
        assert_eq!(opinions[0].author.as_str(), "Alpha");
        assert_eq!(opinions[0].meta.tokens, 3);
    }

    #[test]
    fn test_decode_synthesis_single_record() {
        let body = r#"{"success": true, "data": {"chairman": "Chair", "final_answer": "The answer is 4.", "tokens": 5}}"#;
        let StagePayload::Synthesis(record) = decode(Stage::Synthesis, 200, body).unwrap() else {
            panic!("expected synthesis");
        };
        assert_eq!(record.chairman.as_str(), "Chair");
        assert_eq!(record.final_answer, "The answer is 4.");
    }

    #[test]
    fn test_non_success_status_ignores_body() {
        let err = decode(Stage::Review, 500, r#"{"success": false, "error": "boom"}"#).unwrap_err();
        assert_eq!(err, StageError::http_status(Stage::Review, 500));

        let err = decode(Stage::Review, 400, "not json at all").unwrap_err();
        assert_eq!(err.kind(), "transport");
    }

    #[test]
    fn test_application_failure_flag() {
        let err = decode(
            Stage::Review,
            200,
            r#"{"success": false, "error": "Stage 1 not completed"}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), "application");
        assert_eq!(err.to_string(), "Stage 1 not completed");

        let err = decode(Stage::Review, 200, r#"{"success": false}"#).unwrap_err();
        assert_eq!(err.to_string(), "Unknown error");
    }

    #[test]
    fn test_missing_success_flag_is_an_application_failure() {
        let err = decode(Stage::Opinions, 200, r#"{"error": "Ollama is not running"}"#).unwrap_err();
        assert_eq!(err.kind(), "application");
        assert_eq!(err.to_string(), "Ollama is not running");

        let err = decode(Stage::Opinions, 200, r#"{"data": []}"#).unwrap_err();
        assert_eq!(err.kind(), "application");
        assert_eq!(err.to_string(), "Unknown error");
    }

    #[test]
    fn test_malformed_bodies() {
        let cases = [
            "<html>oops</html>",
            "[]",
            r#"{"success": true}"#,
            r#"{"success": true, "data": {"author": "A", "content": "x"}}"#,
            r#"{"success": true, "data": [{"author": "", "content": "x"}]}"#,
            r#"{"success": true, "stage": 2, "data": []}"#,
        ];
        for body in cases {
            let err = decode(Stage::Opinions, 200, body).unwrap_err();
            assert_eq!(err.kind(), "malformed_response", "body: {}", body);
        }
    }

    #[test]
    fn test_request_body_shape() {
        let json = serde_json::to_string(&StageRequest { query: "What is 2+2?" }).unwrap();
        assert_eq!(json, r#"{"query":"What is 2+2?"}"#);
    }
}
