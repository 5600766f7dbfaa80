//! JSON-RPC message types for the MCP stdio transport

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use unitconv_core::{Severity, UnitconvError};

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, Deserialize)]
pub struct McpRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

impl McpResponse {
    pub fn new(id: Option<JsonValue>, outcome: Result<JsonValue, McpError>) -> Self {
        match outcome {
            Ok(result) => McpResponse {
                jsonrpc: "2.0".to_string(),
                id,
                result: Some(result),
                error: None,
            },
            Err(error) => McpResponse {
                jsonrpc: "2.0".to_string(),
                id,
                result: None,
                error: Some(error),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl McpError {
    pub fn parse_error(details: impl std::fmt::Display) -> Self {
        McpError {
            code: PARSE_ERROR,
            message: format!("Parse error: {}", details),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        McpError {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {}", method),
            data: None,
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        McpError {
            code: INVALID_PARAMS,
            message: message.into(),
            data: None,
        }
    }
}

impl From<UnitconvError> for McpError {
    fn from(err: UnitconvError) -> Self {
        let code = match err.severity {
            Severity::Fatal => INTERNAL_ERROR,
            Severity::Error => INVALID_PARAMS,
        };
        McpError {
            code,
            message: err.message.clone(),
            data: serde_json::to_value(&err).ok(),
        }
    }
}
