use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, Result};

/// HTTP verbs the client issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single call against the API, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A successful (2xx) response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// JSON body, or the raw text wrapped in a JSON string when the body isn't JSON.
    pub data: Value,
}

impl ApiResponse {
    pub fn from_body(status: u16, body: &str) -> Self {
        let data = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
        };
        Self { status, data }
    }

    /// Decode the body into a typed value.
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.data)
            .map_err(|e| ClientError::Parse(format!("Failed to deserialize response: {}", e)))
    }

    /// Body as text: strings unwrapped, anything else serialized.
    pub fn text(&self) -> String {
        match &self.data {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// A course enrollment as listed by `GET /enrollments/user/{userId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    #[serde(rename = "enrollmentId")]
    pub enrollment_id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "courseId")]
    pub course_id: i64,
    #[serde(rename = "courseName")]
    pub course_name: Option<String>,
    pub status: String,
}

/// Body for `POST /enrollments/doEnrollment`.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentRequest {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "courseId")]
    pub course_id: i64,
}

/// Body for `PUT /users/updateUser/{userId}/password`.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange<'a> {
    #[serde(rename = "currentPassword")]
    pub current_password: &'a str,
    #[serde(rename = "newPassword")]
    pub new_password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_json_body_is_kept_as_text() {
        let resp = ApiResponse::from_body(201, "Enrollment 5 created");
        assert_eq!(resp.data, json!("Enrollment 5 created"));
        assert_eq!(resp.text(), "Enrollment 5 created");

        let empty = ApiResponse::from_body(204, "");
        assert_eq!(empty.data, Value::Null);
        assert_eq!(empty.text(), "");
    }

    #[test]
    fn enrollment_uses_backend_field_names() {
        let resp = ApiResponse::from_body(
            200,
            r#"[{"enrollmentId":1,"userId":42,"courseId":9,"courseName":"Rust 101","status":"ACTIVE"}]"#,
        );
        let enrollments: Vec<Enrollment> = resp.json().unwrap();

        assert_eq!(enrollments.len(), 1);
        assert_eq!(enrollments[0].user_id, 42);
        assert_eq!(enrollments[0].course_name.as_deref(), Some("Rust 101"));
        assert_eq!(enrollments[0].status, "ACTIVE");
    }

    #[test]
    fn wrong_shape_is_a_parse_error() {
        let resp = ApiResponse::from_body(200, r#"{"unexpected":true}"#);
        let err = resp.json::<Vec<Enrollment>>().unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }

    #[test]
    fn password_change_serializes_camel_case() {
        let body = serde_json::to_value(PasswordChange {
            current_password: "old",
            new_password: "new",
        })
        .unwrap();
        assert_eq!(body, json!({"currentPassword": "old", "newPassword": "new"}));
    }
}
