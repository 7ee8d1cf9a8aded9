use serde_json::Value;
use tracing::info;

use crate::error::{ClientError, Result};
use crate::http::HttpClient;
use crate::types::{ApiResponse, Enrollment, EnrollmentRequest, PasswordChange};

/// Student dashboard operations: enrollments and account management.
#[derive(Clone)]
pub struct DashboardService {
    http: HttpClient,
}

impl DashboardService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Id of the logged-in user. Ids start at 1; anything else means nobody is logged in.
    fn current_user_id(&self) -> Result<i64> {
        self.http
            .session()
            .user()?
            .map(|user| user.user_id)
            .filter(|id| *id > 0)
            .ok_or_else(ClientError::not_logged_in)
    }

    /// Enrollments of the logged-in user. Fails without a network call when
    /// nobody is logged in.
    pub async fn my_courses(&self) -> Result<Vec<Enrollment>> {
        let user_id = self.current_user_id()?;

        let resp = self
            .http
            .get(&format!("/enrollments/user/{}", user_id))
            .await?;
        resp.json()
    }

    /// Enroll the logged-in user in a course. Returns the server's confirmation text.
    pub async fn enroll(&self, course_id: i64) -> Result<String> {
        let user_id = self.current_user_id()?;
        let body = serde_json::to_value(EnrollmentRequest { user_id, course_id })
            .map_err(|e| ClientError::Parse(format!("Failed to serialize request: {}", e)))?;

        let resp = self.http.post("/enrollments/doEnrollment", Some(body)).await?;
        info!(user_id, course_id, "Enrollment created");
        Ok(resp.text())
    }

    /// Change a user's password. A 401 here means the current password was
    /// wrong and leaves the session alone.
    pub async fn change_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<Value> {
        let body = serde_json::to_value(PasswordChange {
            current_password,
            new_password,
        })
        .map_err(|e| ClientError::Parse(format!("Failed to serialize request: {}", e)))?;

        let resp = self
            .http
            .put(&format!("/users/updateUser/{}/password", user_id), Some(body))
            .await?;
        Ok(resp.data)
    }

    /// Delete a user account. Returns the raw response.
    pub async fn delete_account(&self, user_id: i64) -> Result<ApiResponse> {
        self.http
            .delete(&format!("/users/removeUser/{}", user_id))
            .await
    }

    /// Forget the local session.
    pub fn logout(&self) -> Result<()> {
        self.http.session().clear()
    }
}
