use reqwest::Method;

use super::{
    client::ApiClient,
    types::{
        AdminPasswordReset, ApiError, Employee, LoginRequest, LoginResponse,
        RegisterEmployeeRequest, UserProfile,
    },
};

impl ApiClient {
    /// `POST /api/auth/login`. Persisting the returned token is the caller's job.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let builder = self.request(Method::POST, "/api/auth/login").await.json(request);
        self.send_json(builder).await
    }

    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        let builder = self.request(Method::GET, "/api/auth/me").await;
        self.send_json(builder).await
    }

    pub async fn register_employee(&self, request: &RegisterEmployeeRequest) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "/api/auth/register")
            .await
            .json(request);
        self.send_empty(builder).await
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        let builder = self.request(Method::GET, "/api/auth/empleados").await;
        self.send_json(builder).await
    }

    pub async fn delete_employee(&self, id: i64) -> Result<(), ApiError> {
        let builder = self
            .request(Method::DELETE, &format!("/api/auth/empleados/{}", id))
            .await;
        self.send_empty(builder).await
    }

    pub async fn reset_password_by_admin(&self, id: i64, new_password: &str) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "/api/auth/reset-by-admin")
            .await
            .json(&AdminPasswordReset {
                id,
                new_password: new_password.to_string(),
            });
        self.send_empty(builder).await
    }
}
