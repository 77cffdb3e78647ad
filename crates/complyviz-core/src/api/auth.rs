use reqwest::Method;

use super::client::ApiClient;
use super::models::{LoginRequest, LoginResponse, User};
use crate::{Error, Result};

impl ApiClient {
    /// Log in and persist the returned session token
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(Error::Other("Email and password are required".to_string()));
        }

        let url = self.endpoint("auth/login")?;
        let request = LoginRequest { email, password };
        let response: LoginResponse = self.send_json(Method::POST, url, Some(&request)).await?;

        self.credentials().set_token(&response.token, Some(&response.user.email))?;
        tracing::info!(email = %response.user.email, "Logged in");
        Ok(response.user)
    }

    /// End the session; local credentials are cleared even if the server
    /// already considers the token invalid
    pub async fn logout(&self) -> Result<()> {
        let url = self.endpoint("auth/logout")?;
        let result = self.send_empty(Method::POST, url).await;

        self.credentials().clear()?;
        self.clear_csrf();

        match result {
            Ok(()) | Err(Error::Forbidden) => {
                tracing::info!("Logged out");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Current user for the stored session
    pub async fn me(&self) -> Result<User> {
        let url = self.endpoint("auth/me")?;
        self.get_json(url).await
    }
}
