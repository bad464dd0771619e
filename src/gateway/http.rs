use super::{AuthGateway, GatewayError, MerchantRegistration, TokenResponse, UserRegistration};
use crate::session::Role;
use crate::APP_USER_AGENT;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use tracing::{debug, info_span, Instrument};
use url::Url;

/// HTTP implementation of [`AuthGateway`] against the storefront backend.
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

fn detail_message(json_response: &Value) -> &str {
    json_response
        .get("detail")
        .and_then(Value::as_str)
        .unwrap_or("")
}

/// Normalize `url` and join `path` onto it.
///
/// # Errors
/// Returns an error if `url` cannot be parsed, has no host, or uses an
/// unsupported scheme.
pub fn endpoint_url(url: &str, path: &str) -> Result<String, GatewayError> {
    let url = Url::parse(url).map_err(|e| GatewayError::Endpoint(e.to_string()))?;

    let scheme = url.scheme();

    let host = url
        .host()
        .ok_or_else(|| GatewayError::Endpoint("no host specified".to_string()))?
        .to_owned();

    let port = match url.port() {
        Some(p) => p,
        None => match scheme {
            "http" => 80,
            "https" => 443,
            _ => return Err(GatewayError::Endpoint(format!("unsupported scheme {scheme}"))),
        },
    };

    let endpoint_url = format!("{scheme}://{host}:{port}{path}");

    debug!("endpoint URL: {}", endpoint_url);

    Ok(endpoint_url)
}

fn login_payload(username: &str, password: &SecretString, role: Role) -> Value {
    json!({
        "username": username,
        "password": password.expose_secret(),
        "role": role.as_str(),
    })
}

fn user_registration_payload(registration: &UserRegistration) -> Value {
    json!({
        "username": registration.username,
        "password": registration.password.expose_secret(),
        "email": registration.email,
        "phone": registration.phone,
    })
}

fn merchant_registration_payload(registration: &MerchantRegistration) -> Value {
    json!({
        "name": registration.name,
        "password": registration.password.expose_secret(),
        "contact_person": registration.contact_person,
        "phone": registration.phone,
    })
}

impl HttpGateway {
    /// # Errors
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        // Fail on a bad base URL here rather than on the first request.
        endpoint_url(base_url, "")?;

        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    async fn reject(response: reqwest::Response) -> GatewayError {
        let status = response.status().as_u16();
        let message = match response.json::<Value>().await {
            Ok(body) => {
                let detail = detail_message(&body);
                if detail.is_empty() {
                    "request rejected".to_string()
                } else {
                    detail.to_string()
                }
            }
            Err(_) => "request rejected".to_string(),
        };

        GatewayError::Rejected { status, message }
    }
}

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn login(
        &self,
        username: &str,
        password: &SecretString,
        role: Role,
    ) -> Result<TokenResponse, GatewayError> {
        let login_url = endpoint_url(&self.base_url, "/api/auth/login")?;

        debug!("login URL: {}, role: {}", login_url, role);

        let span = info_span!(
            "auth.login",
            http.method = "POST",
            url = %login_url
        );
        let response = self
            .client
            .post(&login_url)
            .json(&login_payload(username, password, role))
            .send()
            .instrument(span)
            .await?;

        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        Ok(response.json().await?)
    }

    async fn register_user(&self, registration: &UserRegistration) -> Result<(), GatewayError> {
        let register_url = endpoint_url(&self.base_url, "/api/auth/register/user")?;

        let span = info_span!(
            "auth.register_user",
            http.method = "POST",
            url = %register_url
        );
        let response = self
            .client
            .post(&register_url)
            .json(&user_registration_payload(registration))
            .send()
            .instrument(span)
            .await?;

        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        Ok(())
    }

    async fn register_merchant(
        &self,
        registration: &MerchantRegistration,
    ) -> Result<(), GatewayError> {
        let register_url = endpoint_url(&self.base_url, "/api/auth/register/merchant")?;

        let span = info_span!(
            "auth.register_merchant",
            http.method = "POST",
            url = %register_url
        );
        let response = self
            .client
            .post(&register_url)
            .json(&merchant_registration_payload(registration))
            .send()
            .instrument(span)
            .await?;

        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        Ok(())
    }
}
