use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION},
};

use crate::{
    config::AuthSettings,
    error::ApiError,
    types::{Credentials, Token, TokenResponse},
};

/// Exchanges client credentials for a bearer token.
///
/// Sends `grant_type=client_credentials` to the token endpoint with an HTTP
/// Basic header built from `client_id:client_secret`. There is no fallback:
/// any non-success status or a body without `access_token` is an error, and
/// callers treat it as fatal.
///
/// # Example
///
/// ```
/// let token = request_token(&client, &settings, &credentials).await?;
/// println!("Token valid for {} seconds", token.expires_in);
/// ```
pub async fn request_token(
    client: &Client,
    settings: &AuthSettings,
    credentials: &Credentials,
) -> Result<Token, ApiError> {
    let basic = STANDARD.encode(format!(
        "{}:{}",
        credentials.client_id, credentials.client_secret
    ));

    let res = client
        .post(settings.token_url.clone())
        .header(AUTHORIZATION, format!("Basic {basic}"))
        .header(ACCEPT, "application/json")
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(ApiError::TokenExchange { status, body });
    }

    let body = res.text().await?;
    let token: TokenResponse = serde_json::from_str(&body).map_err(|_| ApiError::TokenExchange {
        status,
        body: "response did not contain an access_token".to_string(),
    })?;

    Ok(token.into())
}
