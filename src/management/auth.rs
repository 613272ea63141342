use chrono::Utc;
use reqwest::Client;

use crate::{
    config::AuthSettings,
    error::ApiError,
    tidal::auth::request_token,
    types::{Credentials, Token},
};

/// Seconds before expiry at which a token is considered stale.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Owns the bearer token for one run and re-issues it when it runs out.
pub struct TokenManager {
    http: Client,
    settings: AuthSettings,
    credentials: Credentials,
    token: Token,
}

impl TokenManager {
    /// Performs the initial client-credentials exchange.
    pub async fn obtain(
        http: Client,
        settings: AuthSettings,
        credentials: Credentials,
    ) -> Result<Self, ApiError> {
        let token = request_token(&http, &settings, &credentials).await?;
        Ok(Self {
            http,
            settings,
            credentials,
            token,
        })
    }

    pub async fn get_valid_token(&mut self) -> Result<String, ApiError> {
        if self.is_expired() {
            self.token = request_token(&self.http, &self.settings, &self.credentials).await?;
        }

        Ok(self.token.access_token.clone())
    }

    /// Short-lived tokens get at most half their lifetime as margin.
    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        let margin = EXPIRY_MARGIN_SECS.min(self.token.expires_in / 2);
        now + margin >= self.token.obtained_at + self.token.expires_in
    }
}
