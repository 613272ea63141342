#![allow(dead_code)]

use std::time::Duration;

use playlist_export::{
    config::{ApiSettings, AuthSettings},
    management::TokenManager,
    tidal::TidalClient,
    types::Credentials,
};
use serde_json::json;
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub const PLAYLIST_ID: &str = "0a1b2c3d-4e5f-6789-abcd-ef0123456789";

pub fn api_settings(server: &MockServer) -> ApiSettings {
    ApiSettings {
        api_base: Url::parse(&server.uri()).unwrap(),
        request_delay: Duration::ZERO,
        ..ApiSettings::default()
    }
}

pub fn auth_settings(server: &MockServer) -> AuthSettings {
    AuthSettings {
        token_url: Url::parse(&format!("{}/v1/oauth2/token", server.uri())).unwrap(),
    }
}

pub fn credentials() -> Credentials {
    Credentials {
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
    }
}

pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "token_type": "Bearer",
            "expires_in": 86400
        })))
        .mount(server)
        .await;
}

/// Mock server with a working token endpoint, plus a client and token
/// manager pointed at it.
pub async fn setup() -> (MockServer, TidalClient, TokenManager) {
    let server = MockServer::start().await;
    mount_token(&server).await;

    let client = TidalClient::new(api_settings(&server));
    let token_mgr = TokenManager::obtain(
        client.http().clone(),
        auth_settings(&server),
        credentials(),
    )
    .await
    .unwrap();

    (server, client, token_mgr)
}

pub fn track_body(id: &str, title: &str, artist: &str, album: &str, isrc: &str) -> serde_json::Value {
    json!({
        "data": {
            "id": id,
            "type": "tracks",
            "attributes": { "title": title, "isrc": isrc },
            "relationships": {
                "artists": { "data": [{ "id": format!("{id}-artist"), "type": "artists" }] },
                "albums": { "data": [{ "id": format!("{id}-album"), "type": "albums" }] }
            }
        },
        "included": [
            { "id": format!("{id}-artist"), "type": "artists", "attributes": { "name": artist } },
            { "id": format!("{id}-album"), "type": "albums", "attributes": { "title": album } }
        ]
    })
}

pub async fn mount_track(server: &MockServer, id: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/tracks/{id}")))
        .respond_with(template)
        .mount(server)
        .await;
}
