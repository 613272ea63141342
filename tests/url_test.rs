use playlist_export::{config::ApiSettings, tidal::url::normalize};

fn settings() -> ApiSettings {
    ApiSettings::default()
}

fn norm(raw: &str) -> String {
    normalize(raw, &settings()).expect("normalizable").to_string()
}

#[test]
fn test_relative_paths_get_version_and_defaults() {
    assert_eq!(
        norm("/playlists/abc/relationships/items"),
        "https://openapi.tidal.com/v2/playlists/abc/relationships/items?countryCode=US&include=items"
    );
    assert_eq!(
        norm("playlists/abc"),
        "https://openapi.tidal.com/v2/playlists/abc?countryCode=US&include=items"
    );
}

#[test]
fn test_version_prefix_is_not_duplicated() {
    assert_eq!(
        norm("/v2/tracks/1"),
        "https://openapi.tidal.com/v2/tracks/1?countryCode=US&include=items"
    );
}

#[test]
fn test_foreign_authority_is_coerced() {
    let inputs = [
        "http://evil.example.com/v2/tracks/1?countryCode=SE",
        "https://evil.example.com:8443/tracks/1?countryCode=SE",
        "ftp://user:pw@evil.example.com/tracks/1?countryCode=SE#frag",
        "//evil.example.com/tracks/1?countryCode=SE",
    ];

    for raw in inputs {
        let url = normalize(raw, &settings()).expect("normalizable");
        assert_eq!(url.scheme(), "https", "{raw}");
        assert_eq!(url.host_str(), Some("openapi.tidal.com"), "{raw}");
        assert_eq!(url.port(), None, "{raw}");
        assert_eq!(url.username(), "", "{raw}");
        assert_eq!(url.fragment(), None, "{raw}");
        assert_eq!(
            url.as_str(),
            "https://openapi.tidal.com/v2/tracks/1?countryCode=SE&include=items",
            "{raw}"
        );
    }
}

#[test]
fn test_explicit_params_win() {
    assert_eq!(
        norm("/tracks/1?include=artists,albums"),
        "https://openapi.tidal.com/v2/tracks/1?include=artists,albums&countryCode=US"
    );
    assert_eq!(
        norm("/tracks/1?countryCode=DE&include=albums"),
        "https://openapi.tidal.com/v2/tracks/1?countryCode=DE&include=albums"
    );
}

#[test]
fn test_other_query_params_survive() {
    let url = normalize(
        "/v2/playlists/abc/relationships/items?page[cursor]=xyz",
        &settings(),
    )
    .unwrap();

    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(pairs.contains(&("page[cursor]".to_string(), "xyz".to_string())));
    assert!(pairs.contains(&("countryCode".to_string(), "US".to_string())));
    assert!(pairs.contains(&("include".to_string(), "items".to_string())));
}

#[test]
fn test_query_only_link_lands_on_the_version_root() {
    let url = normalize("?page[cursor]=abc", &settings()).unwrap();

    assert_eq!(url.host_str(), Some("openapi.tidal.com"));
    assert_eq!(url.path(), "/v2/");
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("page[cursor]".to_string(), "abc".to_string()),
            ("countryCode".to_string(), "US".to_string()),
            ("include".to_string(), "items".to_string()),
        ]
    );
}

#[test]
fn test_normalization_is_idempotent() {
    let inputs = [
        "/playlists/abc",
        "tracks/1?include=artists",
        "https://evil.example.com/v2/tracks/1?countryCode=SE",
        "/v2/playlists/abc/relationships/items?page[cursor]=xyz",
        "",
    ];

    for raw in inputs {
        let once = norm(raw);
        assert_eq!(norm(&once), once, "{raw}");
    }
}

#[test]
fn test_configured_country_code_is_used() {
    let settings = ApiSettings {
        country_code: "NO".to_string(),
        ..ApiSettings::default()
    };

    let url = normalize("/tracks/1", &settings).unwrap();
    assert_eq!(
        url.as_str(),
        "https://openapi.tidal.com/v2/tracks/1?countryCode=NO&include=items"
    );
}

#[test]
fn test_unparseable_input_yields_none() {
    assert!(normalize("http://[not-an-ip/tracks", &settings()).is_none());
    assert!(normalize("https://exa mple.com/tracks", &settings()).is_none());
}
