use url::Url;

use crate::config::ApiSettings;

/// Canonicalizes a catalog link onto the trusted API authority.
///
/// `raw` may be absolute, relative or a bare path fragment such as a
/// `links.next` value from a paginated response. Only its path and query
/// survive: scheme, host and port always come from `settings.api_base`, so
/// a foreign host in a server-supplied link can never redirect requests.
///
/// The path is prefixed with the API version unless it already carries it,
/// and `countryCode` / `include` are appended only when the link does not
/// set them itself.
///
/// A query-only link (`?page[cursor]=abc`) resolves against the base path,
/// so it ends up at the bare version root (`/v2/?page[cursor]=abc&...`).
///
/// Returns `None` when `raw` cannot be resolved as a URL. Pagination treats
/// that as the end of the listing.
pub fn normalize(raw: &str, settings: &ApiSettings) -> Option<Url> {
    let parsed = settings.api_base.join(raw.trim()).ok()?;

    let mut url = settings.api_base.clone();
    url.set_fragment(None);
    url.set_path(&versioned_path(parsed.path(), &settings.api_version));
    url.set_query(parsed.query());

    let has_param = |key: &str| url.query_pairs().any(|(k, _)| k == key);
    let needs_country = !has_param("countryCode");
    let needs_include = !has_param("include") && !settings.default_include.is_empty();

    if needs_country || needs_include {
        let mut pairs = url.query_pairs_mut();
        if needs_country {
            pairs.append_pair("countryCode", &settings.country_code);
        }
        if needs_include {
            pairs.append_pair("include", &settings.default_include);
        }
    }

    Some(url)
}

fn versioned_path(path: &str, version: &str) -> String {
    let version = format!("/{}", version.trim_matches('/'));
    if version == "/" || path == version || path.starts_with(&format!("{version}/")) {
        return path.to_string();
    }

    if path.starts_with('/') {
        format!("{version}{path}")
    } else {
        format!("{version}/{path}")
    }
}
