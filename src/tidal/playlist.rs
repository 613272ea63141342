use crate::{
    error::ApiError,
    management::TokenManager,
    types::{Document, PrimaryData, TrackItemRef},
};

use super::client::TidalClient;

/// Looks up the display name of a playlist.
///
/// A missing playlist is an error here: without it there is nothing to
/// export. A playlist without a name falls back to `Playlist <id>`.
pub async fn get_playlist_name(
    client: &TidalClient,
    token_mgr: &mut TokenManager,
    playlist_id: &str,
) -> Result<String, ApiError> {
    let raw = format!("/playlists/{playlist_id}");
    let url = client.url(&raw).ok_or(ApiError::InvalidLink(raw))?;

    client.throttle().await;
    let token = token_mgr.get_valid_token().await?;
    let document: Document = client
        .get(&url, &token)
        .await?
        .ok_or_else(|| ApiError::PlaylistNotFound(playlist_id.to_string()))?;

    let name = match &document.data {
        Some(PrimaryData::One(resource)) => resource.attr_str("name").map(str::to_string),
        _ => None,
    };

    Ok(name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("Playlist {playlist_id}")))
}

/// Walks the playlist's item relationship and collects every reference.
///
/// Follows `links.next` page by page, pausing for the courtesy delay before
/// each request. The walk ends on a 404 or when no usable next link is
/// left. Any other failure aborts the whole walk; partial listings are
/// never returned.
///
/// `on_page` is called with the running total after each page.
pub async fn get_item_refs(
    client: &TidalClient,
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    mut on_page: impl FnMut(usize),
) -> Result<Vec<TrackItemRef>, ApiError> {
    let raw = format!("/playlists/{playlist_id}/relationships/items");
    let mut next = Some(client.url(&raw).ok_or(ApiError::InvalidLink(raw))?);
    let mut refs: Vec<TrackItemRef> = Vec::new();

    while let Some(url) = next.take() {
        client.throttle().await;
        let token = token_mgr.get_valid_token().await?;

        let page: Document = match client.get(&url, &token).await? {
            Some(page) => page,
            None => break,
        };

        match &page.data {
            Some(PrimaryData::Many(items)) => refs.extend(items.iter().map(TrackItemRef::from)),
            Some(PrimaryData::One(item)) => refs.push(TrackItemRef::from(item)),
            None => {}
        }
        on_page(refs.len());

        next = page
            .links
            .and_then(|links| links.next)
            .and_then(|link| client.url(&link));
    }

    Ok(refs)
}
