use std::collections::HashMap;

use crate::{
    error::{ApiError, ExportError},
    management::{ExportWriter, TokenManager},
    types::{Document, EnrichedTrack, PrimaryData, Resource, TrackItemRef, TrackStatus},
};

use super::client::TidalClient;

pub const ARTIST_TYPE: &str = "artists";
pub const ALBUM_TYPE: &str = "albums";

/// Outcome of enriching one reference, handed to the progress callback.
#[derive(Debug)]
pub struct TrackProgress<'a> {
    pub processed: usize,
    pub total: usize,
    pub track: &'a EnrichedTrack,
    /// Why the track ended up with `status: "error"`.
    pub error: Option<&'a ApiError>,
}

/// Fetches one track with its artists and albums side-loaded.
///
/// Returns `Ok(None)` when the catalog reports the track as absent (404 or
/// a null `data`).
pub async fn get_track(
    client: &TidalClient,
    token_mgr: &mut TokenManager,
    order: usize,
    track_id: &str,
) -> Result<Option<EnrichedTrack>, ApiError> {
    let raw = format!("/tracks/{track_id}?include={ARTIST_TYPE},{ALBUM_TYPE}");
    let url = client.url(&raw).ok_or(ApiError::InvalidLink(raw))?;

    let token = token_mgr.get_valid_token().await?;
    let document: Option<Document> = client.get(&url, &token).await?;

    match document {
        Some(document) => to_enriched_track(order, &document),
        None => Ok(None),
    }
}

/// Builds an [`EnrichedTrack`] from a track detail document.
///
/// Artist names are joined against `included` by `(type, id)`; unknown
/// ones become `"Unknown"`. The album is the first included `albums`
/// entity. A track without a title is treated as a malformed payload.
pub fn to_enriched_track(
    order: usize,
    document: &Document,
) -> Result<Option<EnrichedTrack>, ApiError> {
    let track = match &document.data {
        Some(PrimaryData::One(track)) => track,
        Some(PrimaryData::Many(_)) => {
            return Err(ApiError::MalformedPayload(
                "expected a single track resource".to_string(),
            ));
        }
        None => return Ok(None),
    };

    let title = track
        .attr_str("title")
        .ok_or_else(|| ApiError::MalformedPayload(format!("track {} has no title", track.id)))?;

    let included: HashMap<(&str, &str), &Resource> = document
        .included
        .iter()
        .map(|res| ((res.kind.as_str(), res.id.as_str()), res))
        .collect();

    let artists = track
        .relationships
        .get(ARTIST_TYPE)
        .and_then(|rel| rel.data.as_ref())
        .map(|data| {
            data.identifiers()
                .into_iter()
                .map(|ident| {
                    included
                        .get(&(ident.kind.as_str(), ident.id.as_str()))
                        .and_then(|artist| artist.attr_str("name"))
                        .unwrap_or("Unknown")
                        .to_string()
                })
                .collect::<Vec<String>>()
        })
        .unwrap_or_default();

    let album = document
        .included
        .iter()
        .find(|res| res.kind == ALBUM_TYPE)
        .and_then(|album| album.attr_str("title"))
        .unwrap_or("Unknown Album")
        .to_string();

    Ok(Some(EnrichedTrack {
        order,
        title: title.to_string(),
        artists,
        album,
        id: track.id.clone(),
        isrc: track.attr_str("isrc").unwrap_or("N/A").to_string(),
        status: None,
    }))
}

/// Enriches every reference in order, one request at a time.
///
/// Each reference yields exactly one record with `order = index + 1`:
/// resolved tracks carry no status, absent ones are `unavailable`
/// placeholders and failed lookups are `error` placeholders. A single
/// track never aborts the run; only a failed checkpoint write does.
///
/// The writer is asked to checkpoint after every record.
pub async fn enrich_tracks(
    client: &TidalClient,
    token_mgr: &mut TokenManager,
    refs: &[TrackItemRef],
    writer: &mut ExportWriter,
    mut on_track: impl FnMut(TrackProgress<'_>),
) -> Result<Vec<EnrichedTrack>, ExportError> {
    let total = refs.len();
    let mut tracks: Vec<EnrichedTrack> = Vec::with_capacity(total);

    if total == 0 {
        writer.persist(&tracks).await?;
        return Ok(tracks);
    }

    for (i, item) in refs.iter().enumerate() {
        let order = i + 1;
        client.throttle().await;

        let (track, error) = match get_track(client, token_mgr, order, &item.id).await {
            Ok(Some(track)) => (track, None),
            Ok(None) => (
                EnrichedTrack::placeholder(order, &item.id, TrackStatus::Unavailable),
                None,
            ),
            Err(e) => (
                EnrichedTrack::placeholder(order, &item.id, TrackStatus::Error),
                Some(e),
            ),
        };

        tracks.push(track);
        on_track(TrackProgress {
            processed: order,
            total,
            track: &tracks[i],
            error: error.as_ref(),
        });

        writer.checkpoint(&tracks, total).await?;
    }

    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn document(value: serde_json::Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn resolves_artists_and_album_from_included() {
        let doc = document(json!({
            "data": {
                "id": "t1",
                "type": "tracks",
                "attributes": { "title": "Song A", "isrc": "US123" },
                "relationships": {
                    "artists": { "data": [
                        { "id": "a1", "type": "artists" },
                        { "id": "a2", "type": "artists" }
                    ] }
                }
            },
            "included": [
                { "id": "a1", "type": "artists", "attributes": { "name": "Artist X" } },
                { "id": "al1", "type": "albums", "attributes": { "title": "Album Y" } }
            ]
        }));

        let track = to_enriched_track(3, &doc).unwrap().unwrap();
        assert_eq!(track.order, 3);
        assert_eq!(track.title, "Song A");
        assert_eq!(track.artists, vec!["Artist X", "Unknown"]);
        assert_eq!(track.album, "Album Y");
        assert_eq!(track.isrc, "US123");
        assert_eq!(track.status, None);
    }

    #[test]
    fn missing_album_and_isrc_fall_back() {
        let doc = document(json!({
            "data": { "id": "t1", "type": "tracks", "attributes": { "title": "Song" } }
        }));

        let track = to_enriched_track(1, &doc).unwrap().unwrap();
        assert!(track.artists.is_empty());
        assert_eq!(track.album, "Unknown Album");
        assert_eq!(track.isrc, "N/A");
    }

    #[test]
    fn null_data_is_absent() {
        let doc = document(json!({ "data": null }));
        assert!(to_enriched_track(1, &doc).unwrap().is_none());
    }

    #[test]
    fn missing_title_is_malformed() {
        let doc = document(json!({
            "data": { "id": "t1", "type": "tracks", "attributes": {} }
        }));
        assert!(matches!(
            to_enriched_track(1, &doc),
            Err(ApiError::MalformedPayload(_))
        ));
    }
}
