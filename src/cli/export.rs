use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    Res,
    config::{self, ApiSettings, AuthSettings, ExportSettings},
    error, info,
    management::{ExportWriter, TokenManager},
    success,
    tidal::{self, TidalClient, tracks::TrackProgress},
    types::{EnrichedTrack, FailedTrackRow, TrackStatus},
    utils, warning,
};

/// Command line overrides for one export run.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub url: Option<String>,
    pub country_code: Option<String>,
    pub delay_ms: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub checkpoint_every: Option<usize>,
}

pub async fn export(opts: ExportOptions) {
    let credentials = match config::credentials() {
        Ok(c) => c,
        Err(e) => error!("Missing credentials: {}", e),
    };

    let (api_settings, auth_settings, export_settings) = match settings(&opts) {
        Ok(s) => s,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    let playlist_id = match opts.url.as_deref() {
        Some(url) => match utils::extract_playlist_id(url) {
            Some(id) => id,
            None => error!("Not a playlist URL: {}", url),
        },
        None => match prompt_playlist_id() {
            Ok(Some(id)) => id,
            Ok(None) => error!("No playlist URL given."),
            Err(e) => error!("Cannot read playlist URL: {}", e),
        },
    };

    if let Err(e) = run(
        credentials,
        api_settings,
        auth_settings,
        export_settings,
        &playlist_id,
    )
    .await
    {
        error!("Export failed: {}", e);
    }
}

fn settings(opts: &ExportOptions) -> Res<(ApiSettings, AuthSettings, ExportSettings)> {
    let mut api = ApiSettings::from_env()?;
    if let Some(cc) = &opts.country_code {
        api.country_code = cc.clone();
    }
    if let Some(ms) = opts.delay_ms {
        api.request_delay = Duration::from_millis(ms);
    }

    let mut export = ExportSettings::default();
    if let Some(dir) = &opts.output_dir {
        export.output_root = dir.clone();
    }
    if let Some(n) = opts.checkpoint_every {
        export.checkpoint_every = n;
    }

    Ok((api, AuthSettings::from_env()?, export))
}

/// Asks for a playlist URL until a valid one is entered.
///
/// Returns `Ok(None)` on empty input or end of input.
fn prompt_playlist_id() -> io::Result<Option<String>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("Playlist URL: ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(None),
        };
        let input = line.trim();
        if input.is_empty() {
            return Ok(None);
        }

        match utils::extract_playlist_id(input) {
            Some(id) => return Ok(Some(id)),
            None => warning!("Invalid playlist URL, expected .../playlist/<36 character id>"),
        }
    }
}

async fn run(
    credentials: crate::types::Credentials,
    api_settings: ApiSettings,
    auth_settings: AuthSettings,
    export_settings: ExportSettings,
    playlist_id: &str,
) -> Res<()> {
    let client = TidalClient::new(api_settings);

    info!("Requesting access token...");
    let mut token_mgr =
        TokenManager::obtain(client.http().clone(), auth_settings, credentials).await?;
    success!("Authenticated.");

    let playlist_name =
        tidal::playlist::get_playlist_name(&client, &mut token_mgr, playlist_id).await?;
    info!("Playlist: {}", playlist_name);

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching playlist items...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")?.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let refs = tidal::playlist::get_item_refs(&client, &mut token_mgr, playlist_id, |count| {
        pb.set_message(format!("Fetching playlist items... ({count} so far)"))
    })
    .await;
    pb.finish_and_clear();
    let refs = refs?;
    success!("Found {} items.", refs.len());

    let path = utils::export_path(&export_settings.output_root, &playlist_name, playlist_id);
    let mut writer = ExportWriter::new(
        path,
        playlist_name.clone(),
        export_settings.checkpoint_every,
    );

    let pb = ProgressBar::new(refs.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let tracks = tidal::tracks::enrich_tracks(
        &client,
        &mut token_mgr,
        &refs,
        &mut writer,
        |progress| report_track(&pb, progress),
    )
    .await;
    pb.finish_and_clear();
    let tracks = tracks?;

    summarize(&tracks);
    success!(
        "Exported {} tracks to {}",
        tracks.len(),
        writer.path().display()
    );
    Ok(())
}

fn report_track(pb: &ProgressBar, progress: TrackProgress<'_>) {
    let track = progress.track;
    match (track.status, progress.error) {
        (Some(TrackStatus::Error), Some(e)) => pb.suspend(|| {
            warning!("[{}/{}] {}: {}", progress.processed, progress.total, track.id, e)
        }),
        (Some(TrackStatus::Unavailable), _) => pb.suspend(|| {
            warning!(
                "[{}/{}] {} is unavailable",
                progress.processed,
                progress.total,
                track.id
            )
        }),
        _ => pb.set_message(format!("{} - {}", track.artists.join(", "), track.title)),
    }
    pb.inc(1);
}

fn summarize(tracks: &[EnrichedTrack]) {
    let rows: Vec<FailedTrackRow> = tracks
        .iter()
        .filter_map(|t| {
            t.status.map(|status| FailedTrackRow {
                order: t.order,
                id: t.id.clone(),
                status: match status {
                    TrackStatus::Unavailable => "unavailable".to_string(),
                    TrackStatus::Error => "error".to_string(),
                },
            })
        })
        .collect();

    if rows.is_empty() {
        return;
    }

    warning!(
        "{} of {} tracks could not be resolved:",
        rows.len(),
        tracks.len()
    );
    println!("{}", Table::new(rows));
}
