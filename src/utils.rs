use std::{path::Path, path::PathBuf, sync::LazyLock};

use regex::Regex;

static PLAYLIST_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"/playlist/([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})(?:[/?#]|$)",
    )
    .expect("playlist id regex compiles")
});

const FORBIDDEN_FILE_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Pulls the UUID-shaped playlist id out of a `/playlist/<id>` URL.
pub fn extract_playlist_id(input: &str) -> Option<String> {
    PLAYLIST_ID_RE
        .captures(input.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Strips characters that are not allowed in file names and trims whitespace.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| !FORBIDDEN_FILE_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// `<root>/<name>/<name>.json`, with `fallback` used when the sanitized
/// playlist name ends up empty or is only dots (`.`, `..`), so the file
/// always lands below `root`.
pub fn export_path(root: &Path, playlist_name: &str, fallback: &str) -> PathBuf {
    let mut name = sanitize_file_name(playlist_name);
    if name.chars().all(|c| c == '.') {
        name = sanitize_file_name(fallback);
    }

    let mut path = root.to_path_buf();
    path.push(&name);
    path.push(format!("{name}.json"));
    path
}

/// Waiting time for a 429 response: `retry_after / divisor`.
pub fn scaled_retry_after(
    retry_after: std::time::Duration,
    divisor: u32,
) -> std::time::Duration {
    retry_after / divisor.max(1)
}
