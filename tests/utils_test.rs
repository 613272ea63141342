use std::{path::PathBuf, time::Duration};

use playlist_export::utils::*;

const ID: &str = "0a1b2c3d-4e5f-6789-abcd-ef0123456789";

#[test]
fn test_extract_playlist_id_from_valid_urls() {
    let urls = [
        format!("https://tidal.com/browse/playlist/{ID}"),
        format!("https://tidal.com/playlist/{ID}"),
        format!("https://listen.tidal.com/playlist/{ID}/"),
        format!("https://tidal.com/browse/playlist/{ID}?u"),
        format!("  https://tidal.com/browse/playlist/{ID}#top  "),
        format!("/playlist/{ID}"),
    ];

    for url in urls {
        assert_eq!(extract_playlist_id(&url).as_deref(), Some(ID), "{url}");
    }
}

#[test]
fn test_extract_playlist_id_rejects_everything_else() {
    let inputs = [
        String::new(),
        "not a url".to_string(),
        format!("https://tidal.com/browse/album/{ID}"),
        // one character short
        format!("https://tidal.com/browse/playlist/{}", &ID[1..]),
        // one character too many
        format!("https://tidal.com/browse/playlist/{ID}0"),
        format!("https://tidal.com/browse/playlist/{}", ID.replace('a', "_")),
        format!("https://tidal.com/browse/playlists/{ID}"),
        // right length, wrong shape
        format!("https://tidal.com/browse/playlist/{}", "-".repeat(36)),
        format!("https://tidal.com/browse/playlist/{}", ID.replace('a', "g")),
        format!("https://tidal.com/browse/playlist/{}", ID.replace('-', "0")),
    ];

    for input in inputs {
        assert_eq!(extract_playlist_id(&input), None, "{input}");
    }
}

#[test]
fn test_sanitize_file_name() {
    assert_eq!(sanitize_file_name("My Mix"), "My Mix");
    assert_eq!(sanitize_file_name(r#"a<b>c:d"e/f\g|h?i*j"#), "abcdefghij");
    assert_eq!(sanitize_file_name("  Road Trip: 2024?  "), "Road Trip 2024");
    assert_eq!(sanitize_file_name("??**"), "");
}

#[test]
fn test_export_path() {
    let root = PathBuf::from("/home/me/Music/Playlist");

    assert_eq!(
        export_path(&root, "Chill: Vibes", ID),
        root.join("Chill Vibes").join("Chill Vibes.json")
    );

    // falls back to the id when nothing of the name survives
    assert_eq!(
        export_path(&root, " /?* ", ID),
        root.join(ID).join(format!("{ID}.json"))
    );

    // dot-only names would step outside the root
    for name in ["..", " . ", "...", "./.."] {
        let path = export_path(&root, name, ID);
        assert_eq!(path, root.join(ID).join(format!("{ID}.json")), "{name:?}");
        assert!(path.starts_with(&root));
    }
}

#[test]
fn test_scaled_retry_after() {
    assert_eq!(
        scaled_retry_after(Duration::from_secs(3), 3),
        Duration::from_millis(1000)
    );
    assert_eq!(
        scaled_retry_after(Duration::from_secs(5), 3),
        Duration::from_secs(5) / 3
    );
    assert_eq!(
        scaled_retry_after(Duration::from_secs(2), 0),
        Duration::from_secs(2)
    );
}
