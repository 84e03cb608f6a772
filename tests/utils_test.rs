use std::path::{Path, PathBuf};

use autoloader::types::{Release, Track, TrackAlbum, TrackArtist};
use autoloader::utils::*;

// Helper function to create a test track
fn create_test_track(id: i64, title: &str, artist_name: &str) -> Track {
    Track {
        id,
        title: title.to_string(),
        duration: 180.0,
        link: format!("https://www.deezer.com/track/{}", id),
        artist: TrackArtist {
            name: artist_name.to_string(),
        },
        album: TrackAlbum { id: id * 10 },
    }
}

// Helper function to create a test release
fn create_test_release(id: i64) -> Release {
    Release {
        id,
        title: format!("Release {}", id),
        link: format!("https://www.deezer.com/album/{}", id),
    }
}

#[test]
fn test_sanitize_filename() {
    assert_eq!(sanitize_filename("My Mix! #1 (2024)"), "My Mix 1 2024");
    assert_eq!(sanitize_filename("  chill_vibes-2  "), "chill_vibes-2");
    assert_eq!(sanitize_filename("a/b\\c:d*e?f"), "abcdef");
    assert_eq!(sanitize_filename("Café Déjà Vu"), "Café Déjà Vu");
    assert_eq!(sanitize_filename("!!!"), "");
}

#[test]
fn test_sanitize_filename_drops_combining_marks() {
    assert_eq!(sanitize_filename("हिन्दी गाने"), "हनद गन");
    assert_eq!(sanitize_filename("Ⅻ ½ ²"), "Ⅻ ½ ²");
    assert_eq!(sanitize_filename("e\u{301}te\u{301}"), "ete");
}

#[test]
fn test_playlist_file_stem_falls_back_to_id() {
    assert_eq!(playlist_file_stem("Road Trip!", 42), "Road Trip");
    assert_eq!(playlist_file_stem("?!", 42), "playlist-42");
}

#[test]
fn test_canonical_tracks_sorted_compact() {
    let tracks = vec![
        create_test_track(1, "Intro", "Alpha"),
        create_test_track(2, "Outro", "Beta"),
    ];

    assert_eq!(
        canonical_tracks(&tracks).unwrap(),
        r#"[{"artist":"Alpha","id":1,"title":"Intro"},{"artist":"Beta","id":2,"title":"Outro"}]"#
    );
}

#[test]
fn test_canonical_tracks_escapes_non_ascii() {
    let tracks = vec![create_test_track(7, "Emoji \u{1F3B5} \"q\"", "A\\B")];

    assert_eq!(
        canonical_tracks(&tracks).unwrap(),
        r#"[{"artist":"A\\B","id":7,"title":"Emoji \ud83c\udfb5 \"q\""}]"#
    );
}

#[test]
fn test_compute_track_hash_known_values() {
    // Digests produced by earlier versions for the same content; existing
    // hash files must keep matching.
    let tracks = vec![
        create_test_track(1, "Intro", "Alpha"),
        create_test_track(2, "Outro", "Beta"),
    ];
    assert_eq!(
        compute_track_hash(&tracks).unwrap(),
        "639921a84e69cf74b7acfdd23593958fd06548eecccc17a31cad190320264f52"
    );

    let accented = vec![create_test_track(3135556, "Café Déjà Vu", "Sigur Rós")];
    assert_eq!(
        compute_track_hash(&accented).unwrap(),
        "0b94b3fd2c11d2b2f2d5889e87b5b3d398352c5d89f6b4f4209403c6c32c936d"
    );

    let astral = vec![create_test_track(7, "Emoji \u{1F3B5} \"q\"", "A\\B")];
    assert_eq!(
        compute_track_hash(&astral).unwrap(),
        "bfd6cae08893e172d4759a7da197947890cb0a30f68d4f411a50f3c39226d68d"
    );

    assert_eq!(
        compute_track_hash(&[]).unwrap(),
        "4f53cda18c2baa0c0354bb5f9a3ecbe5ed12ab4d8e11ba873c2f11161202b945"
    );
}

#[test]
fn test_compute_track_hash_negative_ids() {
    let tracks = vec![
        create_test_track(-1829472, "Home Demo", "Me"),
        create_test_track(5, "Intro", "Alpha"),
    ];

    assert_eq!(
        canonical_tracks(&tracks).unwrap(),
        r#"[{"artist":"Me","id":-1829472,"title":"Home Demo"},{"artist":"Alpha","id":5,"title":"Intro"}]"#
    );
    assert_eq!(
        compute_track_hash(&tracks).unwrap(),
        "4844cd8e1a77bff0eb4b32dde41b46cf4f4aaabbe6ce93bbc1087f3807965beb"
    );
}

#[test]
fn test_playlist_file_stem_negative_id() {
    assert_eq!(playlist_file_stem("...", -3), "playlist--3");
}

#[test]
fn test_compute_track_hash_is_deterministic() {
    let tracks = vec![
        create_test_track(1, "One", "Artist"),
        create_test_track(2, "Two", "Artist"),
    ];

    let hash = compute_track_hash(&tracks).unwrap();
    assert_eq!(hash, compute_track_hash(&tracks.clone()).unwrap());
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn test_compute_track_hash_ignores_duration_link_and_album() {
    let tracks = vec![create_test_track(1, "One", "Artist")];
    let mut changed = tracks.clone();
    changed[0].duration = 999.5;
    changed[0].link = "https://example.com/elsewhere".to_string();
    changed[0].album.id = 12345;

    assert_eq!(
        compute_track_hash(&tracks).unwrap(),
        compute_track_hash(&changed).unwrap()
    );
}

#[test]
fn test_compute_track_hash_tracks_relevant_fields() {
    let tracks = vec![create_test_track(1, "One", "Artist")];
    let base = compute_track_hash(&tracks).unwrap();

    let mut other_id = tracks.clone();
    other_id[0].id = 2;
    assert_ne!(base, compute_track_hash(&other_id).unwrap());

    let mut other_title = tracks.clone();
    other_title[0].title = "One (Remastered)".to_string();
    assert_ne!(base, compute_track_hash(&other_title).unwrap());

    let mut other_artist = tracks.clone();
    other_artist[0].artist.name = "Someone Else".to_string();
    assert_ne!(base, compute_track_hash(&other_artist).unwrap());
}

#[test]
fn test_compute_track_hash_order_matters() {
    let a = create_test_track(1, "One", "Artist");
    let b = create_test_track(2, "Two", "Artist");

    assert_ne!(
        compute_track_hash(&[a.clone(), b.clone()]).unwrap(),
        compute_track_hash(&[b, a]).unwrap()
    );
}

#[test]
fn test_find_new_releases() {
    let known = vec![create_test_release(1), create_test_release(2)];
    let current = vec![
        create_test_release(1),
        create_test_release(2),
        create_test_release(3),
    ];

    let new_releases = find_new_releases(&current, &known);
    assert_eq!(new_releases, vec![create_test_release(3)]);
}

#[test]
fn test_find_new_releases_first_run() {
    let current = vec![create_test_release(5)];
    assert_eq!(find_new_releases(&current, &[]), current);
}

#[test]
fn test_find_new_releases_matches_by_id_only() {
    let known = vec![create_test_release(1)];
    let mut renamed = create_test_release(1);
    renamed.title = "Release 1 (Deluxe)".to_string();
    renamed.link = "https://www.deezer.com/album/1?ref=x".to_string();

    assert!(find_new_releases(&[renamed], &known).is_empty());
}

#[test]
fn test_find_new_releases_keeps_current_order() {
    let current = vec![
        create_test_release(9),
        create_test_release(1),
        create_test_release(4),
    ];
    let known = vec![create_test_release(1)];

    let ids: Vec<i64> = find_new_releases(&current, &known)
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![9, 4]);
}

#[test]
fn test_relative_path_sibling_tree() {
    assert_eq!(
        relative_path(
            Path::new("/music/Artist/Album/01 - Intro.flac"),
            Path::new("/music/playlists")
        ),
        PathBuf::from("../Artist/Album/01 - Intro.flac")
    );
}

#[test]
fn test_relative_path_inside_base() {
    assert_eq!(
        relative_path(Path::new("/music/playlists/a.mp3"), Path::new("/music/playlists")),
        PathBuf::from("a.mp3")
    );
}

#[test]
fn test_relative_path_disjoint_roots() {
    assert_eq!(
        relative_path(Path::new("/data/x.flac"), Path::new("/music/playlists")),
        PathBuf::from("../../data/x.flac")
    );
}

#[test]
fn test_relative_path_relative_inputs() {
    assert_eq!(
        relative_path(Path::new("music/A/b.flac"), Path::new("./music/playlists")),
        PathBuf::from("../A/b.flac")
    );
}
