use std::{
    collections::HashSet,
    io::{self, Write},
    path::{Component, Path, PathBuf},
};

use serde::Serialize;
use sha2::{Digest, Sha256};
use unicode_general_category::{GeneralCategory, get_general_category};

use crate::types::{EntityId, Release, Track};

/// Keeps letters, numbers, spaces, underscores and hyphens, then trims.
///
/// Letters and numbers are those of the Unicode general categories `L*` and
/// `N*`. Combining marks (e.g. Devanagari vowel signs) are dropped, so stems
/// of existing hash and M3U files keep resolving.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| is_letter_or_number(*c) || matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_letter_or_number(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
    )
}

/// File stem used for a playlist's hash file and M3U file.
///
/// Titles made only of punctuation would sanitize to nothing, those fall
/// back to the playlist id.
pub fn playlist_file_stem(title: &str, playlist_id: EntityId) -> String {
    let safe = sanitize_filename(title);
    if safe.is_empty() {
        format!("playlist-{}", playlist_id)
    } else {
        safe
    }
}

/// The fields of a track that take part in change detection.
///
/// Field order is the sorted key order of the canonical form.
#[derive(Serialize)]
struct ReducedTrack<'a> {
    artist: &'a str,
    id: EntityId,
    title: &'a str,
}

/// Compact JSON formatter that escapes everything outside printable ASCII
/// as `\uXXXX`, matching hash files written by earlier versions.
struct AsciiFormatter;

impl serde_json::ser::Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if c.is_ascii() && c != '\x7f' {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Canonical serialization of the reduced track list, in track order.
pub fn canonical_tracks(tracks: &[Track]) -> Result<String, serde_json::Error> {
    let reduced: Vec<ReducedTrack> = tracks
        .iter()
        .map(|t| ReducedTrack {
            artist: &t.artist.name,
            id: t.id,
            title: &t.title,
        })
        .collect();

    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, AsciiFormatter);
    reduced.serialize(&mut ser)?;
    // The formatter only ever emits ASCII.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// SHA-256 hex fingerprint of a playlist's track list.
///
/// Only id, title and artist name participate. Track order matters.
pub fn compute_track_hash(tracks: &[Track]) -> Result<String, serde_json::Error> {
    let canonical = canonical_tracks(tracks)?;
    Ok(format!("{:x}", Sha256::digest(canonical.as_bytes())))
}

/// Releases from `current` whose id is not among `known`, in `current` order.
pub fn find_new_releases(current: &[Release], known: &[Release]) -> Vec<Release> {
    let known_ids: HashSet<EntityId> = known.iter().map(|r| r.id).collect();
    current
        .iter()
        .filter(|r| !known_ids.contains(&r.id))
        .cloned()
        .collect()
}

/// Expresses `target` relative to the directory `base`.
///
/// Both paths are compared component-wise, no filesystem access happens.
/// When they share no common root (e.g. one is absolute, the other is not)
/// `target` is returned unchanged.
pub fn relative_path(target: &Path, base: &Path) -> PathBuf {
    let target_parts: Vec<Component> = target
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let base_parts: Vec<Component> = base
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if target.is_absolute() != base.is_absolute() {
        return target.to_path_buf();
    }

    let common = target_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &target_parts[common..] {
        relative.push(part.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}
