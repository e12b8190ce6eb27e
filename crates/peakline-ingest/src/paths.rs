//! Pure key translation between object keys, staging names, and destination keys.

/// Derive the flat staging file name for an object key.
///
/// Every path separator (`/` and `\`) is replaced with `substitute`, so keys
/// containing nested "directories" land in the staging area's flat namespace
/// and cannot escape it via traversal sequences. Distinct keys remain
/// distinct as long as they do not collapse to the same string after
/// substitution (e.g. `a/b` and `a_b` with substitute `_`); callers accept
/// that residual risk.
#[must_use]
pub fn staging_file_name(key: &str, substitute: char) -> String {
    key.chars()
        .map(|c| if c == '/' || c == '\\' { substitute } else { c })
        .collect()
}

/// Derive the destination key for an object's artifact.
///
/// Replaces the first occurrence of `source_token` with `derived_token` and
/// appends `artifact_suffix`. A key that does not contain the token passes
/// through unchanged apart from the suffix; that is a caller-configuration
/// problem, not an error.
#[must_use]
pub fn destination_key(
    key: &str,
    source_token: &str,
    derived_token: &str,
    artifact_suffix: &str,
) -> String {
    let mut derived = key.replacen(source_token, derived_token, 1);
    derived.push_str(artifact_suffix);
    derived
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_name_replaces_every_separator() {
        assert_eq!(
            staging_file_name("uploads/2024/song.mp3", '_'),
            "uploads_2024_song.mp3"
        );
        assert_eq!(
            staging_file_name(r"uploads\song.mp3", '_'),
            "uploads_song.mp3"
        );
        assert_eq!(staging_file_name("../../etc/passwd", '_'), ".._.._etc_passwd");
    }

    #[test]
    fn staging_name_is_pure_and_idempotent_per_input() {
        let key = "uploads/a.mp3";
        assert_eq!(staging_file_name(key, '_'), staging_file_name(key, '_'));
    }

    #[test]
    fn separator_free_keys_stay_distinct() {
        let keys = ["a.mp3", "b.mp3", "a.mp3.bak", "track-1.mp3"];
        for left in keys {
            for right in keys {
                if left != right {
                    assert_ne!(staging_file_name(left, '_'), staging_file_name(right, '_'));
                }
            }
        }
    }

    #[test]
    fn destination_key_replaces_folder_and_appends_suffix() {
        assert_eq!(
            destination_key("uploads/song.mp3", "uploads", "wave", ".dat"),
            "wave/song.mp3.dat"
        );
    }

    #[test]
    fn destination_key_replaces_only_the_first_occurrence() {
        assert_eq!(
            destination_key("uploads/uploads.mp3", "uploads", "wave", ".dat"),
            "wave/uploads.mp3.dat"
        );
    }

    #[test]
    fn destination_key_passes_through_without_token() {
        assert_eq!(
            destination_key("archive/song.mp3", "uploads", "wave", ".dat"),
            "archive/song.mp3.dat"
        );
    }
}
