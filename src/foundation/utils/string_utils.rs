/// Checks whether `name` ends with `suffix`, ignoring case.
///
/// This is a plain trailing-substring comparison: the last N characters of
/// `name` (N being the character length of `suffix`) are lowercased and
/// compared with the lowercased suffix. It knows nothing about extensions, so
/// `"mp3"` matches `"remix-mp3"` as well as `"track.mp3"`. An empty suffix
/// matches nothing, and a name shorter than the suffix never matches.
///
/// # Examples
///
/// ```
/// use artistore::foundation::utils::matches_suffix;
///
/// assert!(matches_suffix("Windowlicker.MP3", ".mp3"));
/// assert!(!matches_suffix("Windowlicker.flac", ".mp3"));
/// ```
pub fn matches_suffix(name: &str, suffix: &str) -> bool {
    let suffix_len = suffix.chars().count();
    if suffix_len == 0 {
        return false;
    }

    let name_len = name.chars().count();
    if name_len < suffix_len {
        return false;
    }

    let tail: String = name.chars().skip(name_len - suffix_len).collect();
    tail.to_lowercase() == suffix.to_lowercase()
}
