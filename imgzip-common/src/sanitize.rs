//! Turns free-form alt text into a short file name fragment.

/// Longest fragment [`sanitize_name`] will return, in characters.
pub const MAX_NAME_LEN: usize = 30;

/// Characters that are rejected in file names on at least one common platform.
const ILLEGAL_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

#[inline]
fn is_illegal(c: char) -> bool {
    ILLEGAL_CHARS.contains(&c) || c.is_control()
}

/// Unicode whitespace plus the byte order mark, which `char::is_whitespace` leaves out.
#[inline]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Sanitizes descriptive text into a file name fragment.
///
/// - Replaces path-illegal and control characters with `_`
/// - Replaces each run of whitespace with a single `_`
/// - Collapses consecutive underscores
/// - Truncates to [`MAX_NAME_LEN`] characters
/// - Strips leading and trailing underscores
///
/// Empty input (or input made only of separators) yields an empty string; callers substitute
/// their own default name.
///
/// ```
/// # use imgzip_common::sanitize::sanitize_name;
/// assert_eq!(sanitize_name("Cat Photo"), "Cat_Photo");
/// assert_eq!(sanitize_name("  <what?>  "), "what");
/// ```
pub fn sanitize_name(raw: &str) -> String {
    let mut collapsed = String::with_capacity(raw.len());
    let mut prev_underscore = false;

    for c in raw.chars() {
        let replacement = if is_illegal(c) || is_separator(c) {
            '_'
        } else {
            c
        };

        if replacement == '_' {
            if !prev_underscore {
                collapsed.push('_');
            }
            prev_underscore = true;
        } else {
            collapsed.push(replacement);
            prev_underscore = false;
        }
    }

    let truncated: String = collapsed.chars().take(MAX_NAME_LEN).collect();

    truncated.trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{seq::SliceRandom, thread_rng, Rng};

    const PIECES: [&str; 15] = [
        "a", "Z", "_", "__", " ", "\t\n", "\u{feff}", "<", ">", ":", "\"", "/", "\\", "é", "猫",
    ];

    fn random_text() -> String {
        let mut rng = thread_rng();
        let len = rng.gen_range(0..64);
        (0..len)
            .map(|_| *PIECES.choose(&mut rng).unwrap())
            .collect()
    }

    #[test]
    fn empty_input() {
        assert_eq!(sanitize_name(""), "");
        assert_eq!(sanitize_name("   "), "");
        assert_eq!(sanitize_name("???"), "");
    }

    #[test]
    fn replaces_illegal_chars() {
        assert_eq!(sanitize_name("a<b>c:d\"e/f\\g|h?i*j"), "a_b_c_d_e_f_g_h_i_j");
        assert_eq!(sanitize_name("nul\0byte"), "nul_byte");
    }

    #[test]
    fn collapses_whitespace_and_underscores() {
        assert_eq!(sanitize_name("Cat   Photo"), "Cat_Photo");
        assert_eq!(sanitize_name("snake___case"), "snake_case");
        assert_eq!(sanitize_name("mixed _ \t_ sep"), "mixed_sep");
    }

    #[test]
    fn byte_order_mark_is_a_separator() {
        assert_eq!(sanitize_name("\u{feff}Cat\u{feff}Photo"), "Cat_Photo");
        assert_eq!(sanitize_name("no\u{a0}break"), "no_break");
    }

    #[test]
    fn truncates_before_stripping() {
        let long = "The quick brown fox jumps over the lazy dog";
        assert_eq!(sanitize_name(long), "The_quick_brown_fox_jumps_over");

        // 29 characters then a separator: the trailing underscore is cut away afterwards
        let edge = format!("{} tail", "x".repeat(29));
        assert_eq!(sanitize_name(&edge), "x".repeat(29));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let cats = "猫".repeat(40);
        assert_eq!(sanitize_name(&cats).chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn random_inputs_stay_clean() {
        for _ in 0..500 {
            let raw = random_text();
            let once = sanitize_name(&raw);

            assert_eq!(sanitize_name(&once), once, "not idempotent for {:?}", raw);
            assert!(once.chars().count() <= MAX_NAME_LEN);
            assert!(!once.chars().any(|c| is_illegal(c) || is_separator(c)));
            assert!(!once.starts_with('_') && !once.ends_with('_'));
            assert!(!once.contains("__"));
        }
    }
}
