use once_cell::sync::Lazy;
use regex::Regex;

pub static SLUG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug regex is valid"));

static STRIP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("strip regex is valid"));
static DASH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-\s]+").expect("dash regex is valid"));

/// Suggests a URL slug for a model name, e.g. "Galaxy S24 Ultra" -> "galaxy-s24-ultra".
///
/// Non-ASCII characters are dropped rather than transliterated.
pub fn slugify(value: &str) -> String {
    let ascii: String = value.chars().filter(char::is_ascii).collect();
    let lowered = ascii.to_ascii_lowercase();
    let stripped = STRIP_REGEX.replace_all(&lowered, "");
    let dashed = DASH_REGEX.replace_all(&stripped, "-");
    dashed.trim_matches(|c: char| c == '-' || c == '_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid_slug(value: &str) -> bool {
        SLUG_REGEX.is_match(value)
    }

    #[test]
    fn test_slugify_model_names() {
        assert_eq!(slugify("Galaxy S24 Ultra"), "galaxy-s24-ultra");
        assert_eq!(slugify("iPhone 15 Pro (256GB)"), "iphone-15-pro-256gb");
        assert_eq!(slugify("  Redmi  Note 13 -- 5G "), "redmi-note-13-5g");
        assert_eq!(slugify("Pixel_8a"), "pixel_8a");
    }

    #[test]
    fn test_slugify_trims_separators() {
        assert_eq!(slugify("--Nokia 3310__"), "nokia-3310");
        assert_eq!(slugify("Xperia 1 V!"), "xperia-1-v");
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify("Téléphone X"), "tlphone-x");
        assert_eq!(slugify("گوشی"), "");
    }

    #[test]
    fn test_slugify_output_is_valid() {
        for name in ["Galaxy Z Fold6", "OnePlus 12R", "Moto g54 5G"] {
            assert!(is_valid_slug(&slugify(name)), "{name}");
        }
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("has space"));
        assert!(!is_valid_slug("slash/slug"));
    }
}
