// ============================================================================
// FONT RESOLUTION
// ============================================================================

use crate::error::ClockError;
use log::{debug, info};
use rusttype::Font;
use std::path::{Path, PathBuf};

/// Common locations of a plain sans face, tried in order when no explicit
/// font is configured.
const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub fn load_font(path: &Path) -> Result<Font<'static>, ClockError> {
    let data = std::fs::read(path)?;
    Font::try_from_vec(data).ok_or_else(|| ClockError::FontParse(path.to_path_buf()))
}

/// Loads the explicit font if one is given, otherwise the first fallback
/// that parses. An explicit path that fails is an error; it never silently
/// falls back.
pub fn resolve_font(explicit: Option<&Path>) -> Result<Font<'static>, ClockError> {
    if let Some(path) = explicit {
        let font = load_font(path)?;
        info!("using font {}", path.display());
        return Ok(font);
    }

    for candidate in FALLBACK_FONTS.iter().map(Path::new) {
        match load_font(candidate) {
            Ok(font) => {
                info!("using font {}", candidate.display());
                return Ok(font);
            }
            Err(err) => debug!("skipping {}: {err}", candidate.display()),
        }
    }

    Err(ClockError::FontNotFound {
        searched: FALLBACK_FONTS.iter().map(PathBuf::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "analog-clock-{}-{name}",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("analog-clock-does-not-exist.ttf");
        assert!(matches!(load_font(&path), Err(ClockError::Io(_))));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let path = scratch_file("garbage.ttf", b"definitely not a font");
        let result = load_font(&path);
        std::fs::remove_file(&path).unwrap();
        match result {
            Err(ClockError::FontParse(reported)) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn explicit_font_does_not_fall_back() {
        let path = std::env::temp_dir().join("analog-clock-also-missing.ttf");
        assert!(resolve_font(Some(&path)).is_err());
    }
}
