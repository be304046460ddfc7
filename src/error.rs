use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the host side of the clock: fonts, window and surface.
///
/// Face geometry itself cannot fail.
#[derive(Debug, Error)]
pub enum ClockError {
    /// No font at the explicit path or any fallback location.
    #[error("no usable font found (searched {searched:?})")]
    FontNotFound { searched: Vec<PathBuf> },
    /// File was readable but is not a font rusttype understands.
    #[error("failed to parse font {}", .0.display())]
    FontParse(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("pixel surface error: {0}")]
    Pixels(#[from] pixels::Error),
    #[error("pixel buffer resize failed: {0}")]
    Texture(#[from] pixels::TextureError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_resize_failures_become_texture_errors() {
        let err = ClockError::from(pixels::TextureError::TextureWidth(0));
        assert!(matches!(err, ClockError::Texture(_)));
        assert!(err.to_string().starts_with("pixel buffer resize failed"));
    }

    #[test]
    fn font_not_found_lists_searched_paths() {
        let err = ClockError::FontNotFound {
            searched: vec![PathBuf::from("/nowhere/font.ttf")],
        };
        assert!(err.to_string().contains("/nowhere/font.ttf"));
    }
}
