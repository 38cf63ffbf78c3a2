use std::path::PathBuf;

use crate::timeline::TimingConfig;

pub const DEFAULT_DISPLAY_SECONDS: f64 = 15.0; // seconds each wallpaper is fully visible
pub const DEFAULT_FADE_SECONDS: f64 = 2.0; // seconds reserved for the transition
pub const DEFAULT_OVERLAY_OPACITY: f64 = 0.6;
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// One generation run's settings, built from CLI flags in `main`. Everything
/// the old per-skin scripts kept as module-level constants lives here so the
/// partitioner and the stylesheet renderer stay free of global state.
#[derive(Debug, Clone)]
pub struct Config {
    pub wallpaper_dir: PathBuf,
    pub output: PathBuf,
    /// CDN prefix for image URLs; `None` emits paths relative to the stylesheet.
    pub base_url: Option<String>,
    pub display_seconds: f64,
    pub fade_seconds: f64,
    pub overlay_opacity: f64,
    pub exclude_files: Vec<String>,
}

impl Config {
    pub fn timing(&self) -> TimingConfig {
        TimingConfig::DisplayFade {
            display_seconds: self.display_seconds,
            fade_seconds: self.fade_seconds,
        }
    }
}
