use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod config;
mod scanner;
mod stylesheet;
mod timeline;

use crate::config::{
    Config, DEFAULT_DISPLAY_SECONDS, DEFAULT_EXCLUDED_FILES, DEFAULT_FADE_SECONDS,
    DEFAULT_OVERLAY_OPACITY,
};

/// Scans a directory of wallpaper images and writes a CSS background
/// slideshow for a media-server skin. Intended to run as a build step.
#[derive(Parser)]
#[command(name = "slideshow-css", version, about)]
struct Cli {
    /// Directory containing the wallpaper images
    wallpaper_dir: PathBuf,

    /// Path of the generated stylesheet
    #[arg(short, long, default_value = "wallpaper.css")]
    output: PathBuf,

    /// CDN prefix for image URLs; omit to emit relative paths
    #[arg(long)]
    base_url: Option<String>,

    /// Seconds each wallpaper stays fully visible
    #[arg(long, default_value_t = DEFAULT_DISPLAY_SECONDS)]
    display_seconds: f64,

    /// Seconds reserved for the transition into the next wallpaper
    #[arg(long, default_value_t = DEFAULT_FADE_SECONDS)]
    fade_seconds: f64,

    /// Opacity of the darkening overlay layered over every wallpaper
    #[arg(long, default_value_t = DEFAULT_OVERLAY_OPACITY)]
    overlay_opacity: f64,

    /// Extra basenames to skip, on top of the usual OS metadata files
    #[arg(long = "exclude", value_name = "BASENAME")]
    exclude_files: Vec<String>,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut exclude_files: Vec<String> = DEFAULT_EXCLUDED_FILES
            .iter()
            .map(|s| s.to_string())
            .collect();
        exclude_files.extend(self.exclude_files);
        Config {
            wallpaper_dir: self.wallpaper_dir,
            output: self.output,
            base_url: self.base_url,
            display_seconds: self.display_seconds,
            fade_seconds: self.fade_seconds,
            overlay_opacity: self.overlay_opacity,
            exclude_files,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let config = Cli::parse().into_config();

    let files = scanner::scan_image_files(&config.wallpaper_dir, &config.exclude_files)?;
    if files.is_empty() {
        log::warn!(
            "no wallpaper images in {}, writing fallback stylesheet",
            config.wallpaper_dir.display()
        );
    } else {
        log::info!(
            "found {} wallpaper files in {}",
            files.len(),
            config.wallpaper_dir.display()
        );
    }

    let timeline = timeline::partition(files.len(), &config.timing())
        .context("invalid timing configuration")?;
    let css = stylesheet::render(&timeline, &files, &config);

    if let Some(parent) = config.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }
    fs::write(&config.output, css)
        .with_context(|| format!("failed to write {}", config.output.display()))?;

    log::info!(
        "wrote {} ({}s animation cycle)",
        config.output.display(),
        timeline.total_duration_seconds
    );
    Ok(())
}
