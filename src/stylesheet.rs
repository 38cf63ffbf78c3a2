use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::timeline::Timeline;

/// Selector group the skin applies the slideshow to. `!important` everywhere
/// because this is pasted into the media server's custom-CSS box, where it
/// has to win against the skin's own rules.
const CONTAINER_SELECTORS: &str = "\
.backgroundContainer,
.layout-desktop .backgroundContainer,
.layout-tv .backgroundContainer,
#loginPage .backgroundContainer";

/// Builds the image URL for a stylesheet rule. Spaces are the only character
/// the wallpaper collections actually contain that breaks a CSS `url()`.
pub fn image_url(base_url: Option<&str>, filename: &str) -> String {
    let encoded = filename.replace(' ', "%20");
    match base_url {
        Some(base) if !base.is_empty() => {
            if base.ends_with('/') {
                format!("{base}{encoded}")
            } else {
                format!("{base}/{encoded}")
            }
        }
        _ => encoded,
    }
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Seconds for CSS output, trimmed to 2 decimals so derived durations don't
/// pick up float noise (51 * 0.7 must print as 35.7).
fn seconds(value: f64) -> String {
    format!("{}", (value * 100.0).round() / 100.0)
}

fn background_layers(url: &str, overlay_opacity: f64) -> String {
    format!(
        "linear-gradient(rgba(0, 0, 0, {overlay_opacity}), rgba(0, 0, 0, {overlay_opacity})), url('{url}')"
    )
}

/// Renders the complete stylesheet for a partitioned timeline. An empty
/// timeline produces a clearly marked static fallback instead of keyframes.
pub fn render(timeline: &Timeline, files: &[PathBuf], config: &Config) -> String {
    if timeline.is_empty() {
        return render_fallback();
    }

    let total = seconds(timeline.total_duration_seconds);
    let mut css = String::new();

    let _ = writeln!(css, "/* Wallpaper slideshow, generated by slideshow-css */");
    let _ = writeln!(
        css,
        "/* {} wallpapers, {total}s cycle */",
        timeline.intervals.len()
    );
    let _ = writeln!(css);

    let _ = writeln!(css, "{CONTAINER_SELECTORS} {{");
    let _ = writeln!(css, "    background-color: #000 !important;");
    let _ = writeln!(css, "    background-size: cover !important;");
    let _ = writeln!(css, "    background-repeat: no-repeat !important;");
    let _ = writeln!(css, "    background-attachment: fixed !important;");
    let _ = writeln!(css, "    background-position: center center !important;");
    let _ = writeln!(
        css,
        "    animation: backgroundSlideshow {total}s infinite !important;"
    );
    let _ = writeln!(css, "    animation-timing-function: ease-in-out !important;");
    let _ = writeln!(css, "}}");
    let _ = writeln!(css);

    let _ = writeln!(css, "@keyframes backgroundSlideshow {{");
    for interval in &timeline.intervals {
        let name = basename(&files[interval.item_index]);
        let url = image_url(config.base_url.as_deref(), &name);
        let layers = background_layers(&url, config.overlay_opacity);
        let _ = writeln!(css, "    /* {name} */");
        let _ = writeln!(
            css,
            "    {:.2}%, {:.2}% {{",
            interval.start_percent, interval.end_percent
        );
        let _ = writeln!(css, "        background-image: {layers} !important;");
        let _ = writeln!(css, "    }}");
    }
    if let Some(boundary) = timeline.loop_boundary {
        let first = basename(&files[boundary.item_index]);
        let url = image_url(config.base_url.as_deref(), &first);
        let layers = background_layers(&url, config.overlay_opacity);
        let _ = writeln!(css, "    /* loop back to {first} */");
        let _ = writeln!(css, "    {:.0}% {{", boundary.percent);
        let _ = writeln!(css, "        background-image: {layers} !important;");
        let _ = writeln!(css, "    }}");
    }
    let _ = writeln!(css, "}}");
    let _ = writeln!(css);

    // Keep the skin's own chrome above the animated background.
    let _ = writeln!(css, ".mainDrawer,");
    let _ = writeln!(css, ".mainAnimatedPage,");
    let _ = writeln!(css, ".skinHeader,");
    let _ = writeln!(css, ".cardContent {{");
    let _ = writeln!(css, "    position: relative !important;");
    let _ = writeln!(css, "    z-index: 1 !important;");
    let _ = writeln!(css, "}}");
    let _ = writeln!(css);

    // Fixed attachment is janky on mobile; shorten the cycle there too.
    let _ = writeln!(css, "@media (max-width: 768px) {{");
    let _ = writeln!(css, "    .backgroundContainer {{");
    let _ = writeln!(css, "        background-attachment: scroll !important;");
    let _ = writeln!(
        css,
        "        animation-duration: {}s !important;",
        seconds(timeline.total_duration_seconds * 0.7)
    );
    let _ = writeln!(css, "    }}");
    let _ = writeln!(css, "}}");
    let _ = writeln!(css);

    let _ = writeln!(css, "@media print {{");
    let _ = writeln!(css, "    .backgroundContainer {{");
    let _ = writeln!(css, "        animation: none !important;");
    let _ = writeln!(css, "    }}");
    let _ = writeln!(css, "}}");

    css
}

fn render_fallback() -> String {
    let mut css = String::new();
    let _ = writeln!(css, "/* Wallpaper slideshow, generated by slideshow-css */");
    let _ = writeln!(css, "/* no wallpaper images found, static fallback background */");
    let _ = writeln!(css);
    let _ = writeln!(css, "{CONTAINER_SELECTORS} {{");
    let _ = writeln!(css, "    background-color: #000 !important;");
    let _ = writeln!(css, "    background-size: cover !important;");
    let _ = writeln!(css, "    background-repeat: no-repeat !important;");
    let _ = writeln!(css, "    background-position: center center !important;");
    let _ = writeln!(css, "}}");
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::partition;
    use pretty_assertions::assert_eq;

    fn test_config() -> Config {
        Config {
            wallpaper_dir: PathBuf::from("wallpapers"),
            output: PathBuf::from("wallpaper.css"),
            base_url: Some("https://cdn.example.net/wallpapers".to_string()),
            display_seconds: 3.0,
            fade_seconds: 1.0,
            overlay_opacity: 0.6,
            exclude_files: Vec::new(),
        }
    }

    fn wallpapers(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn url_joining_and_space_encoding() {
        assert_eq!(
            image_url(Some("https://cdn.example.net/wp/"), "a b.png"),
            "https://cdn.example.net/wp/a%20b.png"
        );
        assert_eq!(
            image_url(Some("https://cdn.example.net/wp"), "a.png"),
            "https://cdn.example.net/wp/a.png"
        );
        assert_eq!(image_url(None, "plain file.jpg"), "plain%20file.jpg");
        assert_eq!(image_url(Some(""), "x.png"), "x.png");
    }

    #[test]
    fn keyframes_carry_the_partitioned_percentages() {
        let config = test_config();
        let files = wallpapers(&["a.jpg", "b.jpg", "c.jpg"]);
        let timeline = partition(files.len(), &config.timing()).unwrap();
        let css = render(&timeline, &files, &config);

        assert!(css.contains("    0.00%, 25.00% {"));
        assert!(css.contains("    33.33%, 58.33% {"));
        assert!(css.contains("    66.67%, 91.67% {"));
        assert!(css.contains("url('https://cdn.example.net/wallpapers/b.jpg')"));
    }

    #[test]
    fn animation_binding_uses_the_exact_cycle_duration() {
        let config = test_config();
        let files = wallpapers(&["a.jpg", "b.jpg", "c.jpg"]);
        let timeline = partition(files.len(), &config.timing()).unwrap();
        let css = render(&timeline, &files, &config);

        // 3 * (3 + 1) = 12 seconds, printed without a trailing .0
        assert!(css.contains("animation: backgroundSlideshow 12s infinite !important;"));
        assert!(css.contains("/* 3 wallpapers, 12s cycle */"));
        // mobile variant runs at 70% of the cycle
        assert!(css.contains("animation-duration: 8.4s !important;"));
    }

    #[test]
    fn loop_closure_rule_references_the_first_image() {
        let config = test_config();
        let files = wallpapers(&["first.png", "second.png"]);
        let timeline = partition(files.len(), &config.timing()).unwrap();
        let css = render(&timeline, &files, &config);

        let closing = css
            .split("/* loop back to first.png */")
            .nth(1)
            .expect("loop closure comment missing");
        assert!(closing.trim_start().starts_with("100% {"));
        assert!(closing.contains("first.png"));
    }

    #[test]
    fn overlay_opacity_appears_in_every_image_layer() {
        let config = Config {
            overlay_opacity: 0.45,
            ..test_config()
        };
        let files = wallpapers(&["a.jpg"]);
        let timeline = partition(files.len(), &config.timing()).unwrap();
        let css = render(&timeline, &files, &config);

        // one rule per interval plus the loop closure
        assert_eq!(css.matches("rgba(0, 0, 0, 0.45)").count(), 4);
    }

    #[test]
    fn empty_timeline_renders_the_marked_fallback() {
        let config = test_config();
        let timeline = partition(0, &config.timing()).unwrap();
        let css = render(&timeline, &[], &config);

        assert!(css.contains("no wallpaper images found"));
        assert!(css.contains("background-color: #000 !important;"));
        assert!(!css.contains("@keyframes"));
    }

    #[test]
    fn output_is_deterministic() {
        let config = test_config();
        let files = wallpapers(&["a.jpg", "b.jpg"]);
        let timeline = partition(files.len(), &config.timing()).unwrap();
        assert_eq!(
            render(&timeline, &files, &config),
            render(&timeline, &files, &config)
        );
    }
}
