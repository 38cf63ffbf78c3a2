use thiserror::Error;

/// Number of decimal places kept in emitted percentages. Two decimals is
/// enough for CSS and keeps the generated text stable across runs.
const ROUNDING_UNIT: f64 = 0.01;

#[derive(Debug, Error, PartialEq)]
pub enum InvalidTimingError {
    #[error("display duration must be strictly positive (got {0}s)")]
    NonPositiveDisplay(f64),
    #[error("fade allowance must not be negative (got {0})")]
    NegativeFade(f64),
    #[error("fade width {fade_percent:.2}% leaves no visible display time in a {segment_percent:.2}% segment")]
    FadeConsumesSegment {
        fade_percent: f64,
        segment_percent: f64,
    },
    #[error("display ratio must be within (0, 1] (got {0})")]
    RatioOutOfRange(f64),
}

/// One timing strategy per invocation. The strategies are mutually exclusive
/// ways of deciding how much of each per-image segment is "fully visible"
/// versus reserved for the transition into the next image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimingConfig {
    /// Each image is shown for `display_seconds`, then fades for
    /// `fade_seconds`. Fade width is a fixed fraction of each segment, so its
    /// absolute percentage shrinks as the image count grows.
    DisplayFade {
        display_seconds: f64,
        fade_seconds: f64,
    },
    /// Fade occupies a fixed `fade_percent` of the whole cycle per segment,
    /// regardless of how many images there are.
    FixedFadePercent {
        segment_seconds: f64,
        fade_percent: f64,
    },
    /// Display consumes a fixed `display_ratio` fraction of each segment.
    DisplayRatio {
        segment_seconds: f64,
        display_ratio: f64,
    },
}

impl TimingConfig {
    fn validate(&self) -> Result<(), InvalidTimingError> {
        match *self {
            TimingConfig::DisplayFade {
                display_seconds,
                fade_seconds,
            } => {
                if display_seconds <= 0.0 {
                    return Err(InvalidTimingError::NonPositiveDisplay(display_seconds));
                }
                if fade_seconds < 0.0 {
                    return Err(InvalidTimingError::NegativeFade(fade_seconds));
                }
            }
            TimingConfig::FixedFadePercent {
                segment_seconds,
                fade_percent,
            } => {
                if segment_seconds <= 0.0 {
                    return Err(InvalidTimingError::NonPositiveDisplay(segment_seconds));
                }
                if fade_percent < 0.0 {
                    return Err(InvalidTimingError::NegativeFade(fade_percent));
                }
            }
            TimingConfig::DisplayRatio {
                segment_seconds,
                display_ratio,
            } => {
                if segment_seconds <= 0.0 {
                    return Err(InvalidTimingError::NonPositiveDisplay(segment_seconds));
                }
                if display_ratio <= 0.0 || display_ratio > 1.0 {
                    return Err(InvalidTimingError::RatioOutOfRange(display_ratio));
                }
            }
        }
        Ok(())
    }

    /// Fraction of each segment during which the image is fully visible.
    /// `segment_percent` is needed for the fixed-percent strategy, where the
    /// fraction depends on how many images share the cycle.
    fn display_fraction(&self, segment_percent: f64) -> f64 {
        match *self {
            TimingConfig::DisplayFade {
                display_seconds,
                fade_seconds,
            } => display_seconds / (display_seconds + fade_seconds),
            TimingConfig::FixedFadePercent { fade_percent, .. } => {
                (segment_percent - fade_percent) / segment_percent
            }
            TimingConfig::DisplayRatio { display_ratio, .. } => display_ratio,
        }
    }

    /// Exact total cycle length in seconds, computed without any rounding so
    /// the aggregate never drifts from `n * per_image_seconds`.
    fn cycle_seconds(&self, n: usize) -> f64 {
        let per_image = match *self {
            TimingConfig::DisplayFade {
                display_seconds,
                fade_seconds,
            } => display_seconds + fade_seconds,
            TimingConfig::FixedFadePercent {
                segment_seconds, ..
            } => segment_seconds,
            TimingConfig::DisplayRatio {
                segment_seconds, ..
            } => segment_seconds,
        };
        n as f64 * per_image
    }
}

/// `[start%, end%]` range during which image `item_index` is fully visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeInterval {
    pub start_percent: f64,
    pub end_percent: f64,
    pub item_index: usize,
}

/// Synthetic boundary closing the loop: the animation must return to the
/// first image exactly at cycle end, matching the state at 0%.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopBoundary {
    pub percent: f64,
    pub item_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub intervals: Vec<KeyframeInterval>,
    pub loop_boundary: Option<LoopBoundary>,
    pub total_duration_seconds: f64,
}

impl Timeline {
    /// The "no content" result for an empty directory. Not an error: the
    /// caller is expected to emit a clearly marked fallback artifact.
    pub const EMPTY: Timeline = Timeline {
        intervals: Vec::new(),
        loop_boundary: None,
        total_duration_seconds: 0.0,
    };

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Partitions one repeating animation cycle into `n` non-overlapping keyframe
/// percentage ranges plus a loop-closing boundary at exactly 100%.
///
/// Percentages are rounded to 2 decimals; the display end of each interval is
/// clamped to the next interval's start so rounding can never make adjacent
/// intervals overlap. The returned total duration is exact (unrounded).
pub fn partition(n: usize, timing: &TimingConfig) -> Result<Timeline, InvalidTimingError> {
    if n == 0 {
        return Ok(Timeline::EMPTY);
    }
    timing.validate()?;

    let segment = 100.0 / n as f64;
    let fraction = timing.display_fraction(segment);
    // The fixed-percent strategy can eat the whole segment once n grows large
    // enough; a display window narrower than one rounding unit would collapse
    // to a zero-width interval in the emitted text.
    if segment * fraction < ROUNDING_UNIT {
        return Err(InvalidTimingError::FadeConsumesSegment {
            fade_percent: segment * (1.0 - fraction),
            segment_percent: segment,
        });
    }

    let mut intervals = Vec::with_capacity(n);
    for i in 0..n {
        let start_exact = i as f64 * segment;
        let next_start = round2(start_exact + segment).min(100.0);
        let start = round2(start_exact);
        let end = round2(start_exact + segment * fraction).min(next_start);
        intervals.push(KeyframeInterval {
            start_percent: start,
            end_percent: end,
            item_index: i,
        });
    }

    Ok(Timeline {
        intervals,
        loop_boundary: Some(LoopBoundary {
            percent: 100.0,
            item_index: 0,
        }),
        total_duration_seconds: timing.cycle_seconds(n),
    })
}
