use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::model::PageId;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimingError {
    #[error("`{field}` must be a finite, non-negative number of seconds (got {value})")]
    InvalidSeconds { field: &'static str, value: f64 },
    #[error("speed factor must be finite and greater than zero (got {0})")]
    InvalidFactor(f64),
}

/// How long a fully typed line stays up before the bubble closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PausePolicy {
    Fixed(Duration),
    /// `base + per_char * len`.
    Scaled { base: Duration, per_char: Duration },
}

impl PausePolicy {
    #[must_use]
    pub fn for_chars(&self, chars: usize) -> Duration {
        match *self {
            PausePolicy::Fixed(pause) => pause,
            PausePolicy::Scaled { base, per_char } => {
                base + per_char.saturating_mul(u32::try_from(chars).unwrap_or(u32::MAX))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NarratorTiming {
    pub per_char: Duration,
    /// Upper bound on the typing phase, however long the line.
    pub max_typing: Duration,
    pub pause: PausePolicy,
    pub enter: Duration,
    pub exit: Duration,
}

impl NarratorTiming {
    #[must_use]
    pub fn typing_for(&self, chars: usize) -> Duration {
        let chars = u32::try_from(chars).unwrap_or(u32::MAX);
        self.per_char.saturating_mul(chars).min(self.max_typing)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewTiming {
    pub fade_out: Duration,
    pub fade_in: Duration,
    /// Gap between the view settling and its intro scene starting.
    pub intro_delay: Duration,
}

/// All timing knobs of one page. The three pages differ only here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageTiming {
    pub narrator: NarratorTiming,
    pub view: ViewTiming,
    /// Multiplier applied to every scripted animation hold.
    pub animation_scale: f64,
}

impl PageTiming {
    #[must_use]
    pub fn for_page(page: PageId) -> Self {
        match page {
            PageId::MlExplainer => Self {
                narrator: NarratorTiming {
                    per_char: Duration::from_millis(40),
                    max_typing: Duration::from_secs(3),
                    pause: PausePolicy::Fixed(Duration::from_secs(2)),
                    enter: Duration::from_millis(400),
                    exit: Duration::from_millis(300),
                },
                view: ViewTiming {
                    fade_out: Duration::from_millis(500),
                    fade_in: Duration::from_millis(500),
                    intro_delay: Duration::ZERO,
                },
                animation_scale: 1.0,
            },
            PageId::PromptFramework => Self {
                narrator: NarratorTiming {
                    per_char: Duration::from_millis(40),
                    max_typing: Duration::from_secs(3),
                    pause: PausePolicy::Scaled {
                        base: Duration::from_millis(1500),
                        per_char: Duration::from_millis(25),
                    },
                    enter: Duration::from_millis(400),
                    exit: Duration::from_millis(300),
                },
                view: ViewTiming {
                    fade_out: Duration::from_millis(500),
                    fade_in: Duration::from_millis(600),
                    intro_delay: Duration::ZERO,
                },
                animation_scale: 1.0,
            },
            PageId::TokenExplainer => Self {
                narrator: NarratorTiming {
                    per_char: Duration::from_millis(50),
                    max_typing: Duration::from_secs(4),
                    pause: PausePolicy::Fixed(Duration::from_millis(2500)),
                    enter: Duration::from_millis(500),
                    exit: Duration::from_millis(400),
                },
                view: ViewTiming {
                    fade_out: Duration::from_millis(800),
                    fade_in: Duration::from_millis(800),
                    intro_delay: Duration::from_millis(800),
                },
                animation_scale: 1.0,
            },
        }
    }

    /// Speeds up (`factor < 1`) or slows down every duration at once.
    ///
    /// # Errors
    ///
    /// Returns `TimingError::InvalidFactor` unless `factor` is finite and positive.
    pub fn scaled(self, factor: f64) -> Result<Self, TimingError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(TimingError::InvalidFactor(factor));
        }
        let s = |d: Duration| scale_by(d, factor).ok_or(TimingError::InvalidFactor(factor));
        let pause = match self.narrator.pause {
            PausePolicy::Fixed(pause) => PausePolicy::Fixed(s(pause)?),
            PausePolicy::Scaled { base, per_char } => PausePolicy::Scaled {
                base: s(base)?,
                per_char: s(per_char)?,
            },
        };
        let animation_scale = self.animation_scale * factor;
        if !is_usable_scale(animation_scale) {
            return Err(TimingError::InvalidFactor(factor));
        }
        Ok(Self {
            narrator: NarratorTiming {
                per_char: s(self.narrator.per_char)?,
                max_typing: s(self.narrator.max_typing)?,
                pause,
                enter: s(self.narrator.enter)?,
                exit: s(self.narrator.exit)?,
            },
            view: ViewTiming {
                fade_out: s(self.view.fade_out)?,
                fade_in: s(self.view.fade_in)?,
                intro_delay: s(self.view.intro_delay)?,
            },
            animation_scale,
        })
    }

    /// Layers user overrides on top of the page defaults.
    ///
    /// # Errors
    ///
    /// Returns `TimingError` for negative or non-finite values.
    pub fn with_overrides(mut self, overrides: &TimingOverrides) -> Result<Self, TimingError> {
        if let Some(narrator) = &overrides.narrator {
            let n = &mut self.narrator;
            set_secs(&mut n.per_char, narrator.per_char_secs, "narrator.per_char_secs")?;
            set_secs(&mut n.max_typing, narrator.max_typing_secs, "narrator.max_typing_secs")?;
            set_secs(&mut n.enter, narrator.enter_secs, "narrator.enter_secs")?;
            set_secs(&mut n.exit, narrator.exit_secs, "narrator.exit_secs")?;

            let mut base = match n.pause {
                PausePolicy::Fixed(pause) => pause,
                PausePolicy::Scaled { base, .. } => base,
            };
            set_secs(&mut base, narrator.pause_secs, "narrator.pause_secs")?;
            let mut per_char = match n.pause {
                PausePolicy::Fixed(_) => Duration::ZERO,
                PausePolicy::Scaled { per_char, .. } => per_char,
            };
            set_secs(
                &mut per_char,
                narrator.pause_per_char_secs,
                "narrator.pause_per_char_secs",
            )?;
            n.pause = if per_char.is_zero() {
                PausePolicy::Fixed(base)
            } else {
                PausePolicy::Scaled { base, per_char }
            };
        }
        if let Some(view) = &overrides.view {
            let v = &mut self.view;
            set_secs(&mut v.fade_out, view.fade_out_secs, "view.fade_out_secs")?;
            set_secs(&mut v.fade_in, view.fade_in_secs, "view.fade_in_secs")?;
            set_secs(&mut v.intro_delay, view.intro_delay_secs, "view.intro_delay_secs")?;
        }
        if let Some(scale) = overrides.animation_scale {
            if !is_usable_scale(scale) {
                return Err(TimingError::InvalidSeconds {
                    field: "animation_scale",
                    value: scale,
                });
            }
            self.animation_scale = scale;
        }
        Ok(self)
    }

    /// A scripted hold stretched by `animation_scale`; saturates instead of
    /// overflowing.
    #[must_use]
    pub fn scale_hold(&self, hold: Duration) -> Duration {
        scale_by(hold, self.animation_scale).unwrap_or(Duration::MAX)
    }
}

fn scale_by(d: Duration, factor: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(d.as_secs_f64() * factor).ok()
}

/// Finite, non-negative and able to stretch a one-second hold.
fn is_usable_scale(scale: f64) -> bool {
    scale.is_finite() && scale >= 0.0 && scale_by(Duration::from_secs(1), scale).is_some()
}

fn set_secs(
    slot: &mut Duration,
    value: Option<f64>,
    field: &'static str,
) -> Result<(), TimingError> {
    if let Some(value) = value {
        *slot = Duration::try_from_secs_f64(value)
            .map_err(|_| TimingError::InvalidSeconds { field, value })?;
    }
    Ok(())
}

/// Partial timing read from a config file. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingOverrides {
    pub narrator: Option<NarratorTimingOverrides>,
    pub view: Option<ViewTimingOverrides>,
    pub animation_scale: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NarratorTimingOverrides {
    pub per_char_secs: Option<f64>,
    pub max_typing_secs: Option<f64>,
    pub pause_secs: Option<f64>,
    pub pause_per_char_secs: Option<f64>,
    pub enter_secs: Option<f64>,
    pub exit_secs: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewTimingOverrides {
    pub fade_out_secs: Option<f64>,
    pub fade_in_secs: Option<f64>,
    pub intro_delay_secs: Option<f64>,
}
