use serde::Deserialize;

pub const FONT_SCALE_MIN: u32 = 80;
pub const FONT_SCALE_MAX: u32 = 140;
pub const FONT_SCALE_STEP: u32 = 5;
pub const FONT_SCALE_DEFAULT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Appearance settings as they arrive in the query string. `font` stays a
/// string so a bad value falls back to the default instead of failing the
/// whole request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewParams {
    pub theme: Option<String>,
    pub font: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontChoice {
    pub value: u32,
    pub selected: bool,
}

/// Per-request appearance state. Travels with every link instead of living
/// in the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionView {
    pub theme: Theme,
    pub font_scale: u32,
}

impl Default for SessionView {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            font_scale: FONT_SCALE_DEFAULT,
        }
    }
}

impl SessionView {
    pub fn from_params(params: &ViewParams) -> Self {
        let theme = match params.theme.as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        };
        let font_scale = params
            .font
            .as_deref()
            .and_then(parse_font_scale)
            .unwrap_or(FONT_SCALE_DEFAULT);
        Self { theme, font_scale }
    }

    /// Query string carrying this state, without the leading `?`.
    pub fn query(&self) -> String {
        format!("theme={}&font={}", self.theme.as_str(), self.font_scale)
    }

    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    pub fn font_choices(&self) -> Vec<FontChoice> {
        (FONT_SCALE_MIN..=FONT_SCALE_MAX)
            .step_by(FONT_SCALE_STEP as usize)
            .map(|value| FontChoice {
                value,
                selected: value == self.font_scale,
            })
            .collect()
    }
}

/// Any finite number is accepted and snapped; anything else is `None`.
fn parse_font_scale(raw: &str) -> Option<u32> {
    let value: f64 = raw.trim().parse().ok().filter(|v: &f64| v.is_finite())?;
    let clamped = value.clamp(FONT_SCALE_MIN as f64, FONT_SCALE_MAX as f64);
    Some(snap_font_scale(clamped.round() as u32))
}

/// Clamps to 80..=140 and rounds to the nearest step of 5.
pub fn snap_font_scale(value: u32) -> u32 {
    let clamped = value.clamp(FONT_SCALE_MIN, FONT_SCALE_MAX);
    let offset = clamped - FONT_SCALE_MIN;
    let steps = (offset + FONT_SCALE_STEP / 2) / FONT_SCALE_STEP;
    (FONT_SCALE_MIN + steps * FONT_SCALE_STEP).min(FONT_SCALE_MAX)
}
