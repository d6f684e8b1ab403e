use palette::Srgba;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

impl ThemeChoice {
    pub fn palette(self) -> Theme {
        match self {
            ThemeChoice::Dark => dark(),
            ThemeChoice::Light => light(),
        }
    }
}

/// Chart palette. Gain/loss coloring runs through `bullish`/`bearish`;
/// `accent` marks the live-price overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Srgba,
    pub text: Srgba,
    pub muted_text: Srgba,
    pub grid: Srgba,
    pub bullish: Srgba,
    pub bearish: Srgba,
    pub accent: Srgba,
    pub volume: Srgba,
}

fn rgb8(r: u8, g: u8, b: u8) -> Srgba {
    Srgba::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        1.0,
    )
}

pub fn dark() -> Theme {
    Theme {
        background: rgb8(18, 18, 24),
        text: rgb8(220, 220, 220),
        muted_text: rgb8(130, 138, 156),
        grid: rgb8(36, 38, 48),
        bullish: rgb8(50, 205, 50),
        bearish: rgb8(220, 80, 60),
        accent: rgb8(100, 149, 237),
        volume: scale_alpha(rgb8(156, 163, 175), 0.4),
    }
}

pub fn light() -> Theme {
    Theme {
        background: rgb8(255, 255, 255),
        text: rgb8(40, 40, 40),
        muted_text: rgb8(100, 116, 139),
        grid: rgb8(241, 245, 249),
        bullish: rgb8(34, 197, 94),
        bearish: rgb8(239, 68, 68),
        accent: rgb8(99, 102, 241),
        volume: scale_alpha(rgb8(156, 163, 175), 0.4),
    }
}

pub fn scale_alpha(color: Srgba, factor: f32) -> Srgba {
    Srgba {
        alpha: color.alpha * factor,
        ..color
    }
}

/// Relative luminance below mid-gray counts as dark.
pub fn is_dark(color: Srgba) -> bool {
    let luminance = 0.2126 * color.red + 0.7152 * color.green + 0.0722 * color.blue;
    luminance < 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_maps_to_palette() {
        assert_eq!(ThemeChoice::Dark.palette(), dark());
        assert_eq!(ThemeChoice::Light.palette(), light());
    }

    #[test]
    fn dark_and_light_disagree_on_background() {
        assert!(is_dark(dark().background));
        assert!(!is_dark(light().background));
    }

    #[test]
    fn alpha_scaling_leaves_rgb_alone() {
        let base = rgb8(100, 149, 237);
        let faded = scale_alpha(base, 0.3);
        assert_eq!(faded.red, base.red);
        assert_eq!(faded.alpha, 0.3);
    }
}
