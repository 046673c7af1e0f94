//! Popup configuration surface

use popover_layout::{BiasAlignment, HeightSpec, InvalidHeightSpec};
use thiserror::Error;

/// Which input mechanism requests open/close for a popup. One per instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TriggerMode {
    /// Tapping the anchor toggles the popup.
    #[default]
    Tap,
    /// The anchor gaining input focus opens the popup; closing clears focus.
    Focus,
    /// Only explicit calls from the embedding code.
    External,
}

impl TriggerMode {
    pub fn supports_focus(self) -> bool {
        matches!(self, TriggerMode::Focus)
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Height(#[from] InvalidHeightSpec),
    #[error("alignment biases must lie within [-1, 1], got ({horizontal}, {vertical})")]
    AlignmentOutOfRange { horizontal: f32, vertical: f32 },
    #[error("margin must be finite and non-negative, got {0}")]
    InvalidMargin(f32),
}

/// Unvalidated popup settings. Call [`PopupSpec::build`] to check them.
#[derive(Clone, Debug, PartialEq)]
pub struct PopupSpec {
    pub alignment: BiasAlignment,
    pub max_height: Option<f32>,
    pub max_rows: Option<f32>,
    pub invert_on_overflow: bool,
    pub margin: f32,
    pub barrier_dismissible: bool,
    pub trigger: TriggerMode,
}

impl PopupSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignment(mut self, alignment: BiasAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Caps the popup at a fixed pixel height. Mutually exclusive with [`Self::max_rows`].
    pub fn max_height(mut self, pixels: f32) -> Self {
        self.max_height = Some(pixels);
        self
    }

    /// Caps the popup at a number of rows, fractional counts allowed.
    pub fn max_rows(mut self, rows: f32) -> Self {
        self.max_rows = Some(rows);
        self
    }

    pub fn invert_on_overflow(mut self, invert: bool) -> Self {
        self.invert_on_overflow = invert;
        self
    }

    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn barrier_dismissible(mut self, dismissible: bool) -> Self {
        self.barrier_dismissible = dismissible;
        self
    }

    pub fn trigger(mut self, trigger: TriggerMode) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn build(&self) -> Result<PopupConfig, ConfigError> {
        let height = HeightSpec::from_caps(self.max_height, self.max_rows)?;
        if !self.alignment.is_in_range() {
            return Err(ConfigError::AlignmentOutOfRange {
                horizontal: self.alignment.horizontal_bias,
                vertical: self.alignment.vertical_bias,
            });
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(ConfigError::InvalidMargin(self.margin));
        }
        Ok(PopupConfig {
            alignment: self.alignment,
            height,
            invert_on_overflow: self.invert_on_overflow,
            margin: self.margin,
            barrier_dismissible: self.barrier_dismissible,
            trigger: self.trigger,
        })
    }
}

impl Default for PopupSpec {
    fn default() -> Self {
        Self {
            alignment: BiasAlignment::BOTTOM_CENTER,
            max_height: None,
            max_rows: None,
            invert_on_overflow: true,
            margin: 0.0,
            barrier_dismissible: true,
            trigger: TriggerMode::Tap,
        }
    }
}

/// Validated popup settings, read-only once built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopupConfig {
    alignment: BiasAlignment,
    height: HeightSpec,
    invert_on_overflow: bool,
    margin: f32,
    barrier_dismissible: bool,
    trigger: TriggerMode,
}

impl PopupConfig {
    pub fn alignment(&self) -> BiasAlignment {
        self.alignment
    }

    pub fn height(&self) -> HeightSpec {
        self.height
    }

    pub fn invert_on_overflow(&self) -> bool {
        self.invert_on_overflow
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn barrier_dismissible(&self) -> bool {
        self.barrier_dismissible
    }

    pub fn trigger(&self) -> TriggerMode {
        self.trigger
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
