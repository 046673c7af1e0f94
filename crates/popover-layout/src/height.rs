//! Popup height resolution from measured row heights

use smallvec::SmallVec;
use thiserror::Error;

/// Measured row heights, index-aligned with the popup's candidate values.
pub type RowHeights = SmallVec<[f32; 8]>;

/// Cap on the rendered popup height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeightSpec {
    /// Exactly this many pixels, whatever the rows add up to.
    ByPixels(f32),
    /// This many rows. A fractional count shows part of the last visible row,
    /// so `2.5` is two full rows plus half of the third.
    ByRows(f32),
}

/// Rejected height configuration.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum InvalidHeightSpec {
    #[error("both a pixel height cap and a row count cap were given")]
    Conflicting,
    #[error("neither a pixel height cap nor a row count cap was given")]
    Missing,
    #[error("pixel height cap must be positive and finite, got {0}")]
    NonPositivePixels(f32),
    #[error("row count cap must be positive and finite, got {0}")]
    NonPositiveRows(f32),
}

impl HeightSpec {
    pub fn by_pixels(pixels: f32) -> Result<Self, InvalidHeightSpec> {
        let spec = Self::ByPixels(pixels);
        spec.validate()?;
        Ok(spec)
    }

    pub fn by_rows(rows: f32) -> Result<Self, InvalidHeightSpec> {
        let spec = Self::ByRows(rows);
        spec.validate()?;
        Ok(spec)
    }

    /// Builds a spec from the two optional caps a configuration surface exposes.
    /// Exactly one of them must be present.
    pub fn from_caps(
        max_height: Option<f32>,
        max_rows: Option<f32>,
    ) -> Result<Self, InvalidHeightSpec> {
        match (max_height, max_rows) {
            (Some(_), Some(_)) => Err(InvalidHeightSpec::Conflicting),
            (None, None) => Err(InvalidHeightSpec::Missing),
            (Some(pixels), None) => Self::by_pixels(pixels),
            (None, Some(rows)) => Self::by_rows(rows),
        }
    }

    pub fn validate(&self) -> Result<(), InvalidHeightSpec> {
        match *self {
            Self::ByPixels(pixels) if !is_positive(pixels) => {
                Err(InvalidHeightSpec::NonPositivePixels(pixels))
            }
            Self::ByRows(rows) if !is_positive(rows) => Err(InvalidHeightSpec::NonPositiveRows(rows)),
            _ => Ok(()),
        }
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Resolved popup height plus the row heights to render with.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightResolution {
    pub height: f32,
    /// Same length as the input. Only the last visible row may differ from it,
    /// scaled down by the fractional part of a row cap.
    pub row_heights: RowHeights,
}

/// Resolves how tall a popup over `row_heights` renders under `spec`.
///
/// An empty row set resolves to zero height; callers must not open a popup for it.
pub fn resolve_height(
    row_heights: &[f32],
    spec: HeightSpec,
) -> Result<HeightResolution, InvalidHeightSpec> {
    spec.validate()?;

    let mut effective: RowHeights = row_heights.iter().copied().collect();
    if effective.is_empty() {
        return Ok(HeightResolution {
            height: 0.0,
            row_heights: effective,
        });
    }

    let height = match spec {
        HeightSpec::ByPixels(pixels) => pixels,
        HeightSpec::ByRows(count) => {
            // Saturates for huge counts, which then clamp to the row count.
            let requested = count.ceil() as usize;
            let visible = requested.min(effective.len());
            let fraction = count.fract();
            // A cap past the last row shows everything; nothing gets scaled.
            if fraction > 0.0 && requested <= effective.len() {
                effective[visible - 1] *= fraction;
            }
            let capped: f32 = effective[..visible].iter().sum();
            let natural: f32 = row_heights.iter().sum();
            natural.min(capped)
        }
    };

    Ok(HeightResolution {
        height,
        row_heights: effective,
    })
}

#[cfg(test)]
#[path = "tests/height_tests.rs"]
mod tests;
