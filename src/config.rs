//! Board configuration.

use crate::error::EngineError;
use crate::layout::LayoutMask;
use crate::rng::Palette;

/// Largest accepted board side.
pub const MAX_BOARD_SIDE: usize = 64;

pub const DEFAULT_MAX_INIT_ATTEMPTS: u32 = 1000;

pub const DEFAULT_MAX_CASCADE_PASSES: u32 = 1000;

/// Everything needed to build and run a board.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub layout: LayoutMask,
    pub palette: Palette,
    /// Regenerations allowed before initialisation gives up.
    pub max_init_attempts: u32,
    /// Removal passes allowed in one cascade.
    pub max_cascade_passes: u32,
}

impl BoardConfig {
    /// Open board of the given size with the classic palette.
    ///
    /// Out-of-range sizes get an empty mask; `validate` reports them.
    pub fn new(width: usize, height: usize) -> Self {
        let layout = if side_in_range(width) && side_in_range(height) {
            LayoutMask::open(width, height)
        } else {
            LayoutMask::open(0, 0)
        };
        Self {
            width,
            height,
            layout,
            palette: Palette::classic(),
            max_init_attempts: DEFAULT_MAX_INIT_ATTEMPTS,
            max_cascade_passes: DEFAULT_MAX_CASCADE_PASSES,
        }
    }

    /// Board sized to `layout`.
    pub fn with_layout(layout: LayoutMask) -> Self {
        Self {
            width: layout.width(),
            height: layout.height(),
            layout,
            ..Self::new(0, 0)
        }
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !side_in_range(self.width) || !side_in_range(self.height) {
            return Err(EngineError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.layout.width() != self.width || self.layout.height() != self.height {
            return Err(EngineError::LayoutMismatch {
                layout_width: self.layout.width(),
                layout_height: self.layout.height(),
                width: self.width,
                height: self.height,
            });
        }
        if self.palette.is_empty() {
            return Err(EngineError::EmptyPalette);
        }
        Ok(())
    }
}

fn side_in_range(side: usize) -> bool {
    (1..=MAX_BOARD_SIDE).contains(&side)
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(8, 8)
    }
}
