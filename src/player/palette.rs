use rand::Rng;

/// Colour used when a result belongs to a player who no longer exists
pub const GREY: u32 = 0xFF888888;

/// Player colours, ARGB, in the order they are offered.
pub const PALETTE: [u32; 15] = [
    0xFFE91E63, // Pink
    0xFF9C27B0, // Purple
    0xFF3F51B5, // Indigo
    0xFF2196F3, // Blue
    0xFF00BCD4, // Cyan
    0xFF009688, // Teal
    0xFF4CAF50, // Green
    0xFF8BC34A, // Light Green
    0xFFCDDC39, // Lime
    0xFFFFEB3B, // Yellow
    0xFFFFC107, // Amber
    0xFFFF9800, // Orange
    0xFFFF5722, // Deep Orange
    0xFF795548, // Brown
    0xFF607D8B, // Blue Grey
];

/// Position in the palette, owned by whoever hands out colours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorCursor(usize);

impl ColorCursor {
    pub fn new() -> Self {
        Self(0)
    }

    /// Returns the colour under the cursor and the cursor for the following call.
    pub fn next_color(self) -> (u32, ColorCursor) {
        let color = PALETTE[self.0 % PALETTE.len()];
        (color, ColorCursor((self.0 + 1) % PALETTE.len()))
    }
}

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    PALETTE[rng.random_range(0..PALETTE.len())]
}

/// Index of `color` in the palette, used to preselect a player's colour.
pub fn palette_position(color: u32) -> Option<usize> {
    PALETTE.iter().position(|c| *c == color)
}
