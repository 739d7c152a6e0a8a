//! Presence colour palette.

use rand::seq::IndexedRandom;

/// Fixed palette participants are coloured from.
pub const PALETTE: [&str; 12] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8", "#F7DC6F", "#BB8FCE", "#85C1E2", "#F8B500", "#FF69B4",
    "#32CD32", "#FF4500",
];

/// Draw a colour uniformly at random from [`PALETTE`].
#[must_use]
pub fn random_color() -> &'static str {
    PALETTE.choose(&mut rand::rng()).copied().unwrap_or(PALETTE[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_entries_are_hex_rgb() {
        for color in PALETTE {
            assert_eq!(color.len(), 7, "{color}");
            assert!(color.starts_with('#'));
            assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()), "{color}");
        }
    }

    #[test]
    fn random_color_stays_in_palette() {
        for _ in 0..64 {
            assert!(PALETTE.contains(&random_color()));
        }
    }
}
