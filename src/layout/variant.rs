/// Width below which a card is small.
pub const SMALL_WIDTH: f64 = 120.0;
/// Height below which a card is small.
pub const SMALL_HEIGHT: f64 = 80.0;
/// Width below which a card is medium.
pub const MEDIUM_WIDTH: f64 = 200.0;
/// Height below which a card is medium.
pub const MEDIUM_HEIGHT: f64 = 140.0;

/// How much detail a card of a given size can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeVariant {
    Small,
    Medium,
    Large,
}

/// Classify a rect by its dimensions. A value sitting exactly on a breakpoint
/// belongs to the larger class.
pub fn classify_size(width: f64, height: f64) -> SizeVariant {
    if width < SMALL_WIDTH || height < SMALL_HEIGHT {
        SizeVariant::Small
    } else if width < MEDIUM_WIDTH || height < MEDIUM_HEIGHT {
        SizeVariant::Medium
    } else {
        SizeVariant::Large
    }
}
