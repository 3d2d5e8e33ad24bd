/// Height returned for empty or zero-width canvases, and the lower clamp.
pub const MIN_HEIGHT: f64 = 600.0;

/// Upper clamp for estimated heights.
pub const MAX_HEIGHT: f64 = 2400.0;

/// Smallest card edge the estimator plans for.
pub const DEFAULT_MIN_CARD_SIZE: f64 = 200.0;

/// Card height / width the estimator aims for.
pub const DEFAULT_TARGET_ASPECT_RATIO: f64 = 1.0;

/// Estimate a canvas height for `item_count` cards at a fixed `width`.
///
/// Lays cards out on an imaginary grid of `min_card_size` columns, each row
/// `min_card_size * target_aspect_ratio` tall, and clamps the total to
/// `[MIN_HEIGHT, MAX_HEIGHT]`.
pub fn estimate_height(item_count: usize, width: f64, min_card_size: f64, target_aspect_ratio: f64) -> f64 {
    if item_count == 0 || width <= 0.0 || min_card_size <= 0.0 {
        return MIN_HEIGHT;
    }

    let cards_per_row = ((width / min_card_size).floor() as usize).max(1);
    let rows = item_count.div_ceil(cards_per_row);
    let row_height = min_card_size * target_aspect_ratio;

    (rows as f64 * row_height).clamp(MIN_HEIGHT, MAX_HEIGHT)
}

/// Estimator parameters bundled with their defaults.
#[derive(Debug, Clone, Copy)]
pub struct HeightEstimator {
    pub min_card_size: f64,
    pub target_aspect_ratio: f64,
}

impl Default for HeightEstimator {
    fn default() -> Self {
        Self {
            min_card_size: DEFAULT_MIN_CARD_SIZE,
            target_aspect_ratio: DEFAULT_TARGET_ASPECT_RATIO,
        }
    }
}

impl HeightEstimator {
    pub fn estimate(&self, item_count: usize, width: f64) -> f64 {
        estimate_height(item_count, width, self.min_card_size, self.target_aspect_ratio)
    }
}
