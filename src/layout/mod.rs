pub mod constraints;
pub mod diagnostics;
pub mod height;
pub mod log;
pub mod squarify;
pub mod variant;

use compact_str::CompactString;
use rayon::prelude::*;

use self::constraints::{apply_constraints, EPSILON};
use self::height::HeightEstimator;
use self::log::{LayoutLog, NoopLog};
use self::squarify::squarify;
use self::variant::{classify_size, SizeVariant};

/// Axis-aligned rectangle in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Interval intersection on both axes. Touching edges, or penetration
    /// below `EPSILON`, do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let apart_x = self.right() <= other.x + EPSILON || other.right() <= self.x + EPSILON;
        let apart_y = self.bottom() <= other.y + EPSILON || other.bottom() <= self.y + EPSILON;
        !apart_x && !apart_y
    }

    /// Whether the rect lies inside `[0, width] x [0, height]`, within `EPSILON`.
    pub fn fits_within(&self, width: f64, height: f64) -> bool {
        self.x >= -EPSILON
            && self.y >= -EPSILON
            && self.right() <= width + EPSILON
            && self.bottom() <= height + EPSILON
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// One weighted input to the layout. `payload` rides along untouched.
#[derive(Debug, Clone)]
pub struct Item<P> {
    pub id: CompactString,
    pub value: f64,
    pub payload: P,
}

impl<P> Item<P> {
    pub fn new(id: impl Into<CompactString>, value: f64, payload: P) -> Self {
        Self {
            id: id.into(),
            value,
            payload,
        }
    }

    /// Whether the layout will place this item. Non-positive and non-finite
    /// values are dropped.
    pub fn is_placeable(&self) -> bool {
        self.value > 0.0 && self.value.is_finite()
    }
}

/// A positioned item.
#[derive(Debug, Clone)]
pub struct Node<P> {
    pub id: CompactString,
    pub value: f64,
    pub payload: P,
    pub rect: Rect,
}

impl<P> Node<P> {
    /// Card variant for this node's final size.
    pub fn variant(&self) -> SizeVariant {
        classify_size(self.rect.width, self.rect.height)
    }
}

/// Configuration for treemap layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Base gap between neighbouring cards (px). Small cards get less.
    pub padding: f64,
    /// Preferred minimum card edge (px).
    pub min_size: f64,
    /// Long/short side ratio beyond which a card reads badly. Only the
    /// diagnostics look at it.
    pub max_aspect_ratio: f64,
    /// Estimate a height when the caller passes `0`.
    pub enable_dynamic_height: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 8.0,
            min_size: 40.0,
            max_aspect_ratio: 3.0,
            enable_dynamic_height: true,
        }
    }
}

/// Height the layout will actually use, or `None` if it cannot lay out at all.
///
/// Only an exact `0` asks for an estimate; negative heights are always invalid.
pub fn resolve_height(item_count: usize, width: f64, height: f64, config: &LayoutConfig) -> Option<f64> {
    let height = if height == 0.0 && config.enable_dynamic_height {
        HeightEstimator::default().estimate(item_count, width)
    } else {
        height
    };
    (height > 0.0 && height.is_finite()).then_some(height)
}

/// Lay `items` out on a `width` x `height` canvas without logging.
pub fn layout<P: Clone>(items: &[Item<P>], width: f64, height: f64, config: &LayoutConfig) -> Vec<Node<P>> {
    layout_with_log(items, width, height, config, &NoopLog)
}

/// Lay `items` out on a `width` x `height` canvas.
///
/// Items with a non-positive value are dropped. Invalid canvases and empty
/// inputs yield an empty result rather than an error.
pub fn layout_with_log<P: Clone>(
    items: &[Item<P>],
    width: f64,
    height: f64,
    config: &LayoutConfig,
    log: &dyn LayoutLog,
) -> Vec<Node<P>> {
    if !(width > 0.0 && width.is_finite()) {
        log.debug(format_args!("layout: invalid width {}", width));
        return Vec::new();
    }

    let mut kept: Vec<&Item<P>> = items
        .iter()
        .filter(|item| item.is_placeable())
        .collect();
    if kept.len() < items.len() {
        log.debug(format_args!(
            "layout: dropped {} items with non-positive values",
            items.len() - kept.len()
        ));
    }

    let Some(height) = resolve_height(kept.len(), width, height, config) else {
        log.debug(format_args!("layout: invalid height {}", height));
        return Vec::new();
    };
    if kept.is_empty() {
        return Vec::new();
    }

    // Stable, so equal values keep their input order.
    kept.sort_by(|a, b| b.value.total_cmp(&a.value));

    log.debug(format_args!(
        "layout: {} items in {:.0}x{:.0}",
        kept.len(),
        width,
        height
    ));

    let values: Vec<f64> = kept.iter().map(|item| item.value).collect();
    let mut rects = squarify(&values, Rect::new(0.0, 0.0, width, height));
    debug_assert_eq!(rects.len(), kept.len());
    let outcome = apply_constraints(&mut rects, width, height, config.padding, config.min_size, log);
    log.debug(format_args!(
        "layout: overlap repair took {} passes (converged={})",
        outcome.passes, outcome.converged
    ));

    kept.into_iter()
        .zip(rects)
        .map(|(item, rect)| Node {
            id: item.id.clone(),
            value: item.value,
            payload: item.payload.clone(),
            rect,
        })
        .collect()
}

/// One independent layout request for `layout_many`.
#[derive(Debug, Clone, Copy)]
pub struct LayoutJob<'a, P> {
    pub items: &'a [Item<P>],
    pub width: f64,
    pub height: f64,
}

/// Run independent layouts in parallel. Results are in job order.
pub fn layout_many<P>(jobs: &[LayoutJob<'_, P>], config: &LayoutConfig) -> Vec<Vec<Node<P>>>
where
    P: Clone + Send + Sync,
{
    jobs.par_iter()
        .map(|job| layout(job.items, job.width, job.height, config))
        .collect()
}

/// Hit-test: the node under `(x, y)`, preferring later nodes when rects
/// overlap.
pub fn hit_test<P>(nodes: &[Node<P>], x: f64, y: f64) -> Option<&Node<P>> {
    nodes.iter().rev().find(|node| node.rect.contains(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(values: &[f64]) -> Vec<Item<usize>> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Item::new(format!("item{}", i), v, i))
            .collect()
    }

    fn assert_sound<P>(nodes: &[Node<P>], width: f64, height: f64) {
        for (i, a) in nodes.iter().enumerate() {
            assert!(a.rect.width >= 0.0 && a.rect.height >= 0.0);
            assert!(a.rect.fits_within(width, height), "{} out of bounds: {:?}", a.id, a.rect);
            for b in &nodes[i + 1..] {
                assert!(!a.rect.overlaps(&b.rect), "{} overlaps {}", a.id, b.id);
            }
        }
    }

    #[test]
    fn rejects_bad_canvas() {
        let one = items(&[100.0]);
        let config = LayoutConfig::default();
        assert!(layout(&items(&[]), 1000.0, 800.0, &config).is_empty());
        assert!(layout(&one, 0.0, 800.0, &config).is_empty());
        assert!(layout(&one, -100.0, 800.0, &config).is_empty());
        assert!(layout(&one, 1000.0, -5.0, &config).is_empty());
        assert!(layout(&one, f64::NAN, 800.0, &config).is_empty());
    }

    #[test]
    fn zero_height_without_dynamic_height_is_rejected() {
        let config = LayoutConfig {
            enable_dynamic_height: false,
            ..Default::default()
        };
        assert!(layout(&items(&[10.0, 5.0]), 1000.0, 0.0, &config).is_empty());
    }

    #[test]
    fn zero_height_is_estimated() {
        let config = LayoutConfig::default();
        let nodes = layout(&items(&[10.0, 5.0, 3.0]), 1000.0, 0.0, &config);
        assert_eq!(nodes.len(), 3);
        let expected = resolve_height(3, 1000.0, 0.0, &config);
        assert_eq!(expected, Some(height::MIN_HEIGHT));
        assert_sound(&nodes, 1000.0, height::MIN_HEIGHT);
    }

    #[test]
    fn single_item_fills_canvas_minus_padding() {
        let nodes = layout(&items(&[100.0]), 1000.0, 800.0, &LayoutConfig::default());
        assert_eq!(nodes.len(), 1);
        let r = nodes[0].rect;
        assert!((r.x - 4.0).abs() < 1e-9 && (r.y - 4.0).abs() < 1e-9);
        assert!((r.width - 992.0).abs() < 1e-9 && (r.height - 792.0).abs() < 1e-9);
        assert_eq!(nodes[0].variant(), SizeVariant::Large);
    }

    #[test]
    fn drops_non_positive_values() {
        let input = vec![
            Item::new("valid1", 50.0, ()),
            Item::new("zero", 0.0, ()),
            Item::new("negative", -10.0, ()),
            Item::new("valid2", 30.0, ()),
        ];
        let nodes = layout(&input, 1000.0, 800.0, &LayoutConfig::default());
        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["valid1", "valid2"]);
    }

    #[test]
    fn all_zero_values_yield_nothing() {
        assert!(layout(&items(&[0.0, 0.0]), 1000.0, 800.0, &LayoutConfig::default()).is_empty());
    }

    #[test]
    fn payload_follows_its_item() {
        let input = items(&[5.0, 40.0, 12.0, 40.0]);
        let nodes = layout(&input, 1000.0, 800.0, &LayoutConfig::default());
        assert_eq!(nodes.len(), input.len());
        for node in &nodes {
            let source = input.iter().find(|i| i.id == node.id).map(|i| i.payload);
            assert_eq!(source, Some(node.payload));
        }
        // Equal values keep input order.
        assert_eq!(nodes[0].id, "item1");
        assert_eq!(nodes[1].id, "item3");
    }

    #[test]
    fn uniform_items_are_sound_and_even() {
        let nodes = layout(&items(&[10.0; 12]), 1000.0, 800.0, &LayoutConfig::default());
        assert_eq!(nodes.len(), 12);
        assert_sound(&nodes, 1000.0, 800.0);
        let areas: Vec<f64> = nodes.iter().map(|n| n.rect.area()).collect();
        let max = areas.iter().copied().fold(0.0, f64::max);
        let min = areas.iter().copied().fold(f64::INFINITY, f64::min);
        assert!(max / min < 1.2, "areas spread {} .. {}", min, max);
    }

    #[test]
    fn skewed_items_keep_proportion() {
        let mut values = vec![100.0];
        values.extend([1.0; 5]);
        let nodes = layout(&items(&values), 1000.0, 800.0, &LayoutConfig::default());
        assert_sound(&nodes, 1000.0, 800.0);
        let big = nodes[0].rect.area();
        for small in &nodes[1..] {
            assert!(big > 10.0 * small.rect.area());
        }
    }

    #[test]
    fn extreme_ratio_keeps_every_item() {
        let nodes = layout(&items(&[1e6, 1e-12]), 1000.0, 800.0, &LayoutConfig::default());
        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["item0", "item1"]);
        for node in &nodes {
            assert!(node.rect.width >= 0.0 && node.rect.height >= 0.0);
            assert!(node.rect.fits_within(1000.0, 800.0), "{:?}", node.rect);
        }
    }

    #[test]
    fn huge_values_are_laid_out() {
        let nodes = layout(&items(&[1e308, 1e308]), 1000.0, 800.0, &LayoutConfig::default());
        assert_eq!(nodes.len(), 2);
        assert_sound(&nodes, 1000.0, 800.0);
    }

    #[test]
    fn placeable_matches_layout_filter() {
        let input = items(&[5.0, 0.0, -1.0, f64::INFINITY, f64::NAN, 2.0]);
        let placeable = input.iter().filter(|i| i.is_placeable()).count();
        assert_eq!(placeable, 2);
        let nodes = layout(&input, 1000.0, 800.0, &LayoutConfig::default());
        assert_eq!(nodes.len(), placeable);
    }

    #[test]
    fn hit_test_finds_node_under_point() {
        let nodes = layout(&items(&[30.0, 10.0]), 400.0, 200.0, &LayoutConfig::default());
        let first = nodes[0].rect;
        let hit = hit_test(&nodes, first.x + 1.0, first.y + 1.0).map(|n| n.id.as_str());
        assert_eq!(hit, Some("item0"));
        assert!(hit_test(&nodes, -1.0, -1.0).is_none());
    }

    #[test]
    fn batch_matches_sequential() {
        let a = items(&[3.0, 2.0, 1.0]);
        let b = items(&[8.0, 8.0]);
        let config = LayoutConfig::default();
        let jobs = [
            LayoutJob { items: &a, width: 300.0, height: 200.0 },
            LayoutJob { items: &b, width: 0.0, height: 200.0 },
            LayoutJob { items: &b, width: 500.0, height: 500.0 },
        ];
        let batched = layout_many(&jobs, &config);
        assert_eq!(batched.len(), 3);
        assert!(batched[1].is_empty());
        for (job, got) in jobs.iter().zip(&batched) {
            let expected = layout(job.items, job.width, job.height, &config);
            let got_rects: Vec<Rect> = got.iter().map(|n| n.rect).collect();
            let expected_rects: Vec<Rect> = expected.iter().map(|n| n.rect).collect();
            assert_eq!(got_rects, expected_rects);
        }
    }
}
