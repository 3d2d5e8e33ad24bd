use super::constraints::EPSILON;
use super::{LayoutConfig, Node};

/// Advisory quality report for a finished layout. Computing it never changes
/// the nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutReport {
    /// Unordered node pairs whose rects intersect.
    pub overlaps: usize,
    /// Nodes that poke outside the canvas by more than `EPSILON`.
    pub out_of_bounds: usize,
    /// Mean absolute difference between each node's share of total area and
    /// its share of total value, in `[0, 1]`.
    pub proportionality_error: f64,
    /// Nodes whose long/short side ratio exceeds `max_aspect_ratio`.
    pub aspect_violations: usize,
}

impl LayoutReport {
    pub fn is_clean(&self) -> bool {
        self.overlaps == 0 && self.out_of_bounds == 0
    }
}

pub fn diagnose<P>(nodes: &[Node<P>], width: f64, height: f64, config: &LayoutConfig) -> LayoutReport {
    let mut report = LayoutReport::default();
    if nodes.is_empty() {
        return report;
    }

    for (i, a) in nodes.iter().enumerate() {
        report.overlaps += nodes[i + 1..]
            .iter()
            .filter(|b| a.rect.overlaps(&b.rect))
            .count();
        if !a.rect.fits_within(width, height) {
            report.out_of_bounds += 1;
        }
        let long = a.rect.width.max(a.rect.height);
        let short = a.rect.width.min(a.rect.height);
        if short <= 0.0 || long / short > config.max_aspect_ratio {
            report.aspect_violations += 1;
        }
    }

    let total_value: f64 = nodes.iter().map(|n| n.value).sum();
    let total_area: f64 = nodes.iter().map(|n| n.rect.area()).sum();
    if total_value > 0.0 && total_area > EPSILON {
        let drift: f64 = nodes
            .iter()
            .map(|n| (n.rect.area() / total_area - n.value / total_value).abs())
            .sum();
        report.proportionality_error = drift / nodes.len() as f64;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Rect;
    use compact_str::CompactString;

    fn node(id: &str, value: f64, rect: Rect) -> Node<()> {
        Node {
            id: CompactString::new(id),
            value,
            payload: (),
            rect,
        }
    }

    #[test]
    fn counts_problems() {
        let nodes = vec![
            node("a", 1.0, Rect::new(0.0, 0.0, 50.0, 50.0)),
            node("b", 1.0, Rect::new(25.0, 25.0, 50.0, 50.0)),
            node("c", 1.0, Rect::new(90.0, 0.0, 20.0, 5.0)),
        ];
        let report = diagnose(&nodes, 100.0, 100.0, &LayoutConfig::default());
        assert_eq!(report.overlaps, 1);
        assert_eq!(report.out_of_bounds, 1);
        assert_eq!(report.aspect_violations, 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn proportional_layout_has_no_drift() {
        let nodes = vec![
            node("a", 3.0, Rect::new(0.0, 0.0, 30.0, 10.0)),
            node("b", 1.0, Rect::new(30.0, 0.0, 10.0, 10.0)),
        ];
        let report = diagnose(&nodes, 40.0, 10.0, &LayoutConfig::default());
        assert!(report.proportionality_error < 1e-9);
        assert!(report.is_clean());
    }
}
