use super::log::LayoutLog;
use super::Rect;

/// Tolerance for bounds and overlap checks (canvas units).
pub const EPSILON: f64 = 0.1;

/// Absolute floor for a node's width, applied after min-size clamping.
pub const MIN_NODE_WIDTH: f64 = 8.0;

/// Absolute floor for a node's height, applied after min-size clamping.
pub const MIN_NODE_HEIGHT: f64 = 8.0;

/// Area ratio (node / container) at which a node gets the full base padding.
pub const PADDING_RAMP_AREA_RATIO: f64 = 0.2;

/// Upper bound on overlap-repair passes.
pub const MAX_OVERLAP_PASSES: usize = 10;

/// Below this fraction of the min size an extent gets clamped back up.
const MIN_SIZE_TRIGGER: f64 = 0.6;

/// A uniform fit-to-container scale below this tries a shift first.
const MIN_FIT_SCALE: f64 = 0.5;

/// How overlap repair ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairOutcome {
    /// Passes run. Includes the final clean pass when one was needed to see
    /// that nothing overlaps.
    pub passes: usize,
    /// `true` when no overlaps remain, even if the last allowed pass was the
    /// one that cleared them.
    pub converged: bool,
}

/// Padding for a node of `area` inside a container of `container_area`.
///
/// Ramps linearly from half of `base` (vanishing nodes) to all of it (nodes
/// covering `PADDING_RAMP_AREA_RATIO` of the container or more).
pub fn scaled_padding(area: f64, container_area: f64, base: f64) -> f64 {
    if container_area <= 0.0 {
        return base * 0.5;
    }
    let ratio = (area / container_area).clamp(0.0, 1.0);
    let t = (ratio / PADDING_RAMP_AREA_RATIO).min(1.0);
    base * (0.5 + 0.5 * t)
}

/// Stage A for one node: pad, clamp to min size, enforce floors, fit inside
/// the container.
pub fn shrink_and_clamp(raw: Rect, width: f64, height: f64, base_padding: f64, min_size: f64) -> Rect {
    let pad = scaled_padding(raw.area(), width * height, base_padding);
    let half = pad / 2.0;

    let mut r = Rect::new(
        raw.x + half,
        raw.y + half,
        (raw.width - pad).max(0.0),
        (raw.height - pad).max(0.0),
    );

    // Small extents give up their trailing padding before anything else.
    let trigger = MIN_SIZE_TRIGGER * min_size;
    if r.width < trigger {
        r.width = min_size.min((raw.width - half).max(0.0));
    }
    if r.height < trigger {
        r.height = min_size.min((raw.height - half).max(0.0));
    }

    r.width = r.width.max(MIN_NODE_WIDTH);
    r.height = r.height.max(MIN_NODE_HEIGHT);

    fit_container(&mut r, half, width, height);
    r
}

fn fit_scale(r: &Rect, width: f64, height: f64) -> f64 {
    let sx = if r.right() > width && r.width > 0.0 {
        (width - r.x) / r.width
    } else {
        1.0
    };
    let sy = if r.bottom() > height && r.height > 0.0 {
        (height - r.y) / r.height
    } else {
        1.0
    };
    sx.min(sy).clamp(0.0, 1.0)
}

/// Pull a node that spills over the right or bottom edge back inside.
///
/// `offset` is the node's own padding inset; a node may slide left/up by at
/// most that much when plain scaling would more than halve it.
fn fit_container(r: &mut Rect, offset: f64, width: f64, height: f64) {
    if r.right() <= width && r.bottom() <= height {
        return;
    }

    let mut scale = fit_scale(r, width, height);
    if scale < MIN_FIT_SCALE {
        if r.right() > width {
            let shift = (r.right() - width).min(offset).min(r.x).max(0.0);
            r.x -= shift;
        }
        if r.bottom() > height {
            let shift = (r.bottom() - height).min(offset).min(r.y).max(0.0);
            r.y -= shift;
        }
        scale = fit_scale(r, width, height);
    }

    if scale < 1.0 {
        r.width *= scale;
        r.height *= scale;
    }
}

/// Stage B: nudge colliding rects apart, at most `MAX_OVERLAP_PASSES` times.
///
/// Each pass moves every rect at most once, away from the first neighbour it
/// collides with, to whichever of the four sides is closest and still inside
/// the container. Chains of collisions therefore need several passes.
pub fn resolve_overlaps(
    rects: &mut [Rect],
    width: f64,
    height: f64,
    gap: f64,
    log: &dyn LayoutLog,
) -> RepairOutcome {
    resolve_overlaps_within(rects, width, height, gap, MAX_OVERLAP_PASSES, log)
}

fn first_overlap(rects: &[Rect], i: usize) -> Option<Rect> {
    let a = rects[i];
    rects
        .iter()
        .enumerate()
        .find(|&(j, other)| j != i && a.overlaps(other))
        .map(|(_, other)| *other)
}

fn resolve_overlaps_within(
    rects: &mut [Rect],
    width: f64,
    height: f64,
    gap: f64,
    max_passes: usize,
    log: &dyn LayoutLog,
) -> RepairOutcome {
    for pass in 1..=max_passes {
        let mut found = 0usize;

        for i in 0..rects.len() {
            let a = rects[i];
            let Some(b) = first_overlap(rects, i) else {
                continue;
            };
            found += 1;

            let candidates = [
                Rect { x: b.right() + gap, ..a },
                Rect { y: b.bottom() + gap, ..a },
                Rect { x: b.x - gap - a.width, ..a },
                Rect { y: b.y - gap - a.height, ..a },
            ];
            let best = candidates
                .into_iter()
                .filter(|c| c.fits_within(width, height))
                .min_by(|p, q| {
                    let dp = (p.x - a.x).abs() + (p.y - a.y).abs();
                    let dq = (q.x - a.x).abs() + (q.y - a.y).abs();
                    dp.total_cmp(&dq)
                });

            match best {
                Some(moved) => rects[i] = moved,
                None => log.debug(format_args!(
                    "overlap repair: no in-bounds move for rect {} at ({:.1}, {:.1})",
                    i, a.x, a.y
                )),
            }
        }

        log.debug(format_args!("overlap repair pass {}: {} overlaps", pass, found));
        if found == 0 {
            return RepairOutcome {
                passes: pass,
                converged: true,
            };
        }
    }

    // The last pass may have cleared the final collision without a clean pass after it.
    let converged = (0..rects.len()).all(|i| first_overlap(rects, i).is_none());
    if !converged {
        log.warn(format_args!(
            "overlap repair stopped after {} passes with overlaps remaining",
            max_passes
        ));
    }
    RepairOutcome {
        passes: max_passes,
        converged,
    }
}

/// Run both stages over raw squarified rects, in place.
pub fn apply_constraints(
    rects: &mut [Rect],
    width: f64,
    height: f64,
    base_padding: f64,
    min_size: f64,
    log: &dyn LayoutLog,
) -> RepairOutcome {
    for r in rects.iter_mut() {
        *r = shrink_and_clamp(*r, width, height, base_padding, min_size);
    }
    resolve_overlaps(rects, width, height, base_padding / 2.0, log)
}
