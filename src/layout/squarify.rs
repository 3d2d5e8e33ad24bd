use super::Rect;

/// Worst aspect ratio any member of `row` would get if the row were laid out
/// along a side of `length`. Lower is squarer.
///
/// `row` holds areas (already normalized to canvas units), not raw values.
pub fn worst_aspect_ratio(row: &[f64], length: f64) -> f64 {
    if row.is_empty() || length <= 0.0 {
        return f64::INFINITY;
    }
    let sum: f64 = row.iter().sum();
    if sum <= 0.0 {
        return f64::INFINITY;
    }
    let max_r = row.iter().copied().fold(0.0, f64::max);
    let min_r = row.iter().copied().fold(f64::INFINITY, f64::min);
    if min_r <= 0.0 {
        return f64::INFINITY;
    }
    let length_sq = length * length;
    let sum_sq = sum * sum;
    let a = (length_sq * max_r) / sum_sq;
    let b = sum_sq / (length_sq * min_r);
    a.max(b)
}

/// Greedily grow a row from the front of `areas` (sorted descending) and
/// return how many leading items belong to it.
///
/// An item joins while it does not make the worst ratio worse; ties join.
pub fn build_row(areas: &[f64], length: f64) -> usize {
    if areas.is_empty() {
        return 0;
    }
    let mut best = worst_aspect_ratio(&areas[..1], length);
    let mut count = 1;
    while count < areas.len() {
        let candidate = worst_aspect_ratio(&areas[..=count], length);
        if candidate > best {
            break;
        }
        best = candidate;
        count += 1;
    }
    count
}

/// Split `rect` into contiguous slices proportional to each entry of `row`.
///
/// `vertical` stacks along the height, otherwise along the width. Output order
/// matches `row`.
pub fn layout_row(row: &[f64], rect: Rect, vertical: bool) -> Vec<Rect> {
    let sum: f64 = row.iter().sum();
    if sum <= 0.0 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(row.len());
    let mut offset = 0.0;
    for &area in row {
        let fraction = area / sum;
        let placed = if vertical {
            let h = rect.height * fraction;
            Rect::new(rect.x, rect.y + offset, rect.width, h)
        } else {
            let w = rect.width * fraction;
            Rect::new(rect.x + offset, rect.y, w, rect.height)
        };
        offset += if vertical { placed.height } else { placed.width };
        out.push(placed);
    }
    out
}

/// Squarified layout of `values` (sorted descending) into `bounds`.
///
/// Returns one rect per value in the same order, tiling `bounds` exactly.
/// Values too small to survive rounding get a zero-extent rect.
/// Rows are peeled off in a loop rather than by recursion so deep inputs
/// cannot blow the stack.
pub fn squarify(values: &[f64], bounds: Rect) -> Vec<Rect> {
    if values.is_empty() || bounds.width <= 0.0 || bounds.height <= 0.0 {
        return Vec::new();
    }
    // Divide by the largest value first so huge inputs cannot overflow the sum.
    let max = values.iter().copied().fold(0.0, f64::max);
    if max <= 0.0 || !max.is_finite() {
        return Vec::new();
    }
    let total: f64 = values.iter().map(|v| v / max).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    if values.len() == 1 {
        return vec![bounds];
    }

    // Work in areas so the worst-ratio test compares like with like.
    let scale = bounds.area() / total;
    let areas: Vec<f64> = values.iter().map(|v| v / max * scale).collect();

    let mut result = Vec::with_capacity(areas.len());
    let mut remaining: &[f64] = &areas;
    let mut rect = bounds;

    while !remaining.is_empty() {
        let remaining_sum: f64 = remaining.iter().sum();
        if rect.width <= 0.0 || rect.height <= 0.0 || remaining_sum <= 0.0 {
            // Leftovers rounded away to nothing. They still get a rect, pinned
            // at the remainder's origin, so constraint repair can give them a body.
            result.extend(remaining.iter().map(|_| Rect::new(rect.x, rect.y, 0.0, 0.0)));
            break;
        }

        // Wide rects get a column on the left, tall rects a row on top.
        let vertical = rect.width >= rect.height;
        let length = if vertical { rect.height } else { rect.width };

        let count = build_row(remaining, length);
        let (row, rest) = remaining.split_at(count);

        if rest.is_empty() {
            result.extend(layout_row(row, rect, vertical));
            break;
        }

        let row_sum: f64 = row.iter().sum();
        let fraction = row_sum / remaining_sum;

        let (slice, next) = if vertical {
            let w = rect.width * fraction;
            (
                Rect::new(rect.x, rect.y, w, rect.height),
                Rect::new(rect.x + w, rect.y, rect.width - w, rect.height),
            )
        } else {
            let h = rect.height * fraction;
            (
                Rect::new(rect.x, rect.y, rect.width, h),
                Rect::new(rect.x, rect.y + h, rect.width, rect.height - h),
            )
        };

        result.extend(layout_row(row, slice, vertical));
        remaining = rest;
        rect = next;
    }

    result
}
