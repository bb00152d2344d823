//! Hit-testing for pointer gestures over a fixed point set.
//!
//! A gesture is the list of plot-space vertices recorded between pointer
//! press and release. Short gestures are treated as clicks and snap to the
//! nearest point; longer ones are closed into a lasso polygon.

use crate::data::selection::Selection;

/// A point in plot coordinates.
pub type Point = [f64; 2];

/// Visible axis ranges of the plot at the time a gesture completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl ViewBounds {
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        Self { x, y }
    }

    /// Tight bounds around `points`, or the unit square if there are none.
    pub fn around(points: &[Point]) -> Self {
        let mut xmin = f64::INFINITY;
        let mut xmax = f64::NEG_INFINITY;
        let mut ymin = f64::INFINITY;
        let mut ymax = f64::NEG_INFINITY;
        for p in points {
            xmin = xmin.min(p[0]);
            xmax = xmax.max(p[0]);
            ymin = ymin.min(p[1]);
            ymax = ymax.max(p[1]);
        }
        if xmin.is_finite() && xmax.is_finite() && ymin.is_finite() && ymax.is_finite() {
            Self::new((xmin, xmax), (ymin, ymax))
        } else {
            Self::new((0.0, 1.0), (0.0, 1.0))
        }
    }

    pub fn width(&self) -> f64 {
        (self.x.1 - self.x.0).abs()
    }

    pub fn height(&self) -> f64 {
        (self.y.1 - self.y.0).abs()
    }
}

impl Default for ViewBounds {
    fn default() -> Self {
        Self::new((0.0, 1.0), (0.0, 1.0))
    }
}

/// How a completed gesture was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Click,
    Drag,
}

/// Result of hit-testing a gesture against the point set.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureOutcome {
    pub kind: GestureKind,
    pub selection: Selection,
}

/// Distance below which a gesture counts as a click: a fraction of the
/// smaller visible axis extent.
pub fn click_threshold(bounds: &ViewBounds, tolerance: f64) -> f64 {
    tolerance * bounds.width().min(bounds.height())
}

/// Manhattan length of the path through `vertices`.
pub fn path_travel(vertices: &[Point]) -> f64 {
    vertices
        .windows(2)
        .map(|w| (w[1][0] - w[0][0]).abs() + (w[1][1] - w[0][1]).abs())
        .sum()
}

/// Classify a gesture path. A single vertex is always a click.
pub fn classify(vertices: &[Point], threshold: f64) -> GestureKind {
    if vertices.len() < 2 || path_travel(vertices) < threshold {
        GestureKind::Click
    } else {
        GestureKind::Drag
    }
}

/// Index and Euclidean distance of the point closest to `target`.
///
/// Ties resolve to the lowest index. Points with non-finite coordinates are
/// never picked.
pub fn nearest_point(points: &[Point], target: Point) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        let d = (p[0] - target[0]).hypot(p[1] - target[1]);
        if !d.is_finite() {
            continue;
        }
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }
    best
}

/// Even-odd containment test against the closed polygon through `polygon`.
///
/// Edges are half-open in y and the crossing must lie strictly right of
/// `p`, so points on a bottom or left boundary are inside and points on a
/// top or right boundary are outside. Fewer than three vertices never
/// contain anything.
pub fn polygon_contains(polygon: &[Point], p: Point) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[j];
        if (a[1] > p[1]) != (b[1] > p[1]) {
            let x_cross = a[0] + (p[1] - a[1]) * (b[0] - a[0]) / (b[1] - a[1]);
            if p[0] < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Indices of every point inside the lasso through `vertices`.
pub fn lasso_select(points: &[Point], vertices: &[Point]) -> Selection {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| polygon_contains(vertices, **p))
        .map(|(i, _)| i)
        .collect()
}

/// Turn a completed gesture into the set of indices it hits.
pub fn select_gesture(
    points: &[Point],
    vertices: &[Point],
    bounds: &ViewBounds,
    tolerance: f64,
) -> GestureOutcome {
    let threshold = click_threshold(bounds, tolerance);
    let kind = classify(vertices, threshold);
    let Some(&first) = vertices.first() else {
        return GestureOutcome {
            kind,
            selection: Selection::new(),
        };
    };
    let selection = match kind {
        GestureKind::Click => match nearest_point(points, first) {
            Some((idx, dist)) if dist < threshold => Selection::from_indices([idx]),
            _ => Selection::new(),
        },
        GestureKind::Drag => lasso_select(points, vertices),
    };
    GestureOutcome { kind, selection }
}
