// Turns pointer motion into heat: interpolate between samples, dab the brush
// at every interpolated pixel.

use crate::brush::Brush;
use crate::config::Params;
use crate::field::IntensityField;
use crate::types::Position;

/// Above this many steps `t * steps` is no longer exact enough to index the
/// step lattice, so the visible part of the path is resampled instead.
const MAX_LATTICE_STEPS: f64 = (1u64 << 40) as f64;

/// Remembers the last pointer sample so consecutive moves join into a trail.
#[derive(Debug, Default)]
pub struct Accumulator {
    previous: Option<Position>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn previous(&self) -> Option<Position> {
        self.previous
    }

    /// Forget the last sample. The next update starts a new trail.
    pub fn lift(&mut self) {
        self.previous = None;
    }

    /// Deposit heat along the path from the previous sample to `current`.
    ///
    /// Interpolates `steps = round(max(|dx|, |dy|))` points inclusive of both
    /// ends so no gap along the dominant axis exceeds one pixel. Overlapping
    /// dabs add up.
    pub fn update(&mut self, field: &mut IntensityField, params: &Params, current: Position) {
        // 1) Where the trail starts. First sample: right here, no streak.
        let previous = self.previous.unwrap_or(current);
        self.previous = Some(current);

        // 2) Brush for the params as they are now (the host may have moved a slider).
        let brush = Brush::new(params.radius_px(), params.intensity_factor());

        let p = (previous.x as f64, previous.y as f64);
        let q = (current.x as f64, current.y as f64);
        let (dx, dy) = (q.0 - p.0, q.1 - p.1);
        let steps = dx.abs().max(dy.abs()).round();

        // 3) No motion: one dab under the pointer.
        //    Visual: holding still darkens a single spot.
        if steps == 0.0 {
            brush.dab(field, to_pixel(q.0), to_pixel(q.1));
            return;
        }

        // 4) Only the part of the path whose dabs can reach the surface matters.
        let margin = brush.reach() as f64 + 1.0;
        let Some(span) = clip_segment(
            p,
            q,
            (-margin, -margin),
            (field.width() as f64 + margin, field.height() as f64 + margin),
        ) else {
            return;
        };

        // 5a) Normal moves: walk the exact step lattice, restricted to the
        //     visible index range.
        if steps <= MAX_LATTICE_STEPS {
            let first = (span.t0 * steps).floor().max(0.0) as u64;
            let last = (span.t1 * steps).ceil().min(steps) as u64;
            let n = steps as u64;
            for step in first..=last {
                let t = step as f64 / n as f64;
                brush.dab(field, to_pixel(p.0 + dx * t), to_pixel(p.1 + dy * t));
            }
            return;
        }

        // 5b) Astronomically long moves: the lattice is beyond f64 precision,
        //     so resample the clipped piece at one-pixel spacing.
        //     Visual: the trail still crosses the whole window.
        let (sx, sy) = span.start;
        let (ex, ey) = span.end;
        let (cdx, cdy) = (ex - sx, ey - sy);
        let n = cdx.abs().max(cdy.abs()).ceil().max(1.0) as u64;
        for step in 0..=n {
            let t = step as f64 / n as f64;
            brush.dab(field, to_pixel(sx + cdx * t), to_pixel(sy + cdy * t));
        }
    }
}

/// Nearest pixel. `as` saturates, and `Brush::dab` tolerates saturated centers.
#[inline]
fn to_pixel(v: f64) -> i64 {
    v.round() as i64
}

/// The part of a segment inside a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    t0: f64,
    t1: f64,
    start: (f64, f64),
    end: (f64, f64),
}

#[derive(Clone, Copy)]
enum Edge {
    X(f64),
    Y(f64),
}

/// Liang–Barsky clip of `p -> q` against `min..=max`, or `None` if it misses.
///
/// The clipped endpoints are placed exactly on the edge that cut them, so they
/// stay accurate when `p` or `q` is enormous.
fn clip_segment(
    p: (f64, f64),
    q: (f64, f64),
    min: (f64, f64),
    max: (f64, f64),
) -> Option<Span> {
    let d = (q.0 - p.0, q.1 - p.1);
    let mut span = Span {
        t0: 0.0,
        t1: 1.0,
        start: p,
        end: q,
    };
    let edges = [
        (-d.0, p.0 - min.0, Edge::X(min.0)),
        (d.0, max.0 - p.0, Edge::X(max.0)),
        (-d.1, p.1 - min.1, Edge::Y(min.1)),
        (d.1, max.1 - p.1, Edge::Y(max.1)),
    ];
    let on_edge = |edge: Edge, t: f64| match edge {
        Edge::X(x) => (x, p.1 + d.1 * t),
        Edge::Y(y) => (p.0 + d.0 * t, y),
    };

    for (dir, dist, edge) in edges {
        if dir == 0.0 {
            // Parallel to this edge: either fully inside or fully outside.
            if dist < 0.0 {
                return None;
            }
            continue;
        }
        let r = dist / dir;
        if dir < 0.0 {
            if r > span.t1 {
                return None;
            }
            if r > span.t0 {
                span.t0 = r;
                span.start = on_edge(edge, r);
            }
        } else {
            if r < span.t0 {
                return None;
            }
            if r < span.t1 {
                span.t1 = r;
                span.end = on_edge(edge, r);
            }
        }
    }

    // The coordinate along the uncut axis can drift for huge inputs; pin it.
    let pin = |(x, y): (f64, f64)| (x.clamp(min.0, max.0), y.clamp(min.1, max.1));
    span.start = pin(span.start);
    span.end = pin(span.end);
    Some(span)
}
