//! Polygon statistics over contour points.
//!
//! Contours are treated as closed polygons through their pixel centers, so
//! area and moments follow Green's theorem rather than pixel counting.

use imageproc::point::Point;

use crate::tracking::domain::detection::Circle;

const CIRCLE_EPS: f64 = 1e-7;

/// Zeroth and first order spatial moments of a closed polygon.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    pub fn of_polygon(points: &[Point<i32>]) -> Self {
        let n = points.len();
        if n < 3 {
            return Self::default();
        }

        let mut m = Self::default();
        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            let (xa, ya) = (a.x as f64, a.y as f64);
            let (xb, yb) = (b.x as f64, b.y as f64);
            let cross = xa * yb - xb * ya;
            m.m00 += cross;
            m.m10 += (xa + xb) * cross;
            m.m01 += (ya + yb) * cross;
        }
        m.m00 /= 2.0;
        m.m10 /= 6.0;
        m.m01 /= 6.0;

        // Orientation-independent: clockwise traces give negative sums
        if m.m00 < 0.0 {
            m.m00 = -m.m00;
            m.m10 = -m.m10;
            m.m01 = -m.m01;
        }
        m
    }

    /// Area-weighted centroid, or `None` for a zero-area polygon.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.m00 == 0.0 || !self.m00.is_finite() {
            return None;
        }
        Some((self.m10 / self.m00, self.m01 / self.m00))
    }
}

/// Unsigned shoelace area of a closed polygon.
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    Moments::of_polygon(points).m00
}

/// Smallest circle containing every point (incremental Welzl).
pub fn min_enclosing_circle(points: &[Point<i32>]) -> Circle {
    let pts: Vec<(f64, f64)> = visit_order(points.len())
        .map(|i| (points[i].x as f64, points[i].y as f64))
        .collect();

    let Some(&first) = pts.first() else {
        return Circle {
            x: 0.0,
            y: 0.0,
            radius: 0.0,
        };
    };

    let mut c = point_circle(first);
    for i in 1..pts.len() {
        if contains(&c, pts[i]) {
            continue;
        }
        c = point_circle(pts[i]);
        for j in 0..i {
            if contains(&c, pts[j]) {
                continue;
            }
            c = diameter_circle(pts[i], pts[j]);
            for k in 0..j {
                if !contains(&c, pts[k]) {
                    c = circumcircle(pts[i], pts[j], pts[k]);
                }
            }
        }
    }
    c
}

/// Deterministic stride permutation of `0..n`.
///
/// Contour points arrive in boundary order, which is the worst case for the
/// incremental algorithm; striding through them restores its expected cost.
fn visit_order(n: usize) -> impl Iterator<Item = usize> {
    let mut step = ((n as f64 * 0.618) as usize).max(1);
    while n > 1 && gcd(step, n) != 1 {
        step += 1;
    }
    (0..n).map(move |i| (i * step) % n.max(1))
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn point_circle(p: (f64, f64)) -> Circle {
    Circle {
        x: p.0,
        y: p.1,
        radius: 0.0,
    }
}

fn contains(c: &Circle, p: (f64, f64)) -> bool {
    let d = (p.0 - c.x).hypot(p.1 - c.y);
    d <= c.radius + CIRCLE_EPS * c.radius.max(1.0)
}

fn diameter_circle(a: (f64, f64), b: (f64, f64)) -> Circle {
    Circle {
        x: (a.0 + b.0) / 2.0,
        y: (a.1 + b.1) / 2.0,
        radius: (a.0 - b.0).hypot(a.1 - b.1) / 2.0,
    }
}

fn circumcircle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Circle {
    let (bx, by) = (b.0 - a.0, b.1 - a.1);
    let (cx, cy) = (c.0 - a.0, c.1 - a.1);
    let d = 2.0 * (bx * cy - by * cx);

    if d.abs() < CIRCLE_EPS {
        // Collinear: the widest pair spans the other point
        return [
            diameter_circle(a, b),
            diameter_circle(a, c),
            diameter_circle(b, c),
        ]
        .into_iter()
        .fold(point_circle(a), |best, cand| {
            if cand.radius > best.radius {
                cand
            } else {
                best
            }
        });
    }

    let b_sq = bx * bx + by * by;
    let c_sq = cx * cx + cy * cy;
    let ux = (cy * b_sq - by * c_sq) / d;
    let uy = (bx * c_sq - cx * b_sq) / d;
    Circle {
        x: a.0 + ux,
        y: a.1 + uy,
        radius: ux.hypot(uy),
    }
}
