use crate::core::datum::Transform;
use crate::geom::geometry::{Geometry, Position};
use crate::util::error::GeoshiftError;
use crate::util::precision::Precision;
use geo_types::{Rect, coord};
use rayon::prelude::*;

impl Geometry {
    /// Applies `f(lon, lat) -> (lon, lat)` to every position in place.
    pub fn point_func<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(f64, f64) -> (f64, f64),
    {
        for p in self.points_mut() {
            let (x, y) = f(p[0], p[1]);
            *p = [x, y];
        }
        self
    }

    /// Like [`Geometry::point_func`], spreading the rings over the rayon pool.
    pub fn par_point_func<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(f64, f64) -> (f64, f64) + Sync + Send,
    {
        self.coords
            .par_iter_mut()
            .flat_map(|group| group.par_iter_mut())
            .for_each(|ring| {
                for p in ring.iter_mut() {
                    let (x, y) = f(p[0], p[1]);
                    *p = [x, y];
                }
            });
        self
    }

    /// Converts every position with `transform`, rounded to eight digits.
    pub fn transform(&mut self, transform: Transform) -> &mut Self {
        self.point_func(|lon, lat| transform.apply(lon, lat, Precision::Point))
    }

    /// Returns a converted copy, leaving `self` untouched.
    pub fn transformed(&self, transform: Transform) -> Geometry {
        let mut copy = self.clone();
        copy.transform(transform);
        copy
    }

    /// Converts every position from WGS-84 to GCJ-02, in place.
    pub fn wgs2gcj(&mut self) -> &mut Self {
        self.transform(Transform::Wgs2Gcj)
    }

    /// Converts every position from GCJ-02 to WGS-84, the approximate inverse, in place.
    pub fn gcj2wgs(&mut self) -> &mut Self {
        self.transform(Transform::Gcj2Wgs)
    }

    /// Converts every position from GCJ-02 to BD-09, in place.
    pub fn gcj2bd(&mut self) -> &mut Self {
        self.transform(Transform::Gcj2Bd)
    }

    /// Converts every position from BD-09 to GCJ-02, the approximate inverse, in place.
    pub fn bd2gcj(&mut self) -> &mut Self {
        self.transform(Transform::Bd2Gcj)
    }

    /// Converts every position from WGS-84 to BD-09, in place.
    pub fn wgs2bd(&mut self) -> &mut Self {
        self.transform(Transform::Wgs2Bd)
    }

    /// Converts every position from BD-09 to WGS-84, in place.
    pub fn bd2wgs(&mut self) -> &mut Self {
        self.transform(Transform::Bd2Wgs)
    }

    /// Swaps the two ordinates of every position, for `lat lon` ordered sources.
    pub fn reverse_lnglat(&mut self) -> &mut Self {
        self.point_func(|lon, lat| (lat, lon))
    }

    /// Returns the bounding rectangle of all positions.
    ///
    /// An empty geometry has no extent and returns
    /// [`GeoshiftError::UnsupportedGeometryOperation`].
    pub fn bbox(&self) -> Result<Rect<f64>, GeoshiftError> {
        let mut points = self.points();
        let first = points.next().ok_or_else(|| {
            GeoshiftError::UnsupportedGeometryOperation(format!(
                "bounding box of an empty {}",
                self.geometry_type
            ))
        })?;

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first[0], first[1], first[0], first[1]);
        for p in points {
            min_x = min_x.min(p[0]);
            min_y = min_y.min(p[1]);
            max_x = max_x.max(p[0]);
            max_y = max_y.max(p[1]);
        }
        Ok(Rect::new(
            coord! { x: min_x, y: min_y },
            coord! { x: max_x, y: max_y },
        ))
    }
}

/// Orientation test for a single ring.
///
/// Accumulates `(x[i+1] - x[i]) * (y[i+1] + y[i])` over every edge, closing
/// edge included. A positive sum means counter-clockwise and returns `false`;
/// zero or negative returns `true`, so degenerate and empty rings count as
/// clockwise.
///
/// ```
/// use geoshift::is_clockwise;
///
/// let ring = [[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0], [0.0, 0.0]];
/// assert!(!is_clockwise(&ring));
/// ```
pub fn is_clockwise(ring: &[Position]) -> bool {
    let n = ring.len();
    let sum: f64 = (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            (b[0] - a[0]) * (b[1] + a[1])
        })
        .sum();
    sum <= 0.0
}
