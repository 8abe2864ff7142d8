use std::fmt;
use std::ops::Index;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, ParseError, Result, SpatialError};
use crate::geometry::{Point3D, UnitVector3D};
use crate::math::parse;

use super::{Curve, CurveDomain, LineSegment3D};

/// An open chain of straight segments through a list of vertices.
///
/// Repeated consecutive vertices are kept; they form zero-length segments
/// that add nothing to the length and are skipped by segment queries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<Point3D>", into = "Vec<Point3D>")
)]
pub struct PolyLine3D {
    vertices: Vec<Point3D>,
}

impl PolyLine3D {
    /// Creates a polyline through `vertices` in order.
    ///
    /// # Errors
    ///
    /// Returns an error if `vertices` is empty.
    pub fn new(vertices: Vec<Point3D>) -> Result<Self> {
        if vertices.is_empty() {
            return Err(GeometryError::Degenerate("polyline needs at least one vertex".into()).into());
        }
        Ok(Self { vertices })
    }

    /// Collects a polyline from an iterator of vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if the iterator yields nothing.
    pub fn from_points(points: impl IntoIterator<Item = Point3D>) -> Result<Self> {
        Self::new(points.into_iter().collect())
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point3D] {
        &self.vertices
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn start_point(&self) -> &Point3D {
        &self.vertices[0]
    }

    #[must_use]
    pub fn end_point(&self) -> &Point3D {
        &self.vertices[self.vertices.len() - 1]
    }

    /// Non-degenerate segments between consecutive vertices.
    pub fn segments(&self) -> impl Iterator<Item = LineSegment3D> + '_ {
        self.vertices
            .windows(2)
            .filter_map(|w| LineSegment3D::new(w[0], w[1]).ok())
    }

    /// Sum of the distances between consecutive vertices.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }

    /// Returns the point `length` along the chain from the first vertex.
    ///
    /// Lengths outside `[0, self.length()]` clamp to the first or last vertex.
    #[must_use]
    pub fn get_point_at_length_from_start(&self, length: f64) -> Point3D {
        if length <= 0.0 {
            return *self.start_point();
        }
        if length >= self.length() {
            return *self.end_point();
        }
        let mut walked = 0.0;
        for w in self.vertices.windows(2) {
            let step = w[0].distance_to(&w[1]);
            if step > 0.0 && walked + step >= length {
                return w[0] + w[0].vector_to(&w[1]) * ((length - walked) / step);
            }
            walked += step;
        }
        *self.end_point()
    }

    /// Returns the point at `fraction` of the total length.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] unless `fraction` is in `[0, 1]`.
    pub fn get_point_at_fraction_along_curve(&self, fraction: f64) -> Result<Point3D> {
        CurveDomain::new(0.0, 1.0).check("fraction", fraction)?;
        Ok(self.get_point_at_length_from_start(fraction * self.length()))
    }

    /// Returns the point of the chain closest to `p`.
    ///
    /// On ties the point on the earliest segment wins.
    #[must_use]
    pub fn closest_point_to(&self, p: &Point3D) -> Point3D {
        let mut best = *self.start_point();
        let mut best_distance = best.distance_to(p);
        for segment in self.segments() {
            let candidate = segment.closest_point_to(p);
            let distance = candidate.distance_to(p);
            if distance < best_distance {
                best = candidate;
                best_distance = distance;
            }
        }
        best
    }

    /// Compares vertex lists within `tolerance`.
    #[must_use]
    pub fn equals(&self, other: &PolyLine3D, tolerance: f64) -> bool {
        self.vertices.len() == other.vertices.len()
            && self
                .vertices
                .iter()
                .zip(&other.vertices)
                .all(|(a, b)| a.equals(b, tolerance))
    }
}

impl Curve for PolyLine3D {
    /// Evaluates by arc length from the first vertex.
    fn evaluate(&self, t: f64) -> Result<Point3D> {
        self.domain().check("t", t)?;
        Ok(self.get_point_at_length_from_start(t))
    }

    /// Direction of the segment containing arc length `t`.
    ///
    /// At a vertex the tangent of the segment ending there is returned.
    fn tangent(&self, t: f64) -> Result<UnitVector3D> {
        self.domain().check("t", t)?;
        let mut walked = 0.0;
        let mut last = None;
        for segment in self.segments() {
            walked += segment.length();
            last = Some(*segment.direction());
            if walked >= t {
                break;
            }
        }
        last.ok_or_else(|| GeometryError::Degenerate("polyline has no extent".into()).into())
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.length())
    }

    fn is_closed(&self) -> bool {
        self.vertices.len() > 2 && self.start_point() == self.end_point()
    }
}

impl Index<usize> for PolyLine3D {
    type Output = Point3D;

    fn index(&self, index: usize) -> &Point3D {
        &self.vertices[index]
    }
}

impl TryFrom<Vec<Point3D>> for PolyLine3D {
    type Error = SpatialError;

    fn try_from(vertices: Vec<Point3D>) -> Result<Self> {
        Self::new(vertices)
    }
}

impl From<PolyLine3D> for Vec<Point3D> {
    fn from(polyline: PolyLine3D) -> Self {
        polyline.vertices
    }
}

impl fmt::Display for PolyLine3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl FromStr for PolyLine3D {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let vertices = parse::groups(s)?
            .into_iter()
            .map(|g| parse::numbers::<3>(g, s).map(|[x, y, z]| Point3D::new(x, y, z)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Self::new(vertices).map_err(|e| ParseError::malformed(s, e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3D {
        Point3D::new(x, y, z)
    }

    fn corner() -> PolyLine3D {
        PolyLine3D::new(vec![p(0.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(1.0, 1.0, 0.0)]).unwrap()
    }

    #[test]
    fn length_and_fraction() {
        let pl = corner();
        assert_abs_diff_eq!(pl.length(), 2.0);
        assert_eq!(pl.get_point_at_fraction_along_curve(0.5).unwrap(), p(0.0, 1.0, 0.0));
        assert_eq!(pl.get_point_at_fraction_along_curve(0.75).unwrap(), p(0.5, 1.0, 0.0));
        assert!(pl.get_point_at_fraction_along_curve(1.5).is_err());
        assert!(pl.get_point_at_fraction_along_curve(-0.1).is_err());
    }

    #[test]
    fn length_clamps() {
        let pl = corner();
        assert_eq!(pl.get_point_at_length_from_start(-3.0), p(0.0, 0.0, 0.0));
        assert_eq!(pl.get_point_at_length_from_start(10.0), p(1.0, 1.0, 0.0));
    }

    #[test]
    fn full_fraction_lands_on_last_vertex() {
        let pl = PolyLine3D::new(vec![p(0.0, 0.0, 0.0), p(0.3, 0.1, 0.0), p(0.7, 0.82, 0.1)]).unwrap();
        assert_eq!(pl.get_point_at_fraction_along_curve(1.0).unwrap(), p(0.7, 0.82, 0.1));
        assert_eq!(pl.get_point_at_length_from_start(pl.length()), *pl.end_point());
        assert_eq!(pl.evaluate(pl.domain().t_max).unwrap(), *pl.end_point());
    }

    #[test]
    fn empty_is_rejected() {
        assert!(PolyLine3D::new(Vec::new()).is_err());
        assert!(PolyLine3D::from_points(std::iter::empty()).is_err());
    }

    #[test]
    fn duplicate_vertices_are_skipped() {
        let pl = PolyLine3D::from_points([p(0.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]).unwrap();
        assert_eq!(pl.vertex_count(), 3);
        assert_eq!(pl.segments().count(), 1);
        assert_abs_diff_eq!(pl.length(), 2.0);
        assert_eq!(pl.get_point_at_length_from_start(0.5), p(0.5, 0.0, 0.0));
        assert_eq!(pl.closest_point_to(&p(1.0, 3.0, 0.0)), p(1.0, 0.0, 0.0));
    }

    #[test]
    fn single_vertex() {
        let pl = PolyLine3D::new(vec![p(1.0, 2.0, 3.0)]).unwrap();
        assert_abs_diff_eq!(pl.length(), 0.0);
        assert_eq!(pl.closest_point_to(&p(0.0, 0.0, 0.0)), p(1.0, 2.0, 3.0));
        assert_eq!(pl.get_point_at_fraction_along_curve(0.5).unwrap(), p(1.0, 2.0, 3.0));
        assert!(pl.tangent(0.0).is_err());
    }

    #[test]
    fn closest_point_first_minimum_wins() {
        let pl = corner();
        assert_eq!(pl.closest_point_to(&p(0.5, 0.5, 0.0)), p(0.0, 0.5, 0.0));
        assert_eq!(pl.closest_point_to(&p(2.0, 2.0, 0.0)), p(1.0, 1.0, 0.0));
    }

    #[test]
    fn tangent_follows_segments() {
        let pl = corner();
        assert_eq!(pl.tangent(0.5).unwrap(), UnitVector3D::y_axis());
        assert_eq!(pl.tangent(1.5).unwrap(), UnitVector3D::x_axis());
        assert_eq!(pl.evaluate(1.5).unwrap(), p(0.5, 1.0, 0.0));
        assert!(!pl.is_closed());
    }

    #[test]
    fn indexing() {
        let pl = corner();
        assert_eq!(pl[1], p(0.0, 1.0, 0.0));
        assert_eq!(*pl.end_point(), pl[2]);
    }

    #[test]
    fn parse_round_trip() {
        let pl = PolyLine3D::new(vec![p(0.1, 0.2, 0.3), p(-1.0, 4.5, 1e-9)]).unwrap();
        assert_eq!(pl.to_string().parse::<PolyLine3D>().unwrap(), pl);
        assert!("(1, 2)".parse::<PolyLine3D>().is_err());
    }
}
