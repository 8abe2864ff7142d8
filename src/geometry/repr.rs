//! Serialized shapes for types whose fields carry derived or validated state.
//!
//! Deserialization goes back through the public constructors, so a
//! document cannot produce a line with coincident end points or a circle
//! with a negative radius.

use serde::{Deserialize, Serialize};

use crate::error::SpatialError;
use crate::geometry::{
    Circle3D, CoordinateSystem3D, Line3D, LineSegment3D, Point3D, UnitVector3D, Vector3D,
};

/// Two end points; the direction is recomputed on read.
#[derive(Serialize, Deserialize)]
pub struct Endpoints {
    start_point: Point3D,
    end_point: Point3D,
}

impl TryFrom<Endpoints> for Line3D {
    type Error = SpatialError;

    fn try_from(e: Endpoints) -> Result<Self, Self::Error> {
        Line3D::new(e.start_point, e.end_point)
    }
}

impl From<Line3D> for Endpoints {
    fn from(line: Line3D) -> Self {
        Self {
            start_point: *line.start_point(),
            end_point: *line.end_point(),
        }
    }
}

impl TryFrom<Endpoints> for LineSegment3D {
    type Error = SpatialError;

    fn try_from(e: Endpoints) -> Result<Self, Self::Error> {
        LineSegment3D::new(e.start_point, e.end_point)
    }
}

impl From<LineSegment3D> for Endpoints {
    fn from(segment: LineSegment3D) -> Self {
        Self {
            start_point: *segment.start_point(),
            end_point: *segment.end_point(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct Disc {
    center: Point3D,
    axis: UnitVector3D,
    radius: f64,
}

impl TryFrom<Disc> for Circle3D {
    type Error = SpatialError;

    fn try_from(d: Disc) -> Result<Self, Self::Error> {
        Circle3D::new(d.center, d.axis, d.radius)
    }
}

impl From<Circle3D> for Disc {
    fn from(c: Circle3D) -> Self {
        Self {
            center: *c.center(),
            axis: *c.axis(),
            radius: c.radius(),
        }
    }
}

/// Origin and basis columns; the homogeneous row is implied.
#[derive(Serialize, Deserialize)]
pub struct Frame {
    origin: Point3D,
    x_axis: Vector3D,
    y_axis: Vector3D,
    z_axis: Vector3D,
}

impl From<Frame> for CoordinateSystem3D {
    fn from(f: Frame) -> Self {
        CoordinateSystem3D::new(f.origin, f.x_axis, f.y_axis, f.z_axis)
    }
}

impl From<CoordinateSystem3D> for Frame {
    fn from(cs: CoordinateSystem3D) -> Self {
        Self {
            origin: cs.origin(),
            x_axis: cs.x_axis(),
            y_axis: cs.y_axis(),
            z_axis: cs.z_axis(),
        }
    }
}
