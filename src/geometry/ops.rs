//! Arithmetic between points, vectors and unit vectors.
//!
//! Only geometrically meaningful combinations exist: a point moves by a
//! vector, two points differ by a vector, and vectors add and scale. Adding
//! two points or scaling a point does not compile.

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::{Point3D, UnitVector3D, Vector3D};

impl Add<Vector3D> for Point3D {
    type Output = Point3D;

    fn add(self, rhs: Vector3D) -> Point3D {
        Point3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub<Vector3D> for Point3D {
    type Output = Point3D;

    fn sub(self, rhs: Vector3D) -> Point3D {
        Point3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Add<UnitVector3D> for Point3D {
    type Output = Point3D;

    fn add(self, rhs: UnitVector3D) -> Point3D {
        self + rhs.to_vector()
    }
}

impl Sub<UnitVector3D> for Point3D {
    type Output = Point3D;

    fn sub(self, rhs: UnitVector3D) -> Point3D {
        self - rhs.to_vector()
    }
}

impl Sub<Point3D> for Point3D {
    type Output = Vector3D;

    fn sub(self, rhs: Point3D) -> Vector3D {
        Vector3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Point3D {
    type Output = Point3D;

    fn neg(self) -> Point3D {
        Point3D::new(-self.x, -self.y, -self.z)
    }
}

impl Add<Vector3D> for Vector3D {
    type Output = Vector3D;

    fn add(self, rhs: Vector3D) -> Vector3D {
        Vector3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub<Vector3D> for Vector3D {
    type Output = Vector3D;

    fn sub(self, rhs: Vector3D) -> Vector3D {
        Vector3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Add<UnitVector3D> for Vector3D {
    type Output = Vector3D;

    fn add(self, rhs: UnitVector3D) -> Vector3D {
        self + rhs.to_vector()
    }
}

impl Sub<UnitVector3D> for Vector3D {
    type Output = Vector3D;

    fn sub(self, rhs: UnitVector3D) -> Vector3D {
        self - rhs.to_vector()
    }
}

impl Add<Vector3D> for UnitVector3D {
    type Output = Vector3D;

    fn add(self, rhs: Vector3D) -> Vector3D {
        self.to_vector() + rhs
    }
}

impl Sub<Vector3D> for UnitVector3D {
    type Output = Vector3D;

    fn sub(self, rhs: Vector3D) -> Vector3D {
        self.to_vector() - rhs
    }
}

impl Add<UnitVector3D> for UnitVector3D {
    type Output = Vector3D;

    fn add(self, rhs: UnitVector3D) -> Vector3D {
        self.to_vector() + rhs.to_vector()
    }
}

impl Sub<UnitVector3D> for UnitVector3D {
    type Output = Vector3D;

    fn sub(self, rhs: UnitVector3D) -> Vector3D {
        self.to_vector() - rhs.to_vector()
    }
}

impl Mul<f64> for Vector3D {
    type Output = Vector3D;

    fn mul(self, rhs: f64) -> Vector3D {
        self.scale_by(rhs)
    }
}

impl Mul<Vector3D> for f64 {
    type Output = Vector3D;

    fn mul(self, rhs: Vector3D) -> Vector3D {
        rhs.scale_by(self)
    }
}

impl Mul<f64> for UnitVector3D {
    type Output = Vector3D;

    fn mul(self, rhs: f64) -> Vector3D {
        self.scale_by(rhs)
    }
}

impl Mul<UnitVector3D> for f64 {
    type Output = Vector3D;

    fn mul(self, rhs: UnitVector3D) -> Vector3D {
        rhs.scale_by(self)
    }
}

impl Div<f64> for Vector3D {
    type Output = Vector3D;

    fn div(self, rhs: f64) -> Vector3D {
        Vector3D::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vector3D {
    type Output = Vector3D;

    fn neg(self) -> Vector3D {
        self.negate()
    }
}

impl Neg for UnitVector3D {
    type Output = UnitVector3D;

    fn neg(self) -> UnitVector3D {
        self.negate()
    }
}
