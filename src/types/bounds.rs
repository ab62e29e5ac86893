use glam::Vec3;
use serde::Serialize;

/// Axis-aligned bounding box in 3-D.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self {
            min: min.to_array(),
            max: max.to_array(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_empty() {
        assert_eq!(BoundingBox::from_points(Vec::<Vec3>::new()), None);
    }

    #[test]
    fn from_points_spans_all() {
        let bb = BoundingBox::from_points([
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-1.0, 3.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
        ])
        .unwrap();
        assert_eq!(bb.min, [-1.0, -2.0, 0.0]);
        assert_eq!(bb.max, [1.0, 3.0, 4.0]);
    }
}
