use glam::Vec2;
use vitrine_platform::Rect;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Client-space point relative to a container's top-left corner. Without a
/// container rect the point is returned unchanged.
pub fn to_local(client: Vec2, container: Option<Rect>) -> Vec2 {
    match container {
        Some(rect) => client - rect.origin(),
        None => client,
    }
}

/// Offset of `point` from the rect's center, normalized to [-1, 1] per axis.
pub fn normalized_offset(point: Vec2, rect: Rect) -> Vec2 {
    let half = rect.size() * 0.5;
    if half.x <= 0.0 || half.y <= 0.0 {
        return Vec2::ZERO;
    }
    ((point - rect.center()) / half).clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Vec2::new(0.0, 150.0), Vec2::new(0.0, 250.0)), 100.0);
    }

    #[test]
    fn local_subtracts_origin() {
        let rect = Rect::new(100.0, 40.0, 500.0, 300.0);
        assert_eq!(to_local(Vec2::new(150.0, 90.0), Some(rect)), Vec2::new(50.0, 50.0));
        assert_eq!(to_local(Vec2::new(150.0, 90.0), None), Vec2::new(150.0, 90.0));
    }

    #[test]
    fn normalized_offset_clamps() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(normalized_offset(Vec2::new(150.0, 50.0), rect), Vec2::new(0.5, 0.0));
        assert_eq!(normalized_offset(Vec2::new(500.0, -50.0), rect), Vec2::new(1.0, -1.0));
        assert_eq!(normalized_offset(Vec2::ZERO, Rect::default()), Vec2::ZERO);
    }
}
