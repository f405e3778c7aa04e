use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in world units.
///
/// Containment is inclusive on every edge, so a point sitting exactly on a
/// shared border of two regions belongs to both.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self {
            min: Vec2 { x: x_min, y: y_min },
            max: Vec2 { x: x_max, y: y_max },
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn is_normalized(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.min.x <= point.x
            && point.x <= self.max.x
            && self.min.y <= point.y
            && point.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_on_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);

        assert!(rect.contains(Vec2::new(10.0, 20.0)));
        assert!(rect.contains(Vec2::new(30.0, 40.0)));
        assert!(rect.contains(Vec2::new(15.0, 35.0)));
        assert!(!rect.contains(Vec2::new(9.9, 25.0)));
        assert!(!rect.contains(Vec2::new(20.0, 40.1)));
    }

    #[test]
    fn inverted_rect_is_not_normalized() {
        assert!(Rect::new(0.0, 0.0, 5.0, 5.0).is_normalized());
        assert!(!Rect::new(5.0, 0.0, 0.0, 5.0).is_normalized());
        assert_eq!(Rect::new(0.0, 0.0, 5.0, 2.0).width(), 5.0);
        assert_eq!(Rect::new(0.0, 0.0, 5.0, 2.0).height(), 2.0);
    }
}
