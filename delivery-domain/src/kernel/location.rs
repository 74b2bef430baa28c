use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;
use delivery_macros::value_object;
use rand::Rng;
use std::fmt;

pub const MIN_X: u8 = 1;
pub const MAX_X: u8 = 10;
pub const MIN_Y: u8 = 1;
pub const MAX_Y: u8 = 10;

/// 网格坐标
///
/// 两个坐标都位于 `[1, 10]`；只能通过 `new`、`random`、`min`、`max` 构造，
/// 因此持有一个 `Location` 即意味着它合法。
#[value_object]
#[derive(Copy)]
pub struct Location {
    x: u8,
    y: u8,
}

impl Location {
    pub fn new(x: u8, y: u8) -> DomainResult<Self> {
        if !(MIN_X..=MAX_X).contains(&x) {
            return Err(DomainError::out_of_range("x", x, MIN_X.into(), MAX_X.into()));
        }
        if !(MIN_Y..=MAX_Y).contains(&y) {
            return Err(DomainError::out_of_range("y", y, MIN_Y.into(), MAX_Y.into()));
        }
        Ok(Self { x, y })
    }

    pub const fn min() -> Self {
        Self { x: MIN_X, y: MIN_Y }
    }

    pub const fn max() -> Self {
        Self { x: MAX_X, y: MAX_Y }
    }

    /// 网格内均匀随机的坐标
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            x: rng.random_range(MIN_X..=MAX_X),
            y: rng.random_range(MIN_Y..=MAX_Y),
        }
    }

    pub const fn x(&self) -> u8 {
        self.x
    }

    pub const fn y(&self) -> u8 {
        self.y
    }

    /// 曼哈顿距离 `|Δx| + |Δy|`，最大为 18，不会溢出 `u8`
    pub fn distance(&self, target: &Location) -> u8 {
        self.x.abs_diff(target.x) + self.y.abs_diff(target.y)
    }
}

impl ValueObject for Location {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        Self::new(self.x, self.y).map(|_| ())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_point_of_the_grid() {
        for x in MIN_X..=MAX_X {
            for y in MIN_Y..=MAX_Y {
                let loc = Location::new(x, y).unwrap();
                assert_eq!((loc.x(), loc.y()), (x, y));
                assert!(loc.validate().is_ok());
            }
        }
    }

    #[test]
    fn rejects_points_outside_the_grid() {
        for (x, y) in [(0, 1), (1, 0), (11, 5), (5, 11), (0, 0), (255, 255)] {
            let err = Location::new(x, y).unwrap_err();
            assert!(
                matches!(err, DomainError::ValueOutOfRange { .. }),
                "unexpected {err:?} for ({x}, {y})"
            );
        }

        match Location::new(11, 5).unwrap_err() {
            DomainError::ValueOutOfRange { field, value, .. } => {
                assert_eq!(field, "x");
                assert_eq!(value, 11);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn distance_between_corners_is_eighteen() {
        assert_eq!(Location::min().distance(&Location::max()), 18);
        assert_eq!(Location::max().distance(&Location::min()), 18);
        assert_eq!(Location::min().distance(&Location::min()), 0);
    }

    fn grid() -> impl Iterator<Item = Location> {
        (MIN_X..=MAX_X).flat_map(|x| (MIN_Y..=MAX_Y).map(move |y| Location::new(x, y).unwrap()))
    }

    #[test]
    fn distance_is_symmetric_and_manhattan_for_every_pair() {
        for a in grid() {
            for b in grid() {
                let d = a.distance(&b);
                assert_eq!(d, b.distance(&a), "{a} -> {b}");
                assert_eq!(d, a.x().abs_diff(b.x()) + a.y().abs_diff(b.y()));
                assert_eq!(d == 0, a == b);
                assert!(d <= 18);
            }
        }

        let a = Location::new(2, 7).unwrap();
        let b = Location::new(9, 3).unwrap();
        assert_eq!(a.distance(&b), 11);
    }

    #[test]
    fn random_location_stays_on_grid() {
        for _ in 0..200 {
            let loc = Location::random();
            assert!(loc.validate().is_ok());
        }
    }

    #[test]
    fn equality_is_by_value() {
        assert_eq!(Location::new(1, 1).unwrap(), Location::min());
        assert_ne!(Location::min(), Location::max());
        assert_eq!(Location::new(3, 4).unwrap().to_string(), "(3, 4)");
    }
}
