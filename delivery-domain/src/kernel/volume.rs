use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;
use delivery_macros::value_object;
use std::fmt;

pub const MIN_VOLUME: i32 = 1;

/// 容量（正整数）
#[value_object]
#[derive(Copy, PartialOrd, Ord)]
pub struct Volume(i32);

impl Volume {
    pub fn new(size: i32) -> DomainResult<Self> {
        if size < MIN_VOLUME {
            return Err(DomainError::InvalidValue { field: "volume" });
        }
        Ok(Self(size))
    }

    // 仅用于编译期已知合法的常量
    pub(crate) const fn new_unchecked(size: i32) -> Self {
        Self(size)
    }

    pub const fn value(&self) -> i32 {
        self.0
    }

    /// 当前容量能否放进 `target` 之内
    pub fn fits_to(&self, target: &Volume) -> bool {
        self.0 <= target.0
    }
}

impl ValueObject for Volume {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        Self::new(self.0).map(|_| ())
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
