use crate::error::DomainError;
use delivery_macros::value_object;
use std::fmt;
use std::str::FromStr;

/// 订单状态：Created → Assigned → Completed
#[value_object]
#[derive(Copy, serde::Deserialize)]
pub enum OrderStatus {
    Created,
    Assigned,
    Completed,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Assigned => "Assigned",
            Self::Completed => "Completed",
        }
    }

    /// 终态不会再被任何周期任务修改
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Created" => Ok(Self::Created),
            "Assigned" => Ok(Self::Assigned),
            "Completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidValue { field: "status" }),
        }
    }
}
