//! 领域层统一错误定义
//!
//! 聚焦值校验、对象缺失、领域规则与并发冲突等最小必要集合，
//! 便于在应用层统一转换为 `AppError`。
//!
use thiserror::Error;

/// 错误分类，供上层决定是否告警、是否需要等待下一个周期重试
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 构造器/命令的输入不合法，调用方可自行修正
    Validation,
    /// 没有待处理订单、没有空闲快递员等“无事可做”的预期结果
    NotFound,
    /// 违反领域规则（容量不足、状态不允许等）
    Rule,
    /// 乐观锁冲突：同一聚合被并发的工作单元修改
    Conflict,
    /// 存储等基础设施故障
    Infrastructure,
}

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 值校验 ---
    #[error("value is out of range: {field}={value}, expected {min}..={max}")]
    ValueOutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("value is invalid: {field}")]
    InvalidValue { field: &'static str },
    #[error("value is required: {field}")]
    ValueRequired { field: &'static str },

    // --- 对象缺失 ---
    #[error("not found: {reason}")]
    NotFound { reason: String },

    // --- 领域规则 ---
    #[error("storage place is occupied or less than necessary")]
    StoragePlaceUnavailable,
    #[error("this courier can not take this order")]
    CourierCannotTakeOrder,
    #[error("this courier doesn't carry such order")]
    OrderNotCarried,
    #[error("wrong order status for the action: status={status}, action={action}")]
    WrongOrderStatus {
        status: String,
        action: &'static str,
    },
    #[error("no suitable couriers for this order")]
    NoSuitableCourier,
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    // --- 仓储/持久化 ---
    #[error("version conflict: {aggregate}({id}) expected={expected}, actual={actual}")]
    VersionConflict {
        aggregate: &'static str,
        id: String,
        expected: usize,
        actual: usize,
    },
    #[error("already exists: {aggregate}({id})")]
    AlreadyExists { aggregate: &'static str, id: String },
    #[error("repository error: {reason}")]
    Repository { reason: String },
}

impl DomainError {
    pub fn out_of_range(field: &'static str, value: impl Into<i64>, min: i64, max: i64) -> Self {
        Self::ValueOutOfRange {
            field,
            value: value.into(),
            min,
            max,
        }
    }

    pub fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            reason: format!("{what} {id}"),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ValueOutOfRange { .. } | Self::InvalidValue { .. } | Self::ValueRequired { .. } => {
                ErrorKind::Validation
            }
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::StoragePlaceUnavailable
            | Self::CourierCannotTakeOrder
            | Self::OrderNotCarried
            | Self::WrongOrderStatus { .. }
            | Self::NoSuitableCourier
            | Self::InvalidState { .. } => ErrorKind::Rule,
            Self::VersionConflict { .. } | Self::AlreadyExists { .. } => ErrorKind::Conflict,
            Self::Repository { .. } => ErrorKind::Infrastructure,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

impl From<uuid::Error> for DomainError {
    fn from(_: uuid::Error) -> Self {
        DomainError::InvalidValue { field: "id" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_error_families() {
        assert_eq!(
            DomainError::out_of_range("x", 11u8, 1, 10).kind(),
            ErrorKind::Validation
        );
        assert!(DomainError::not_found("order", "created").is_not_found());
        assert_eq!(DomainError::NoSuitableCourier.kind(), ErrorKind::Rule);
        assert_eq!(
            DomainError::VersionConflict {
                aggregate: "courier",
                id: "c-1".into(),
                expected: 1,
                actual: 2,
            }
            .kind(),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn messages_are_readable() {
        let err = DomainError::out_of_range("speed", 7, 1, 5);
        assert_eq!(
            err.to_string(),
            "value is out of range: speed=7, expected 1..=5"
        );
        assert_eq!(
            DomainError::StoragePlaceUnavailable.to_string(),
            "storage place is occupied or less than necessary"
        );
    }
}
