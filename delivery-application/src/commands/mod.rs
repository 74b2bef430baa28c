//! 写侧用例：每个命令一个处理器，处理器内“一次工作单元 = 一次事务”
//!
//! 处理器在 `command` span 下运行，span 带上命令名与关联 id。
//! 未找到类结果记为 debug，其余失败记为 warn，之后原样返回给调用方。
//!
mod add_storage_place;
mod assign_orders;
mod create_courier;
mod create_order;
mod move_couriers;

pub use add_storage_place::{AddStoragePlaceCommand, AddStoragePlaceHandler};
pub use assign_orders::{AssignOrdersCommand, AssignOrdersHandler};
pub use create_courier::{CreateCourierCommand, CreateCourierHandler};
pub use create_order::{CreateOrderCommand, CreateOrderHandler};
pub use move_couriers::{MoveCouriersCommand, MoveCouriersHandler};

use crate::{command::Command, context::AppContext, error::AppError};

fn command_span<C: Command>(ctx: &AppContext) -> tracing::Span {
    tracing::info_span!(
        "command",
        name = C::NAME,
        correlation_id = ctx.correlation_id().unwrap_or("-"),
    )
}

fn log_failure<C: Command>(err: &AppError) {
    if err.is_not_found() {
        tracing::debug!(command = C::NAME, reason = %err, "nothing to do");
    } else {
        tracing::warn!(command = C::NAME, error = %err, "command failed");
    }
}
