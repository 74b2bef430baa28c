use crate::{command::Command, context::AppContext, error::AppResult};
use async_trait::async_trait;

/// 命令总线（Command Bus）
///
/// - 负责根据命令的具体类型路由到对应的处理器；
/// - 该 trait 带有泛型方法，通常以具体实现类型注入使用。
#[async_trait]
pub trait CommandBus: Send + Sync {
    /// 分发命令到对应处理器
    async fn dispatch<C: Command>(&self, ctx: &AppContext, cmd: C) -> AppResult<()>;
}
