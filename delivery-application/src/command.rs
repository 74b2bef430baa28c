/// 应用层命令（Command）
///
/// 表达“意图”的写操作请求，如接收订单、分派订单、推进快递员。
/// - 不返回业务数据，仅表达执行结果（成功/失败）；
/// - 与 [`Query`](crate::query::Query) 相对，`Command` 应避免读写混用。
///
/// 关联常量：
/// - `NAME`：命令的稳定名称，写入 tracing span，也出现在总线的注册/未找到错误中。
pub trait Command: Send + Sync + 'static {
    /// 命令的稳定名称（建议常量字符串，不随重构变化）
    const NAME: &'static str;
}
