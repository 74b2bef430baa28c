use bon::Builder;

/// 应用层上下文（Application Context）
///
/// 承载一次应用层调用（命令/查询）所需的横切信息：
/// - 关联追踪 `correlation_id`，会写入处理器的 tracing span；
/// - 幂等键 `idempotency_key`，由基础设施层决定是否参与幂等。
///
/// ```rust
/// use delivery_application::context::AppContext;
///
/// let ctx = AppContext::builder()
///     .correlation_id("tick-42".to_string())
///     .build();
/// assert_eq!(ctx.correlation_id(), Some("tick-42"));
/// ```
#[derive(Builder, Clone, Debug, Default)]
pub struct AppContext {
    pub correlation_id: Option<String>,
    pub idempotency_key: Option<String>,
}

impl AppContext {
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }
}
