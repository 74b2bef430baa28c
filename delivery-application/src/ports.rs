//! 出站端口：应用层依赖、由基础设施实现的外部能力
//!
use crate::error::AppResult;
use async_trait::async_trait;
use delivery_domain::kernel::Location;

/// 地理编码服务：把街道地址解析为网格坐标
///
/// 调用失败时实现方返回 `AppError::Infra`。
#[async_trait]
pub trait GeoClient: Send + Sync {
    async fn locate(&self, street: &str) -> AppResult<Location>;
}

/// 不访问外部服务，为任意地址返回网格内的随机坐标
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomGeoClient;

#[async_trait]
impl GeoClient for RandomGeoClient {
    async fn locate(&self, _street: &str) -> AppResult<Location> {
        Ok(Location::random())
    }
}
