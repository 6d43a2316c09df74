//! 메트릭 조회 포트.
//!
//! 구현: `hitchart-network` crate (reqwest)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::metrics::MetricsSnapshot;

/// 메트릭 스냅샷 공급자
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// 엔드포인트 식별자 (로그용)
    fn endpoint(&self) -> &str;

    /// 스냅샷 1회 조회
    async fn fetch_snapshot(&self) -> Result<MetricsSnapshot, CoreError>;
}
