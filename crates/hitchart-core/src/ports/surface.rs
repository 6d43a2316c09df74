//! 드로잉 표면 포트.
//!
//! 전역 요소 조회 대신 렌더러에 명시적으로 주입되는 그리기 대상.
//! 구현: `hitchart-render` crate (`SvgSurface`)

use crate::error::CoreError;
use crate::models::chart::ChartConfig;

/// 차트를 그릴 수 있는 표면
pub trait DrawingSurface: Send {
    /// 표면 식별자 (예: "errorChart")
    fn surface_id(&self) -> &str;

    /// 차트 그리기. 이미 그려진 차트가 있으면 덮어쓴다.
    fn draw_chart(&mut self, chart: &ChartConfig) -> Result<(), CoreError>;

    /// 차트가 그려져 있는지 여부
    fn has_chart(&self) -> bool;
}
