//! hit ratio 차트 렌더러.
//!
//! 조회 → 디코딩 → 차트 생성 → 표면에 그리기. 재시도나 반복 없이 1회 실행.
//! 실패는 `CoreError`로 호출자에게 반환되며, 이 경우 표면은 변경되지 않는다.

use hitchart_core::error::CoreError;
use hitchart_core::models::chart::{ChartConfig, ChartPalette};
use hitchart_core::ports::metrics_source::MetricsSource;
use hitchart_core::ports::surface::DrawingSurface;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 메트릭 소스와 팔레트를 묶은 렌더러
pub struct MetricsChartRenderer {
    source: Arc<dyn MetricsSource>,
    palette: ChartPalette,
}

impl MetricsChartRenderer {
    pub fn new(source: Arc<dyn MetricsSource>) -> Self {
        Self {
            source,
            palette: ChartPalette::default(),
        }
    }

    /// 세그먼트 색상 변경
    pub fn with_palette(mut self, palette: ChartPalette) -> Self {
        self.palette = palette;
        self
    }

    /// hit ratio를 조회해 `surface`에 도넛 차트로 그린다
    ///
    /// 성공 시 그려진 차트 설정을 반환한다.
    pub async fn render_hit_ratio_chart(
        &self,
        surface: &mut dyn DrawingSurface,
    ) -> Result<ChartConfig, CoreError> {
        debug!(
            "hit ratio 차트 렌더링 시작: {} → '{}'",
            self.source.endpoint(),
            surface.surface_id()
        );

        let snapshot = self.source.fetch_snapshot().await.map_err(|e| {
            warn!("메트릭 조회 실패 ({}): {e}", self.source.endpoint());
            e
        })?;

        let chart = ChartConfig::hit_ratio_doughnut(&snapshot, &self.palette);
        surface.draw_chart(&chart)?;

        info!(
            "hit ratio 차트 렌더링 완료: '{}' = {:?}",
            surface.surface_id(),
            chart.values()
        );
        Ok(chart)
    }
}
