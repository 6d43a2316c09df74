//! 렌더링 작업 와이어링.
//!
//! `AppConfig` → `HttpMetricsClient` + `MetricsChartRenderer` + `SvgSurface`.

use hitchart_core::config::AppConfig;
use hitchart_core::error::CoreError;
use hitchart_core::models::chart::ChartConfig;
use hitchart_network::http_client::HttpMetricsClient;
use hitchart_render::renderer::MetricsChartRenderer;
use hitchart_render::svg_surface::SvgSurface;
use std::sync::Arc;
use tracing::info;

/// 렌더링 결과
#[derive(Debug)]
pub struct RenderedChart {
    pub chart: ChartConfig,
    pub surface: SvgSurface,
}

impl RenderedChart {
    /// 그려진 SVG 문서
    pub fn svg(&self) -> Result<&str, CoreError> {
        self.surface
            .document()
            .ok_or_else(|| CoreError::Render("렌더링 후 SVG 문서가 비어 있음".to_string()))
    }
}

/// 1회 렌더링 작업
pub struct RenderJob {
    renderer: MetricsChartRenderer,
    canvas_id: String,
    size: (u32, u32),
}

impl RenderJob {
    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        let client = HttpMetricsClient::new(&config.server.endpoint, config.request_timeout())?
            .with_policy(config.chart.ratio_policy)
            .with_max_retries(config.server.max_retries);

        info!(
            "메트릭 엔드포인트: {} (정책: {}, 재시도: {})",
            config.server.endpoint, config.chart.ratio_policy, config.server.max_retries
        );

        let renderer = MetricsChartRenderer::new(Arc::new(client))
            .with_palette(config.chart.palette.clone());

        Ok(Self {
            renderer,
            canvas_id: config.chart.canvas_id.clone(),
            size: (config.chart.width, config.chart.height),
        })
    }

    pub async fn run(&self) -> Result<RenderedChart, CoreError> {
        let (width, height) = self.size;
        let mut surface = SvgSurface::new(self.canvas_id.clone(), width, height);

        let chart = self.renderer.render_hit_ratio_chart(&mut surface).await?;
        Ok(RenderedChart { chart, surface })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_endpoint_fails_fast() {
        let mut config = AppConfig::default_config();
        config.server.endpoint = "localhost/api/metrics".to_string();
        assert!(RenderJob::from_config(&config).is_err());
    }

    #[tokio::test]
    async fn run_against_mock_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/metrics")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"hit_ratio": 88}"#)
            .create_async()
            .await;

        let mut config = AppConfig::default_config();
        config.server.endpoint = format!("{}/api/metrics", server.url());

        let rendered = RenderJob::from_config(&config).unwrap().run().await.unwrap();
        assert_eq!(rendered.chart.values(), &[88.0, 12.0]);
        assert!(rendered.svg().unwrap().contains("Processed Hits (88)"));
        mock.assert_async().await;
    }
}
