//! 애플리케이션 설정 구조체.
//!
//! 메트릭 엔드포인트, 요청 타임아웃, 차트 표면/팔레트/범위 정책 등
//! 런타임 설정을 정의한다. [`crate::config_manager`]를 통해 JSON 파일에서 로드.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::chart::ChartPalette;
use crate::models::metrics::RatioPolicy;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 메트릭 서버 연결 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 차트 설정
    #[serde(default)]
    pub chart: ChartSettings,
}

/// 메트릭 서버 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 메트릭 엔드포인트 URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// 재시도 횟수 (0이면 재시도 없음)
    #[serde(default)]
    pub max_retries: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_ms: default_request_timeout_ms(),
            max_retries: 0,
        }
    }
}

/// 차트 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSettings {
    /// 드로잉 표면 식별자
    #[serde(default = "default_canvas_id")]
    pub canvas_id: String,
    /// 표면 너비 (px)
    #[serde(default = "default_surface_size")]
    pub width: u32,
    /// 표면 높이 (px)
    #[serde(default = "default_surface_size")]
    pub height: u32,
    /// 범위 밖 hit ratio 처리 정책
    #[serde(default)]
    pub ratio_policy: RatioPolicy,
    /// 세그먼트 색상
    #[serde(default)]
    pub palette: ChartPalette,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            canvas_id: default_canvas_id(),
            width: default_surface_size(),
            height: default_surface_size(),
            ratio_policy: RatioPolicy::default(),
            palette: ChartPalette::default(),
        }
    }
}

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            chart: ChartSettings::default(),
        }
    }

    /// 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.request_timeout_ms)
    }
}

fn default_endpoint() -> String {
    "http://localhost:8080/api/metrics".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_canvas_id() -> String {
    "errorChart".to_string()
}

fn default_surface_size() -> u32 {
    400
}
