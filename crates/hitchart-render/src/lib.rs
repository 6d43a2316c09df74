//! # hitchart-render
//!
//! hit ratio 도넛 차트 렌더러.
//!
//! - [`renderer`] — 조회 → 차트 생성 → 표면에 그리기 (`MetricsChartRenderer`)
//! - [`doughnut`] — 도넛 세그먼트 각도/좌표 계산
//! - [`svg_surface`] — plotters SVG 백엔드 기반 `DrawingSurface` 구현

pub mod doughnut;
pub mod renderer;
pub mod svg_surface;
