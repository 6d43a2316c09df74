//! 도넛 차트 레이아웃.
//!
//! 12시 방향에서 시작해 시계방향으로 세그먼트를 배치한다.
//! 상단에는 범례 영역을 남기고, 안쪽 반지름은 바깥 반지름의 50%.

use hitchart_core::error::CoreError;
use hitchart_core::models::chart::ChartConfig;
use std::f64::consts::TAU;

/// 상단 범례 영역 높이 (px)
pub const LEGEND_HEIGHT: f64 = 32.0;

/// 도넛 바깥 여백 (px)
const PADDING: f64 = 8.0;

/// 안쪽 반지름 비율 (cutout)
const CUTOUT_RATIO: f64 = 0.5;

/// 호를 근사할 때 한 점당 최대 각도 (2도)
const ARC_STEP: f64 = TAU / 180.0;

/// RGB 색상
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#RRGGBB` 또는 `#RGB` 형식 파싱
    pub fn parse_hex(color: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::Render(format!("잘못된 색상 값: {color:?}"));
        let hex = color.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let c = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Rgb(c(0)?, c(1)?, c(2)?))
            }
            _ => Err(invalid()),
        }
    }
}

/// 배치된 세그먼트 하나
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSegment {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
    /// 시작 각도 (라디안, 12시 = 0, 시계방향)
    pub start_angle: f64,
    /// 끝 각도
    pub end_angle: f64,
}

impl ArcSegment {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// 표면 크기에 맞춘 도넛 배치 결과
#[derive(Debug, Clone, PartialEq)]
pub struct DoughnutLayout {
    pub center: (f64, f64),
    pub outer_radius: f64,
    pub inner_radius: f64,
    /// 모든 세그먼트 (값이 0 이하인 세그먼트는 sweep이 0)
    pub arcs: Vec<ArcSegment>,
}

impl DoughnutLayout {
    /// 차트 설정과 표면 크기로 배치 계산
    ///
    /// 음수 값은 0으로 취급하며, 합계가 0이면 모든 세그먼트의 sweep이 0이다.
    pub fn compute(chart: &ChartConfig, width: u32, height: u32) -> Result<Self, CoreError> {
        let (width, height) = (f64::from(width), f64::from(height));
        let chart_height = height - LEGEND_HEIGHT;
        let outer_radius = (width.min(chart_height) / 2.0 - PADDING).max(0.0);
        if outer_radius <= 0.0 {
            return Err(CoreError::Render(format!(
                "표면이 너무 작음: {width}x{height}"
            )));
        }

        let segments = chart.segments();
        let total: f64 = segments.iter().map(|s| s.value.max(0.0)).sum();

        let mut angle = 0.0;
        let mut arcs = Vec::with_capacity(segments.len());
        for segment in &segments {
            let sweep = if total > 0.0 {
                segment.value.max(0.0) / total * TAU
            } else {
                0.0
            };
            arcs.push(ArcSegment {
                label: segment.label.to_string(),
                value: segment.value,
                color: Rgb::parse_hex(segment.color)?,
                start_angle: angle,
                end_angle: angle + sweep,
            });
            angle += sweep;
        }

        Ok(Self {
            center: (width / 2.0, LEGEND_HEIGHT + chart_height / 2.0),
            outer_radius,
            inner_radius: outer_radius * CUTOUT_RATIO,
            arcs,
        })
    }

    /// 각도 → 좌표 (12시 = 0, 시계방향)
    pub fn point_at(&self, radius: f64, angle: f64) -> (f64, f64) {
        let (cx, cy) = self.center;
        (cx + radius * angle.sin(), cy - radius * angle.cos())
    }

    /// 세그먼트 외곽 다각형: 바깥 호(시계방향) → 안쪽 호(반시계방향)
    ///
    /// sweep이 0이면 빈 벡터.
    pub fn sector_polygon(&self, arc: &ArcSegment) -> Vec<(i32, i32)> {
        let sweep = arc.sweep();
        if sweep <= 0.0 {
            return Vec::new();
        }

        let steps = (sweep / ARC_STEP).ceil().max(1.0) as usize;
        let angle_at = |i: usize| arc.start_angle + sweep * (i as f64) / (steps as f64);

        let outer = (0..=steps).map(|i| self.point_at(self.outer_radius, angle_at(i)));
        let inner = (0..=steps)
            .rev()
            .map(|i| self.point_at(self.inner_radius, angle_at(i)));

        outer
            .chain(inner)
            .map(|(x, y)| (x.round() as i32, y.round() as i32))
            .collect()
    }
}
