//! SVG 드로잉 표면.
//!
//! plotters SVG 백엔드로 도넛 차트와 상단 범례를 그린다.
//! 표면 하나에는 차트 하나만 유지되며, 다시 그리면 이전 문서를 덮어쓴다.

use hitchart_core::error::CoreError;
use hitchart_core::models::chart::ChartConfig;
use hitchart_core::ports::surface::DrawingSurface;
use plotters::prelude::*;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::doughnut::{DoughnutLayout, Rgb, LEGEND_HEIGHT};

/// 범례 색상 박스 크기 (px)
const LEGEND_BOX: i32 = 12;

/// 범례 항목 간격 (px)
const LEGEND_ITEM_WIDTH: i32 = 160;

/// 범례 폰트 크기
const LEGEND_FONT_SIZE: u32 = 13;

/// SVG 문서를 메모리에 보관하는 드로잉 표면
#[derive(Debug, Clone)]
pub struct SvgSurface {
    id: String,
    width: u32,
    height: u32,
    document: Option<String>,
    draw_count: u32,
}

impl SvgSurface {
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            document: None,
            draw_count: 0,
        }
    }

    /// 마지막으로 그린 SVG 문서
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// 지금까지 그린 횟수
    pub fn draw_count(&self) -> u32 {
        self.draw_count
    }

    /// SVG 문서를 파일로 저장
    pub fn write_to(&self, path: &Path) -> Result<(), CoreError> {
        let document = self.document.as_deref().ok_or_else(|| {
            CoreError::Render(format!("표면 '{}'에 그려진 차트가 없음", self.id))
        })?;
        fs::write(path, document)?;
        debug!("SVG 저장: {}", path.display());
        Ok(())
    }

    fn render_document(&self, chart: &ChartConfig) -> Result<String, CoreError> {
        let layout = DoughnutLayout::compute(chart, self.width, self.height)?;

        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(render_error)?;

            for arc in &layout.arcs {
                let points = layout.sector_polygon(arc);
                if points.is_empty() {
                    continue;
                }
                root.draw(&Polygon::new(points, to_color(arc.color).filled()))
                    .map_err(render_error)?;
            }

            // 범례: 색상 박스 + "라벨 (값)"
            let legend_y = (LEGEND_HEIGHT / 2.0) as i32;
            let total_width = LEGEND_ITEM_WIDTH * layout.arcs.len() as i32;
            let mut x = (self.width as i32 - total_width).max(0) / 2;
            let font = ("sans-serif", LEGEND_FONT_SIZE).into_font();

            for arc in &layout.arcs {
                root.draw(&Rectangle::new(
                    [
                        (x, legend_y - LEGEND_BOX / 2),
                        (x + LEGEND_BOX, legend_y + LEGEND_BOX / 2),
                    ],
                    to_color(arc.color).filled(),
                ))
                .map_err(render_error)?;

                let text = format!("{} ({})", arc.label, format_value(arc.value));
                root.draw(&Text::new(
                    text,
                    (x + LEGEND_BOX + 6, legend_y - LEGEND_BOX / 2),
                    font.clone(),
                ))
                .map_err(render_error)?;

                x += LEGEND_ITEM_WIDTH;
            }

            root.present().map_err(render_error)?;
        }

        Ok(buf)
    }
}

impl DrawingSurface for SvgSurface {
    fn surface_id(&self) -> &str {
        &self.id
    }

    fn draw_chart(&mut self, chart: &ChartConfig) -> Result<(), CoreError> {
        let document = self.render_document(chart)?;

        if self.document.is_some() {
            warn!("표면 '{}'에 이미 차트가 있음, 덮어씀", self.id);
        }
        self.document = Some(document);
        self.draw_count += 1;

        debug!("표면 '{}'에 차트 그리기 완료 ({}회째)", self.id, self.draw_count);
        Ok(())
    }

    fn has_chart(&self) -> bool {
        self.document.is_some()
    }
}

fn to_color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

/// 정수면 소수점 없이, 아니면 한 자리까지
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn render_error(e: impl Display) -> CoreError {
    CoreError::Render(e.to_string())
}
