//! 차트 설정 모델.
//!
//! 차트 라이브러리의 `createChart(context, config)` 설정 객체와 같은 형태로
//! 직렬화된다. `{"type":"doughnut","data":{"labels":[..],"datasets":[..]}}`

use serde::{Deserialize, Serialize};

use super::metrics::MetricsSnapshot;

/// 처리된 hit 세그먼트 라벨
pub const PROCESSED_LABEL: &str = "Processed Hits";

/// 나머지 세그먼트 라벨
pub const REMAINING_LABEL: &str = "Remaining";

/// 차트 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Doughnut,
}

/// 세그먼트 색상 팔레트
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPalette {
    /// "Processed Hits" 색상
    #[serde(default = "default_processed_color")]
    pub processed: String,
    /// "Remaining" 색상
    #[serde(default = "default_remaining_color")]
    pub remaining: String,
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            processed: default_processed_color(),
            remaining: default_remaining_color(),
        }
    }
}

fn default_processed_color() -> String {
    "#36A2EB".to_string()
}

fn default_remaining_color() -> String {
    "#FF6384".to_string()
}

/// 데이터셋 하나 (세그먼트 값 + 색상)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub data: Vec<f64>,
    #[serde(rename = "backgroundColor")]
    pub background_color: Vec<String>,
}

/// 라벨 + 데이터셋 묶음
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// 차트 설정 — 렌더링 결과로 호출자에게 반환된다
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartData,
}

/// 그리기용 세그먼트 뷰
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    pub label: &'a str,
    pub value: f64,
    pub color: &'a str,
}

impl ChartConfig {
    /// hit ratio 도넛 차트 생성: `[hit_ratio, 100 - hit_ratio]`
    pub fn hit_ratio_doughnut(snapshot: &MetricsSnapshot, palette: &ChartPalette) -> Self {
        Self {
            chart_type: ChartType::Doughnut,
            data: ChartData {
                labels: vec![PROCESSED_LABEL.to_string(), REMAINING_LABEL.to_string()],
                datasets: vec![Dataset {
                    data: vec![snapshot.hit_ratio, snapshot.remaining()],
                    background_color: vec![palette.processed.clone(), palette.remaining.clone()],
                }],
            },
        }
    }

    /// 첫 번째 데이터셋의 값 목록 (없으면 빈 슬라이스)
    pub fn values(&self) -> &[f64] {
        self.data
            .datasets
            .first()
            .map(|d| d.data.as_slice())
            .unwrap_or(&[])
    }

    /// 첫 번째 데이터셋을 라벨/색상과 묶어 세그먼트로 반환
    ///
    /// 라벨이나 색상이 부족한 세그먼트는 빈 문자열을 받는다.
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let Some(dataset) = self.data.datasets.first() else {
            return Vec::new();
        };

        dataset
            .data
            .iter()
            .enumerate()
            .map(|(i, &value)| Segment {
                label: self.data.labels.get(i).map(String::as_str).unwrap_or(""),
                value,
                color: dataset
                    .background_color
                    .get(i)
                    .map(String::as_str)
                    .unwrap_or(""),
            })
            .collect()
    }
}
