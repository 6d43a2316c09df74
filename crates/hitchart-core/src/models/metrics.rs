//! 메트릭 스냅샷 모델.
//!
//! `/api/metrics` 응답 본문에서 `hit_ratio`만 읽어 만든 일회성 값.
//! 나머지 필드는 무시한다.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// 응답 본문의 hit ratio 필드명
pub const HIT_RATIO_FIELD: &str = "hit_ratio";

/// hit ratio 최대값 (퍼센트)
pub const FULL_RATIO: f64 = 100.0;

/// 메트릭 스냅샷 — 렌더링 1회마다 생성되고 차트 생성 후 버려진다
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// 처리된 hit 비율 (0.0 ~ 100.0)
    pub hit_ratio: f64,
}

impl MetricsSnapshot {
    pub fn new(hit_ratio: f64) -> Self {
        Self { hit_ratio }
    }

    /// 100에서 hit ratio를 뺀 나머지
    pub fn remaining(&self) -> f64 {
        FULL_RATIO - self.hit_ratio
    }

    /// 응답 본문(JSON)에서 스냅샷 디코딩
    ///
    /// 누락/null 필드는 `MissingField`, 숫자가 아닌 값은 `InvalidField`,
    /// 범위 처리는 `policy`를 따른다.
    pub fn from_json_body(body: &str, policy: RatioPolicy) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| CoreError::Decode(format!("JSON 파싱 실패: {e}")))?;

        let object = value
            .as_object()
            .ok_or_else(|| CoreError::Decode("응답 본문이 JSON 객체가 아님".to_string()))?;

        let raw = match object.get(HIT_RATIO_FIELD) {
            None | Some(Value::Null) => {
                return Err(CoreError::MissingField(HIT_RATIO_FIELD.to_string()));
            }
            Some(raw) => raw,
        };

        let hit_ratio = raw.as_f64().ok_or_else(|| CoreError::InvalidField {
            field: HIT_RATIO_FIELD.to_string(),
            message: format!("숫자가 아님: {raw}"),
        })?;

        policy.apply(hit_ratio).map(Self::new)
    }
}

/// 범위 밖(0~100) hit ratio 처리 정책
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioPolicy {
    /// 범위 밖이면 `InvalidField` 에러
    #[default]
    Reject,
    /// 0~100으로 잘라냄
    Clamp,
    /// 검증 없이 그대로 사용
    PassThrough,
}

impl RatioPolicy {
    /// 정책 적용
    pub fn apply(self, hit_ratio: f64) -> Result<f64, CoreError> {
        match self {
            RatioPolicy::Reject if !(0.0..=FULL_RATIO).contains(&hit_ratio) => {
                Err(CoreError::InvalidField {
                    field: HIT_RATIO_FIELD.to_string(),
                    message: format!("범위(0~100) 밖의 값: {hit_ratio}"),
                })
            }
            RatioPolicy::Reject | RatioPolicy::PassThrough => Ok(hit_ratio),
            RatioPolicy::Clamp => Ok(hit_ratio.clamp(0.0, FULL_RATIO)),
        }
    }
}

impl FromStr for RatioPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(RatioPolicy::Reject),
            "clamp" => Ok(RatioPolicy::Clamp),
            "pass-through" | "pass_through" | "passthrough" => Ok(RatioPolicy::PassThrough),
            other => Err(CoreError::Config(format!("알 수 없는 ratio 정책: {other}"))),
        }
    }
}

impl fmt::Display for RatioPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RatioPolicy::Reject => "reject",
            RatioPolicy::Clamp => "clamp",
            RatioPolicy::PassThrough => "pass-through",
        };
        f.write_str(name)
    }
}
