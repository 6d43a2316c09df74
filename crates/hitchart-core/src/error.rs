//! hitchart 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 이 에러 타입을 그대로 반환한다.
//! 조회 → 디코딩 → 렌더링 각 단계의 실패가 서로 다른 variant로 구분된다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 2xx가 아닌 HTTP 응답
    #[error("HTTP 에러 ({status}): {body}")]
    HttpStatus {
        /// 응답 상태 코드
        status: u16,
        /// 응답 본문 (읽기 실패 시 빈 문자열)
        body: String,
    },

    /// 리소스를 찾을 수 없음 (404)
    #[error("{resource_type} 미발견: {id}")]
    NotFound {
        /// 리소스 종류 (예: "Metrics")
        resource_type: String,
        /// 리소스 식별자 (요청 URL)
        id: String,
    },

    /// Rate Limit 초과 (429)
    #[error("요청 한도 초과, {retry_after_secs}초 후 재시도")]
    RateLimit {
        /// 재시도 대기 시간 (초)
        retry_after_secs: u64,
    },

    /// 서비스 일시 불가 (503)
    #[error("서비스 일시 불가: {0}")]
    ServiceUnavailable(String),

    /// 응답 본문이 JSON 객체가 아님
    #[error("디코딩 에러: {0}")]
    Decode(String),

    /// 필수 필드 누락 (없거나 null)
    #[error("필드 누락: {0}")]
    MissingField(String),

    /// 필드 값이 잘못됨 (숫자가 아니거나 범위 밖)
    #[error("잘못된 필드 — {field}: {message}")]
    InvalidField {
        /// 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 드로잉 표면 렌더링 실패
    #[error("렌더링 에러: {0}")]
    Render(String),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// 재시도하면 성공할 수 있는 에러인지 판별
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CoreError::Network(_) | CoreError::ServiceUnavailable(_) | CoreError::RateLimit { .. }
        )
    }
}
