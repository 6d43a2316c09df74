//! hitchart 도메인 모델.
//!
//! 메트릭 엔드포인트 응답과 차트 라이브러리에 전달되는 차트 설정을 정의한다.

pub mod chart;
pub mod metrics;
