//! # hitchart-network
//!
//! 메트릭 엔드포인트 HTTP 어댑터.
//! `MetricsSource` 포트를 reqwest로 구현하며, 상태 코드별 에러 매핑과
//! 선택적 재시도(exponential backoff)를 지원한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use hitchart_network::http_client::HttpMetricsClient;
//!
//! let client = HttpMetricsClient::new("http://localhost:8080/api/metrics", timeout)?;
//! let snapshot = client.fetch_snapshot().await?;
//! ```

pub mod http_client;
