//! HTTP 메트릭 클라이언트.
//!
//! `MetricsSource` 포트 구현. 단일 GET 요청 → 상태 코드 확인 → JSON 디코딩.

use async_trait::async_trait;
use hitchart_core::error::CoreError;
use hitchart_core::models::metrics::{MetricsSnapshot, RatioPolicy};
use hitchart_core::ports::metrics_source::MetricsSource;
use std::time::Duration;
use tracing::{debug, warn};

/// 기본 재시도 횟수 (재시도 없음)
const DEFAULT_MAX_RETRIES: u32 = 0;

/// Retry-After 헤더가 없을 때 429 대기 시간 (초)
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// 최대 backoff 지연
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// 메트릭 엔드포인트 클라이언트 — `MetricsSource` 포트 구현
pub struct HttpMetricsClient {
    client: reqwest::Client,
    endpoint: String,
    policy: RatioPolicy,
    max_retries: u32,
    initial_backoff: Duration,
}

impl HttpMetricsClient {
    /// 새 클라이언트 생성
    ///
    /// `endpoint`는 http/https 절대 URL이어야 한다.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, CoreError> {
        let parsed = url::Url::parse(endpoint)
            .map_err(|e| CoreError::Config(format!("잘못된 엔드포인트 URL '{endpoint}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CoreError::Config(format!(
                "지원하지 않는 스킴: {}",
                parsed.scheme()
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            endpoint: parsed.to_string(),
            policy: RatioPolicy::default(),
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: Duration::from_secs(1),
        })
    }

    /// 범위 밖 hit ratio 처리 정책 설정
    pub fn with_policy(mut self, policy: RatioPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 재시도 횟수 설정
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// 첫 재시도 대기 시간 설정 (이후 2배씩 증가)
    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    /// 응답 상태 코드 확인 및 에러 매핑
    async fn check_response(&self, resp: reqwest::Response) -> Result<reqwest::Response, CoreError> {
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        let retry_after = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let status_code = status.as_u16();
        let text = resp.text().await.unwrap_or_else(|e| {
            warn!("응답 본문 읽기 실패: {e}");
            String::new()
        });

        match status_code {
            404 => Err(CoreError::NotFound {
                resource_type: "Metrics".to_string(),
                id: self.endpoint.clone(),
            }),
            429 => Err(CoreError::RateLimit {
                retry_after_secs: retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
            }),
            503 => Err(CoreError::ServiceUnavailable(text)),
            _ => Err(CoreError::HttpStatus {
                status: status_code,
                body: text,
            }),
        }
    }

    /// 요청 1회: GET → 상태 확인 → 디코딩
    async fn fetch_once(&self) -> Result<MetricsSnapshot, CoreError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("메트릭 요청 실패: {e}")))?;

        let resp = self.check_response(resp).await?;
        let body = resp
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("응답 본문 수신 실패: {e}")))?;

        MetricsSnapshot::from_json_body(&body, self.policy)
    }

    /// 재시도가 포함된 요청 실행
    ///
    /// exponential backoff: initial → x2 → x4 ... (최대 30초)
    async fn execute_with_retry<F, Fut, T>(&self, operation: F) -> Result<T, CoreError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let mut delay = self.initial_backoff;
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if !e.is_retryable() || attempt >= self.max_retries => return Err(e),
                Err(e) => {
                    attempt += 1;

                    let wait = retry_wait(&e, delay);

                    warn!(
                        "메트릭 요청 실패 (시도 {}/{}): {e}, {wait:?} 후 재시도",
                        attempt,
                        self.max_retries.saturating_add(1)
                    );

                    tokio::time::sleep(wait).await;
                    delay = (delay * 2).min(MAX_BACKOFF);
                }
            }
        }
    }
}

/// 다음 재시도까지 대기 시간
///
/// RateLimit은 서버 지정 시간을 쓰되 `MAX_BACKOFF`를 넘지 않는다.
fn retry_wait(error: &CoreError, backoff: Duration) -> Duration {
    match error {
        CoreError::RateLimit { retry_after_secs } => {
            Duration::from_secs(*retry_after_secs).min(MAX_BACKOFF)
        }
        _ => backoff,
    }
}

#[async_trait]
impl MetricsSource for HttpMetricsClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_snapshot(&self) -> Result<MetricsSnapshot, CoreError> {
        debug!("메트릭 조회: {}", self.endpoint);

        let snapshot = self.execute_with_retry(|| self.fetch_once()).await?;

        debug!("메트릭 조회 성공: hit_ratio={}", snapshot.hit_ratio);
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn client_for(server: &mockito::ServerGuard) -> HttpMetricsClient {
        let endpoint = format!("{}/api/metrics", server.url());
        HttpMetricsClient::new(&endpoint, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn client_creation() {
        let client =
            HttpMetricsClient::new("http://localhost:8080/api/metrics", Duration::from_secs(30))
                .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/api/metrics");
        assert_eq!(client.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(client.policy, RatioPolicy::Reject);
    }

    #[test]
    fn builder_options() {
        let client =
            HttpMetricsClient::new("https://metrics.example.com/api/metrics", Duration::from_secs(1))
                .unwrap()
                .with_max_retries(3)
                .with_policy(RatioPolicy::Clamp);
        assert_eq!(client.max_retries, 3);
        assert_eq!(client.policy, RatioPolicy::Clamp);
    }

    #[test]
    fn rejects_invalid_endpoint() {
        let err = HttpMetricsClient::new("not a url", Duration::from_secs(1)).err();
        assert_matches!(err, Some(CoreError::Config(_)));

        let err = HttpMetricsClient::new("ftp://host/api/metrics", Duration::from_secs(1)).err();
        assert_matches!(err, Some(CoreError::Config(_)));
    }

    #[tokio::test]
    async fn fetch_snapshot_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/metrics")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"hit_ratio": 73, "total_logs": 5000}"#)
            .create_async()
            .await;

        let snapshot = client_for(&server).fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.hit_ratio, 73.0);
        assert_eq!(snapshot.remaining(), 27.0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_surfaces_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/metrics")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let err = client_for(&server).fetch_snapshot().await.unwrap_err();
        assert_matches!(err, CoreError::HttpStatus { status: 500, .. });
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn not_found_404() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/metrics")
            .with_status(404)
            .create_async()
            .await;

        let err = client_for(&server).fetch_snapshot().await.unwrap_err();
        assert_matches!(err, CoreError::NotFound { .. });
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rate_limit_429_reads_retry_after() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/metrics")
            .with_status(429)
            .with_header("retry-after", "7")
            .create_async()
            .await;

        let err = client_for(&server).fetch_snapshot().await.unwrap_err();
        assert_matches!(err, CoreError::RateLimit { retry_after_secs: 7 });
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn invalid_json_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/metrics")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = client_for(&server).fetch_snapshot().await.unwrap_err();
        assert_matches!(err, CoreError::Decode(_));
    }

    #[tokio::test]
    async fn missing_hit_ratio() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/metrics")
            .with_status(200)
            .with_body(r#"{"accuracy": 97.2}"#)
            .create_async()
            .await;

        let err = client_for(&server).fetch_snapshot().await.unwrap_err();
        assert_matches!(err, CoreError::MissingField(_));
    }

    #[tokio::test]
    async fn policy_applied_to_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/metrics")
            .with_status(200)
            .with_body(r#"{"hit_ratio": 140}"#)
            .expect(2)
            .create_async()
            .await;

        let err = client_for(&server).fetch_snapshot().await.unwrap_err();
        assert_matches!(err, CoreError::InvalidField { .. });

        let snapshot = client_for(&server)
            .with_policy(RatioPolicy::Clamp)
            .fetch_snapshot()
            .await
            .unwrap();
        assert_eq!(snapshot.hit_ratio, 100.0);
    }

    #[tokio::test]
    async fn retries_service_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/metrics")
            .with_status(503)
            .with_body("warming up")
            .expect(3)
            .create_async()
            .await;

        let client = client_for(&server)
            .with_max_retries(2)
            .with_initial_backoff(Duration::from_millis(10));

        let err = client.fetch_snapshot().await.unwrap_err();
        assert_matches!(err, CoreError::ServiceUnavailable(body) if body == "warming up");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn decode_errors_are_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/metrics")
            .with_status(200)
            .with_body("not json")
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server)
            .with_max_retries(3)
            .with_initial_backoff(Duration::from_millis(10));

        let err = client.fetch_snapshot().await.unwrap_err();
        assert_matches!(err, CoreError::Decode(_));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn no_retry_by_default() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/metrics")
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        let err = client_for(&server).fetch_snapshot().await.unwrap_err();
        assert_matches!(err, CoreError::ServiceUnavailable(_));
        mock.assert_async().await;
    }

    #[test]
    fn retry_wait_caps_server_retry_after() {
        let backoff = Duration::from_millis(250);

        let long = CoreError::RateLimit {
            retry_after_secs: 3_600,
        };
        assert_eq!(retry_wait(&long, backoff), MAX_BACKOFF);

        let short = CoreError::RateLimit {
            retry_after_secs: 2,
        };
        assert_eq!(retry_wait(&short, backoff), Duration::from_secs(2));

        let network = CoreError::Network("reset".to_string());
        assert_eq!(retry_wait(&network, backoff), backoff);
    }

    #[tokio::test]
    async fn max_retries_upper_bound_logs_without_overflow() {
        // warn! 인자는 구독자가 있을 때만 평가된다
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/metrics")
            .with_status(503)
            .expect_at_least(2)
            .create_async()
            .await;

        let client = client_for(&server)
            .with_max_retries(u32::MAX)
            .with_initial_backoff(Duration::from_millis(5));

        // 재시도가 끝나지 않으므로 시간 제한으로 끊는다
        let result =
            tokio::time::timeout(Duration::from_millis(200), client.fetch_snapshot()).await;
        assert!(result.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn stalled_endpoint_times_out_as_network_error() {
        // 연결은 받지만 응답하지 않는 서버
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let endpoint = format!("http://{addr}/api/metrics");
        let client = HttpMetricsClient::new(&endpoint, Duration::from_millis(100)).unwrap();

        let started = std::time::Instant::now();
        let err = client.fetch_snapshot().await.unwrap_err();
        assert_matches!(err, CoreError::Network(_));
        assert!(started.elapsed() < Duration::from_secs(5));

        server.abort();
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        // 바인딩 후 즉시 닫은 포트
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = format!("http://{addr}/api/metrics");
        let client = HttpMetricsClient::new(&endpoint, Duration::from_secs(2)).unwrap();
        let err = client.fetch_snapshot().await.unwrap_err();
        assert_matches!(err, CoreError::Network(_));
    }
}
