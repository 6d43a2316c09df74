//! # hitchart-app
//!
//! hitchart CLI 바이너리 진입점.
//! 설정 로드 → CLI 인자 적용 → 메트릭 조회 → 도넛 차트 1회 렌더링 → 출력.

mod job;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hitchart_core::config::AppConfig;
use hitchart_core::config_manager::ConfigManager;
use hitchart_core::models::metrics::RatioPolicy;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::job::{RenderJob, RenderedChart};

/// 출력 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// 도넛 차트 SVG 문서
    Svg,
    /// 차트 라이브러리 설정 JSON
    Json,
}

/// hit ratio 도넛 차트 렌더러
///
/// 메트릭 엔드포인트에서 hit_ratio를 한 번 조회해 도넛 차트로 그린다.
#[derive(Parser, Debug)]
#[command(name = "hitchart")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 메트릭 엔드포인트 URL (기본: http://localhost:8080/api/metrics)
    #[arg(long, short = 'e')]
    endpoint: Option<String>,

    /// 드로잉 표면 식별자 (기본: errorChart)
    #[arg(long)]
    canvas_id: Option<String>,

    /// 출력 파일 경로 (없으면 표준 출력)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// 출력 형식
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 범위 밖 hit ratio 처리 정책 (reject, clamp, pass-through)
    #[arg(long)]
    policy: Option<RatioPolicy>,

    /// 요청 타임아웃 (밀리초)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// 재시도 횟수
    #[arg(long)]
    max_retries: Option<u32>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

impl Args {
    /// 설정 파일 값 위에 CLI 인자를 덮어쓴다
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.server.endpoint = endpoint.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.server.request_timeout_ms = timeout_ms;
        }
        if let Some(max_retries) = self.max_retries {
            config.server.max_retries = max_retries;
        }
        if let Some(canvas_id) = &self.canvas_id {
            config.chart.canvas_id = canvas_id.clone();
        }
        if let Some(policy) = self.policy {
            config.chart.ratio_policy = policy;
        }
    }
}

/// 설정 로드 (경로 지정 시 실패하면 에러, 기본 경로 실패 시 기본값)
fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => {
            let manager = ConfigManager::with_path(path.clone())
                .with_context(|| format!("설정 로드 실패: {}", path.display()))?;
            Ok(manager.get())
        }
        None => match ConfigManager::new() {
            Ok(manager) => Ok(manager.get()),
            Err(e) => {
                warn!("기본 설정 파일 사용 불가, 기본값으로 진행: {e}");
                Ok(AppConfig::default_config())
            }
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout은 차트 출력에 쓰므로 로그는 stderr로
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_config(args.config.as_ref())?;
    args.apply_to(&mut config);

    let job = RenderJob::from_config(&config)?;
    let rendered = job.run().await.map_err(|e| {
        error!("차트 렌더링 실패: {e}");
        e
    })?;

    let stdout = std::io::stdout();
    emit_output(
        &rendered,
        args.format,
        args.output.as_deref(),
        &mut stdout.lock(),
    )
}

/// 렌더링 결과를 파일 또는 `out`에 기록
///
/// SVG 파일 저장은 표면의 `write_to`를 거친다.
fn emit_output(
    rendered: &RenderedChart,
    format: OutputFormat,
    path: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    match (format, path) {
        (OutputFormat::Svg, Some(path)) => rendered
            .surface
            .write_to(path)
            .with_context(|| format!("출력 파일 저장 실패: {}", path.display()))?,
        (OutputFormat::Json, Some(path)) => {
            let json = serde_json::to_string_pretty(&rendered.chart)?;
            std::fs::write(path, json)
                .with_context(|| format!("출력 파일 저장 실패: {}", path.display()))?;
        }
        (OutputFormat::Svg, None) => writeln!(out, "{}", rendered.svg()?)?,
        (OutputFormat::Json, None) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&rendered.chart)?)?
        }
    }

    if let Some(path) = path {
        info!("차트 저장 완료: {}", path.display());
    }
    Ok(())
}
