//! # yttv-app
//!
//! YT-TV 셸 바이너리 진입점.
//! DI 컨테이너 역할, 입력 라우팅, 라이프사이클 관리.

mod input;
mod lifecycle;
mod paths;
mod process;
mod surface;

use anyhow::Result;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use yttv_core::config::AppConfig;
use yttv_core::config_store::ConfigurationStore;
use yttv_session::SessionResetController;
use yttv_storage::preferences::JsonPreferenceFile;
use yttv_storage::web_data::WebDataStore;

use crate::input::{Dispatch, InputRouter};
use crate::lifecycle::{LifecycleManager, ShutdownReason};
use crate::paths::resolve_paths;
use crate::process::ProcessExit;
use crate::surface::HeadlessSurface;

/// YT-TV 셸
///
/// TV 인터페이스를 전환 가능한 User-Agent로 띄우는 단일 화면 셸
#[derive(Parser, Debug)]
#[command(name = "yttv")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON 설정 파일 경로
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 대상 URL (기본: https://youtube.com/tv)
    #[arg(long, short = 'u')]
    url: Option<String>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l')]
    log_level: Option<String>,

    /// 데이터 저장 경로 (기본: 플랫폼 디렉토리)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// 캐시 비우기 후 종료 대신 재실행
    #[arg(long)]
    relaunch_on_empty_cache: bool,

    /// 시작 안내 생략
    #[arg(long)]
    no_welcome: bool,
}

/// 설정 파일 로드 후 CLI 인자로 덮어쓰기
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default_config(),
    };

    if let Some(url) = &args.url {
        config.shell.target_url = url.clone();
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.relaunch_on_empty_cache {
        config.shell.relaunch_on_empty_cache = true;
    }
    if args.no_welcome {
        config.shell.show_welcome = false;
    }

    config.validate()?;
    Ok(config)
}

/// 시작 안내 출력
fn print_welcome() {
    println!();
    println!("┌─────────────────────────────────────────────────────────────────┐");
    println!("│ 📺 YT-TV                                                        │");
    println!("├─────────────────────────────────────────────────────────────────┤");
    println!("│ 키보드 또는 컨트롤러로 조작합니다.                              │");
    println!("│ - 키보드: 방향키 + Enter                                        │");
    println!("│ - 컨트롤러: 조이스틱/방향 버튼 + 주 버튼 (Xbox A, PS X)         │");
    println!("├─────────────────────────────────────────────────────────────────┤");
    println!("│ 캐시 비우기: empty-cache 또는 shake                             │");
    println!("│ 프로필 변경: profile <0|1|-1> [agent]                           │");
    println!("└─────────────────────────────────────────────────────────────────┘");
    println!();
}

/// 표준 입력 읽기 스레드
///
/// 블로킹 읽기가 런타임 종료를 막지 않도록 전용 스레드에서 읽는다.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("표준 입력 읽기 실패: {e}");
                    break;
                }
            }
        }
    });
    rx
}

/// 입력 루프. 입력이 끝나거나 `quit`이면 종료 신호를 보낸다.
async fn run_input_loop(
    router: InputRouter,
    mut lines: mpsc::Receiver<String>,
    lifecycle: Arc<LifecycleManager>,
) {
    while let Some(line) = lines.recv().await {
        match router.handle_line(&line).await {
            Dispatch::Reply(text) if text.is_empty() => {}
            Dispatch::Reply(text) => println!("{text}"),
            Dispatch::Quit => break,
        }
    }
    lifecycle.shutdown(ShutdownReason::UserQuit);
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    let level = &config.logging.level;
    let log_filter = format!(
        "yttv={level},yttv_app={level},yttv_core={level},yttv_storage={level},yttv_session={level}"
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    if config.shell.show_welcome {
        print_welcome();
    }

    info!("YT-TV 셸 시작");

    let paths = resolve_paths(&config.storage, args.data_dir.as_deref());
    info!(
        preferences = %paths.preferences.display(),
        web_data = %paths.web_data.display(),
        "저장 경로"
    );

    // 어댑터 생성
    let store = Arc::new(ConfigurationStore::open(Arc::new(JsonPreferenceFile::new(
        paths.preferences.clone(),
    ))));
    let web_data = Arc::new(WebDataStore::new(paths.web_data.clone()));
    let surface = Arc::new(HeadlessSurface::new());
    let lifecycle = Arc::new(LifecycleManager::new());
    let process = Arc::new(ProcessExit::new(
        lifecycle.clone(),
        config.shell.relaunch_on_empty_cache,
    ));

    let controller = Arc::new(SessionResetController::new(
        store,
        web_data,
        surface.clone(),
        process,
        config.shell.target_url.clone(),
    ));

    // 남은 리셋 처리 후 초기 로드
    match controller.launch().await {
        Ok(outcome) => info!(?outcome, "초기 로드 완료"),
        Err(e) => error!("초기 로드 실패: {e}"),
    }

    let router = InputRouter::new(controller, surface);
    tokio::spawn(run_input_loop(
        router,
        spawn_stdin_reader(),
        lifecycle.clone(),
    ));

    let signal_lifecycle = lifecycle.clone();
    tokio::spawn(async move {
        if let Err(e) = signal_lifecycle.wait_for_signal().await {
            warn!("시그널 핸들러 등록 실패: {e}");
        }
    });

    let mut shutdown_rx = lifecycle.subscribe();
    if let Err(e) = shutdown_rx.wait_for(|reason| reason.is_some()).await {
        error!("종료 신호 채널 닫힘: {e}");
    }

    info!(reason = ?lifecycle.reason(), "YT-TV 셸 종료");
    Ok(())
}
