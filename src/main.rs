use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use tracing_subscriber::EnvFilter;
use vibedoc::cli::config::ConfigCommands;
use vibedoc::cli::generate::{is_reported, GenerateOptions};
use vibedoc::{ConfigStore, Result};

const LONG_ABOUT: &str = r#"
██╗   ██╗██╗██████╗ ███████╗██████╗  ██████╗  ██████╗
██║   ██║██║██╔══██╗██╔════╝██╔══██╗██╔═══██╗██╔════╝
██║   ██║██║██████╔╝█████╗  ██║  ██║██║   ██║██║
╚██╗ ██╔╝██║██╔══██╗██╔══╝  ██║  ██║██║   ██║██║
 ╚████╔╝ ██║██████╔╝███████╗██████╔╝╚██████╔╝╚██████╗
  ╚═══╝  ╚═╝╚═════╝ ╚══════╝╚═════╝  ╚═════╝  ╚═════╝

AI 기반 PRD, TRD, TODO List 자동 생성 도구

🎯 주요 기능:
  • 대화형 질문을 통한 요구사항 수집
  • PRD (제품요구사항문서) 자동 생성
  • TRD (기술요구사항문서) 자동 생성
  • TODO 목록 자동 생성
  • 설정 관리 (모델, 성능, 비용 최적화)

💡 빠른 시작:
  1. API 키 설정: vibedoc config set openai.api_key sk-...
  2. 모드 선택: vibedoc config mode cheap (또는 expensive)
  3. 문서 생성: vibedoc"#;

#[derive(Parser)]
#[command(name = "vibedoc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AI 기반 PRD, TRD, TODO List 자동 생성 도구", long_about = LONG_ABOUT)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// 상세 출력 모드 (디버깅 정보 표시, app.verbose 설정과 동일)
    #[arg(short, long)]
    verbose: bool,

    /// TRD 생성 건너뛰기 (PRD만 생성)
    #[arg(long)]
    skip_trd: bool,

    /// TODO 생성 건너뛰기 (PRD, TRD만 생성)
    #[arg(long)]
    skip_todo: bool,

    /// 질문 횟수 설정 (1-50, 기본값: app.default_questions)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=50))]
    questions: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// 설정 관리 (API 키, 모델, 성능 옵션 등)
    #[command(subcommand)]
    Config(ConfigCommands),

    /// 셸 자동완성 스크립트 생성
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },

    /// 상세한 사용법과 예시 표시
    Guide,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose || configured_verbose());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");

    if let Err(e) = runtime.block_on(run_async(cli)) {
        if !is_reported(&e) {
            eprintln!("{}", format!("Error: {:#}", e).red());
        }
        std::process::exit(1);
    }
}

/// `app.verbose` from the config file, read before logging is up
fn configured_verbose() -> bool {
    ConfigStore::default_location()
        .map(|store| vibedoc::cli::debug_logging(false, &store))
        .unwrap_or(false)
}

/// stderr logging, `warn` by default and `debug` for this crate when verbose
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "vibedoc=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run_async(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Config(cmd)) => {
            vibedoc::cli::config::run(cmd)?;
        }

        Some(Commands::Completions { shell }) => {
            generate(shell, &mut Cli::command(), "vibedoc", &mut io::stdout());
        }

        Some(Commands::Guide) => {
            vibedoc::cli::guide::run();
        }

        None => {
            // Prompts read Ctrl-C as a key; this covers the waits between them
            tokio::spawn(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    vibedoc::ui::colors::print_goodbye();
                    std::process::exit(0);
                }
            });

            let options = GenerateOptions {
                verbose: cli.verbose,
                skip_trd: cli.skip_trd,
                skip_todo: cli.skip_todo,
                questions: cli.questions,
            };
            vibedoc::cli::generate::run(options).await?;
        }
    }

    Ok(())
}
