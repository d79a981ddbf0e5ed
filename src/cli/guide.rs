//! Extended usage guide

use crate::config::ConfigStore;
use colored::Colorize;

pub fn run() {
    let config_path = ConfigStore::default_location()
        .map(|store| store.path().display().to_string())
        .unwrap_or_else(|_| "~/.vibedoc.toml".to_string());

    println!("{}", "\n🌟 VibeDOC - AI 문서 생성 도구\n".blue().bold());

    println!("{}", "📚 문서 생성:".cyan());
    println!("  vibedoc                    # 대화형 문서 생성 시작");
    println!("  vibedoc -v                 # 상세 출력 모드 (디버깅용)");
    println!("  vibedoc -q 5               # 질문 5개로 빠른 생성");
    println!("  vibedoc --questions 15     # 질문 15개로 상세 생성");
    println!("  vibedoc --skip-trd         # PRD만 생성 (TRD 건너뛰기)");
    println!("  vibedoc --skip-todo        # PRD+TRD만 생성 (TODO 건너뛰기)\n");

    println!("{}", "⚙️  설정 관리:".cyan());
    println!("  vibedoc config mode        # 현재 모드 확인");
    println!("  vibedoc config mode cheap  # 💰 빠르고 경제적 (gpt-5-mini)");
    println!("  vibedoc config mode expensive  # 💎 고품질 (gpt-5)");
    println!("  vibedoc config set openai.api_key sk-...  # API 키 설정");
    println!("  vibedoc config get         # 모든 설정 조회");
    println!("  vibedoc config list        # 사용 가능한 설정 키");
    println!("  vibedoc config reset       # 설정 초기화\n");

    println!("{}", "🚀 빠른 시작 가이드:".green());
    println!("  1️⃣  API 키 설정    → vibedoc config set openai.api_key sk-...");
    println!("  2️⃣  모드 선택      → vibedoc config mode cheap");
    println!("  3️⃣  문서 생성      → vibedoc\n");

    println!("{}", "📁 생성되는 파일:".yellow());
    println!("  📄 prd.md         # 제품요구사항문서 (Product Requirements)");
    println!("  🔧 trd.md         # 기술요구사항문서 (Technical Requirements)");
    println!("  ✅ todo.md        # 개발 할일 목록 (Development Tasks)\n");

    println!("{}", "🔧 고급:".cyan());
    println!("  vibedoc guide              # 이 도움말 표시");
    println!("  vibedoc completions zsh    # 셸 자동완성 스크립트 출력");
    println!("  vibedoc --version          # 버전 정보\n");

    println!("{}", "💡 팁:".dimmed());
    println!("{}", "  • cheap 모드: 빠르고 저렴한 문서 생성 (프로토타입용)".dimmed());
    println!("{}", "  • expensive 모드: 고품질 문서 생성 (실제 프로젝트용)".dimmed());
    println!("{}{}", "  • 설정 파일: ".dimmed(), config_path);
    println!("{}", "  • 환경변수로 일시적 오버라이드 가능 (OPENAI_*)\n".dimmed());
}
