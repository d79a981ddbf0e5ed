pub mod config;
pub mod generate;
pub mod guide;

use crate::config::ConfigStore;

/// Debug logs follow `--verbose` or `app.verbose`, like the verbose info screen
pub fn debug_logging(flag: bool, store: &ConfigStore) -> bool {
    flag || store.effective().app.verbose
}

/// Troubleshooting hints printed after an unrecoverable API failure
pub fn print_api_hints() {
    use colored::Colorize;

    eprintln!("{}", "💡 다음 사항을 확인해주세요:".yellow());
    eprintln!("  - OpenAI API 키가 올바르게 설정되었는지");
    eprintln!("  - 인터넷 연결이 정상인지");
    eprintln!("  - API 사용량 제한에 걸리지 않았는지");
}
