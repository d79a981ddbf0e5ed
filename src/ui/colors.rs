//! Pastel palette used for terminal output

use colored::{ColoredString, Colorize};

pub const BANNER: &str = r#"██╗   ██╗██╗██████╗ ███████╗██████╗  ██████╗  ██████╗
██║   ██║██║██╔══██╗██╔════╝██╔══██╗██╔═══██╗██╔════╝
██║   ██║██║██████╔╝█████╗  ██║  ██║██║   ██║██║
╚██╗ ██╔╝██║██╔══██╗██╔══╝  ██║  ██║██║   ██║██║
 ╚████╔╝ ██║██████╔╝███████╗██████╔╝╚██████╔╝╚██████╗
  ╚═══╝  ╚═╝╚═════╝ ╚══════╝╚═════╝  ╚═════╝  ╚═════╝"#;

pub fn pink(s: &str) -> ColoredString {
    s.truecolor(0xFF, 0xB3, 0xBA)
}

pub fn mint(s: &str) -> ColoredString {
    s.truecolor(0xBA, 0xFF, 0xC9)
}

pub fn yellow(s: &str) -> ColoredString {
    s.truecolor(0xFF, 0xFF, 0xBA)
}

pub fn lavender(s: &str) -> ColoredString {
    s.truecolor(0xC8, 0xBF, 0xE7)
}

pub fn blue(s: &str) -> ColoredString {
    s.truecolor(0xB3, 0xE5, 0xFC)
}

pub fn orange(s: &str) -> ColoredString {
    s.truecolor(0xFF, 0xCB, 0xA4)
}

pub fn peach(s: &str) -> ColoredString {
    s.truecolor(0xFF, 0xD7, 0xAF)
}

pub fn light_mint(s: &str) -> ColoredString {
    s.truecolor(0xAF, 0xFF, 0xD7)
}

pub fn light_purple(s: &str) -> ColoredString {
    s.truecolor(0xD7, 0xAF, 0xFF)
}

/// Closing message printed on every user-initiated exit
pub fn print_goodbye() {
    println!("{}", peach("\n\n👋 프로그램을 종료합니다."));
}
