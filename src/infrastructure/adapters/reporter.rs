//! 콘솔 리포터 포트 구현 어댑터.

use std::io::{self, IsTerminal};

use crate::application::ports::Reporter;

/// 콘솔 전용 리포터 어댑터.
pub struct ConsoleReporter {
    interactive: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    /// stdout이 TTY일 때만 상태 색상을 사용한다.
    pub fn new() -> Self {
        Self {
            interactive: io::stdout().is_terminal(),
        }
    }

    fn paint(&self, message: &str) -> String {
        if !self.interactive {
            return message.to_string();
        }
        colorize_status(message)
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, name: &str) {
        println!();
        println!("==================== {} ====================", name);
    }

    fn kv(&self, key: &str, value: &str) {
        println!("{:<12}: {}", key, value);
    }

    fn status(&self, scope: &str, message: &str) {
        println!("[{:<12}] {}", scope, self.paint(message));
    }

    fn raw(&self, line: &str) {
        println!("{}", line);
    }
}

fn colorize_status(message: &str) -> String {
    let (word, rest) = message.split_once(' ').unwrap_or((message, ""));
    let color = match word.trim_end_matches(':') {
        "written" => "32",
        "unchanged" => "36",
        "failed" => "31",
        "previous" => "33",
        _ => return message.to_string(),
    };
    if rest.is_empty() {
        format!("\x1b[{color}m{word}\x1b[0m")
    } else {
        format!("\x1b[{color}m{word}\x1b[0m {rest}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_only_known_leading_words() {
        assert_eq!(colorize_status("written /a"), "\x1b[32mwritten\x1b[0m /a");
        assert_eq!(colorize_status("failed: boom"), "\x1b[31mfailed:\x1b[0m boom");
        assert_eq!(colorize_status("other text"), "other text");
    }
}
