//! Yes/no questions, isolated behind a trait so `--yes` (and tests) can
//! bypass the terminal.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

pub trait ConfirmationSource {
    /// Ask a yes/no question. Only `y`/`Y` (after trimming) is affirmative.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Answers every question with yes, without asking.
pub struct AlwaysYes;

impl ConfirmationSource for AlwaysYes {
    fn confirm(&mut self, _question: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Asks on the terminal and reads one line from stdin.
pub struct Interactive;

impl ConfirmationSource for Interactive {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        print!("{question} [y/N] ");
        io::stdout().flush().context("failed to flush stdout")?;
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("failed to read answer")?;
        Ok(is_affirmative(&line))
    }
}

fn is_affirmative(line: &str) -> bool {
    matches!(line.trim(), "y" | "Y")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_yes_never_asks() {
        assert!(AlwaysYes.confirm("destroy everything?").unwrap());
    }

    #[test]
    fn only_y_is_affirmative() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("Y\n"));
        assert!(is_affirmative("  y  "));
        assert!(!is_affirmative("yes\n"));
        assert!(!is_affirmative("n\n"));
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative(""));
    }
}
