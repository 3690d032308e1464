//! User interaction operations (confirmation prompts, menus, messages).

use anyhow::Result;

use std::io::{self, BufRead, Write};

/// Interactive capability used by the uninstaller.
///
/// The console implementation talks to stdin/stdout; tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
pub trait UserInteraction {
    /// Ask a yes/no question. An empty answer yields `default`.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;

    /// Present a numbered list and return the chosen label and its 0-based index.
    ///
    /// Either part is `None` when the answer does not name an entry.
    fn choose_one(&self, prompt: &str, labels: &[String])
    -> Result<(Option<String>, Option<usize>)>;

    /// Show an informational message.
    fn notify(&self, message: &str);
}

/// Reads from any BufRead and writes to any Write so tests can drive it directly.
pub(crate) fn confirm_with_io<R: BufRead, W: Write>(
    prompt: &str,
    default: bool,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    let hint = if default { "[Yn]" } else { "[yN]" };
    write!(output, "{} {} ", prompt, hint)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let response = line.trim().to_lowercase();
    Ok(match response.as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    })
}

/// Prints `labels` as a 1-based menu and maps the answer back to a 0-based index.
pub(crate) fn choose_with_io<R: BufRead, W: Write>(
    prompt: &str,
    labels: &[String],
    input: &mut R,
    output: &mut W,
) -> Result<(Option<String>, Option<usize>)> {
    writeln!(output)?;
    for (i, label) in labels.iter().enumerate() {
        writeln!(output, " {}. {}", i + 1, label)?;
    }
    write!(output, "{} ", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let index = line
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1));
    let label = index.and_then(|i| labels.get(i).cloned());
    Ok((label, index))
}

/// Console-backed interaction on stdin/stdout.
pub struct ConsoleUi;

impl UserInteraction for ConsoleUi {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        confirm_with_io(prompt, default, &mut stdin.lock(), &mut stdout)
    }

    fn choose_one(
        &self,
        prompt: &str,
        labels: &[String],
    ) -> Result<(Option<String>, Option<usize>)> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        choose_with_io(prompt, labels, &mut stdin.lock(), &mut stdout)
    }

    fn notify(&self, message: &str) {
        println!("{}", message);
    }
}
