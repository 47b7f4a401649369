//! Line-based prompts over any reader/writer pair.

use anyhow::Context;
use std::io::{BufRead, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Next input line without its line ending, or `None` at end of input.
    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn show(&mut self, text: &str) -> anyhow::Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    pub fn say(&mut self, text: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Free-text answer; empty at end of input.
    pub fn ask(&mut self, label: &str) -> anyhow::Result<String> {
        self.show(&format!("{label}: "))?;
        Ok(self.read_line()?.unwrap_or_default().trim().to_string())
    }

    /// Re-prompt until `check` accepts the answer.
    pub fn ask_validated<F>(&mut self, label: &str, check: F) -> anyhow::Result<String>
    where
        F: Fn(&str) -> Result<(), String>,
    {
        loop {
            self.show(&format!("{label}: "))?;
            let Some(answer) = self.read_line()? else {
                anyhow::bail!("input ended before a valid answer for '{label}'");
            };
            let answer = answer.trim().to_string();
            match check(&answer) {
                Ok(()) => return Ok(answer),
                Err(msg) => self.say(&format!("  {msg}"))?,
            }
        }
    }

    /// Collect entries until a blank line or end of input.
    pub fn ask_list(&mut self, label: &str) -> anyhow::Result<Vec<String>> {
        self.say(&format!("{label} (one per line, blank line to finish):"))?;
        let mut items = Vec::new();
        loop {
            self.show(&format!("  {}. ", items.len() + 1))?;
            match self.read_line()? {
                Some(line) if !line.trim().is_empty() => items.push(line.trim().to_string()),
                _ => break,
            }
        }
        Ok(items)
    }

    /// Yes/no question; blank answer or end of input picks `default`.
    pub fn confirm(&mut self, label: &str, default: bool) -> anyhow::Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            self.show(&format!("{label} [{hint}]: "))?;
            let Some(answer) = self.read_line()? else {
                return Ok(default);
            };
            match answer.trim().to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("  please answer y or n")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn ask_trims_and_handles_eof() {
        let mut p = prompter("  hello \r\n");
        assert_eq!(p.ask("Name").unwrap(), "hello");
        assert_eq!(p.ask("Again").unwrap(), "");
    }

    #[test]
    fn ask_validated_reprompts() {
        let mut p = prompter("bad\nGood\n");
        let answer = p
            .ask_validated("Component", |s| {
                if s.starts_with(char::is_uppercase) {
                    Ok(())
                } else {
                    Err("must be capitalized".to_string())
                }
            })
            .unwrap();
        assert_eq!(answer, "Good");
        let shown = String::from_utf8(p.output).unwrap();
        assert!(shown.contains("must be capitalized"));
    }

    #[test]
    fn ask_validated_fails_at_eof() {
        let mut p = prompter("bad\n");
        let result = p.ask_validated("Component", |_| Err("no".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn ask_list_stops_at_blank_line() {
        let mut p = prompter("first\nsecond\n\nafter\n");
        assert_eq!(p.ask_list("Criteria").unwrap(), vec!["first", "second"]);
        assert_eq!(p.ask("Next").unwrap(), "after");
    }

    #[test]
    fn confirm_uses_default_and_retries() {
        let mut p = prompter("\nmaybe\nn\n");
        assert!(p.confirm("Proceed", true).unwrap());
        assert!(!p.confirm("Proceed", true).unwrap());
        assert!(!p.confirm("At eof", false).unwrap());
    }
}
