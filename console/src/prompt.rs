use crate::errors::{Error, Result};
use std::fmt::Display;
use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};
use tracing::debug;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

const RULE_WIDTH: usize = 60;

/// Line-oriented prompter over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    max_attempts: u32,
}

impl Prompter<StdinLock<'static>, Stdout> {
    pub fn stdio(max_attempts: u32) -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout(), max_attempts)
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, max_attempts: u32) -> Self {
        Self {
            input,
            output,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Horizontal separator line made of `ch`.
    pub fn rule(&mut self, ch: char) -> Result<()> {
        let line: String = std::iter::repeat(ch).take(RULE_WIDTH).collect();
        self.say(line)
    }

    /// Reads one trimmed line after printing `prompt`.
    pub fn line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(Error::InputClosed);
        }
        Ok(buf.trim().to_string())
    }

    /// Bounded re-prompt.
    ///
    /// An empty answer returns `default` when one is given; anything else goes
    /// through `parser`. Each rejected answer costs one attempt, and running out
    /// of attempts yields [`Error::AttemptsExceeded`].
    pub fn ask<T, E, F>(
        &mut self,
        prompt: &str,
        default: Option<T>,
        err_msg: &str,
        mut parser: F,
    ) -> Result<T>
    where
        F: FnMut(&str) -> std::result::Result<T, E>,
        E: Display,
    {
        let mut default = default;

        for attempt in 1..=self.max_attempts {
            let raw = self.line(prompt)?;
            if raw.is_empty() {
                if let Some(value) = default.take() {
                    return Ok(value);
                }
            }

            match parser(&raw) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    debug!(attempt, reason = %e, "Rejected input");
                    writeln!(
                        self.output,
                        "❌ {}. Attempt {}/{}",
                        err_msg, attempt, self.max_attempts
                    )?;
                }
            }
        }

        writeln!(self.output, "Exceeded maximum attempts. Exiting.")?;
        Err(Error::AttemptsExceeded {
            attempts: self.max_attempts,
        })
    }

    /// Yes/no question. With `default_yes` only an explicit `n` says no,
    /// otherwise only an explicit `y` says yes.
    pub fn confirm(&mut self, prompt: &str, default_yes: bool) -> Result<bool> {
        let answer = self.line(prompt)?.to_lowercase();
        Ok(if default_yes {
            answer != "n"
        } else {
            answer == "y"
        })
    }

    /// Bounded prompt accepting exactly one of `options`; returns its index.
    pub fn choose(&mut self, prompt: &str, options: &[&str], err_msg: &str) -> Result<usize> {
        self.ask(prompt, None, err_msg, |raw| {
            options
                .iter()
                .position(|option| *option == raw)
                .ok_or_else(|| format!("{:?} is not one of {:?}", raw, options))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), 3)
    }

    fn parse_port(raw: &str) -> std::result::Result<u8, String> {
        raw.parse::<u8>().map_err(|e| e.to_string())
    }

    #[test]
    fn test_ask_returns_first_valid_answer() {
        let mut p = prompter("abc\n42\n");
        let value = p.ask("Port: ", None, "Invalid port", parse_port).unwrap();
        assert_eq!(value, 42);

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("❌ Invalid port. Attempt 1/3"));
    }

    #[test]
    fn test_ask_empty_uses_default() {
        let mut p = prompter("\n");
        let value = p.ask("Port: ", Some(7), "Invalid port", parse_port).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_ask_empty_without_default_goes_to_parser() {
        let mut p = prompter("\n\n\n");
        let result = p.ask("Port: ", None, "Invalid port", parse_port);
        assert!(matches!(result, Err(Error::AttemptsExceeded { attempts: 3 })));
    }

    #[test]
    fn test_ask_exhausts_attempts() {
        let mut p = prompter("x\ny\nz\n5\n");
        let result = p.ask("Port: ", Some(1), "Invalid port", parse_port);
        assert!(matches!(result, Err(Error::AttemptsExceeded { attempts: 3 })));

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Attempt 3/3"));
        assert!(out.contains("Exceeded maximum attempts. Exiting."));
    }

    #[test]
    fn test_closed_input() {
        let mut p = prompter("");
        let result = p.ask("Port: ", None, "Invalid port", parse_port);
        assert!(matches!(result, Err(Error::InputClosed)));
    }

    #[test]
    fn test_confirm_defaults() {
        let mut p = prompter("\nN\n\nY\nmaybe\n");
        assert!(p.confirm("Send? (Y/n): ", true).unwrap());
        assert!(!p.confirm("Send? (Y/n): ", true).unwrap());
        assert!(!p.confirm("Confirm? (y/N): ", false).unwrap());
        assert!(p.confirm("Confirm? (y/N): ", false).unwrap());
        assert!(!p.confirm("Confirm? (y/N): ", false).unwrap());
    }

    #[test]
    fn test_choose() {
        let mut p = prompter("3\n2\n");
        let index = p.choose("Choice (1/2): ", &["1", "2"], "Please enter 1 or 2").unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn test_zero_attempts_is_clamped() {
        let p = Prompter::new(Cursor::new(Vec::<u8>::new()), Vec::<u8>::new(), 0);
        assert_eq!(p.max_attempts(), 1);
    }
}
