//! Interactive confirmation before a corrupted log is cleared.
//!
//! The operator sees:
//!
//! ```text
//! ❌ Error reading logs: expected value at line 1 column 1
//! 🧹 Do you want to clear the logs? (y/n):
//! ```
//!
//! Only `y` or `yes` (any case) clears the file.

use colored::Colorize;
use promptlog_application::{ConfirmationError, LogCorruption, RepairConfirmation};
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

/// Reads one line into the buffer, returning the byte count (0 at EOF).
type LineReader = Box<dyn FnMut(&mut String) -> io::Result<usize> + Send>;

/// Terminal-based [`RepairConfirmation`].
pub struct InteractiveRepairPrompt {
    input: Mutex<LineReader>,
    output: Mutex<Box<dyn Write + Send>>,
}

impl InteractiveRepairPrompt {
    /// Prompt on stdout, read the answer from stdin.
    ///
    /// Reads go through stdin's shared buffer so that lines after the
    /// answer stay available to the line editor.
    pub fn new() -> Self {
        Self::from_parts(Box::new(|buf| io::stdin().read_line(buf)), io::stdout())
    }

    /// Read answers from `input`. Only the answer line is consumed.
    pub fn with_io(
        mut input: impl BufRead + Send + 'static,
        output: impl Write + Send + 'static,
    ) -> Self {
        Self::from_parts(Box::new(move |buf| input.read_line(buf)), output)
    }

    fn from_parts(input: LineReader, output: impl Write + Send + 'static) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(Box::new(output)),
        }
    }

    fn is_affirmative(answer: &str) -> bool {
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn ask(&self, corruption: &LogCorruption) -> io::Result<Option<String>> {
        {
            let mut out = self
                .output
                .lock()
                .map_err(|_| io::Error::other("output lock poisoned"))?;
            writeln!(
                out,
                "{}",
                format!("❌ Error reading logs: {}", corruption.reason).red()
            )?;
            write!(out, "🧹 Do you want to clear the logs? (y/n): ")?;
            out.flush()?;
        }

        let mut reader = self
            .input
            .lock()
            .map_err(|_| io::Error::other("input lock poisoned"))?;
        let mut line = String::new();
        if (reader.as_mut())(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

impl Default for InteractiveRepairPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl RepairConfirmation for InteractiveRepairPrompt {
    fn confirm_clear(&self, corruption: &LogCorruption) -> Result<bool, ConfirmationError> {
        match self.ask(corruption) {
            Ok(Some(answer)) => Ok(Self::is_affirmative(&answer)),
            Ok(None) => Err(ConfirmationError::InputClosed),
            Err(e) => Err(ConfirmationError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use std::sync::Arc;

    /// Writer whose contents stay readable after being boxed.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn corruption() -> LogCorruption {
        LogCorruption {
            location: "logs.json".to_string(),
            reason: "EOF while parsing a list".to_string(),
        }
    }

    fn answer(input: &str) -> (Result<bool, ConfirmationError>, String) {
        let out = SharedBuffer::default();
        let prompt = InteractiveRepairPrompt::with_io(Cursor::new(input.to_string()), out.clone());
        (prompt.confirm_clear(&corruption()), out.text())
    }

    #[test]
    fn test_yes_answers_clear() {
        assert_eq!(answer("y\n").0, Ok(true));
        assert_eq!(answer("yes\n").0, Ok(true));
        assert_eq!(answer("  YES \n").0, Ok(true));
    }

    #[test]
    fn test_other_answers_decline() {
        assert_eq!(answer("n\n").0, Ok(false));
        assert_eq!(answer("\n").0, Ok(false));
        assert_eq!(answer("yep\n").0, Ok(false));
    }

    #[test]
    fn test_closed_input_is_an_error() {
        assert_eq!(answer("").0, Err(ConfirmationError::InputClosed));
    }

    /// Reader that reports how far it was consumed.
    struct TrackedReader {
        inner: Cursor<Vec<u8>>,
        consumed: Arc<Mutex<usize>>,
    }

    impl io::Read for TrackedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.inner.read(buf)?;
            *self.consumed.lock().unwrap() += n;
            Ok(n)
        }
    }

    impl BufRead for TrackedReader {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            self.inner.fill_buf()
        }

        fn consume(&mut self, amt: usize) {
            self.inner.consume(amt);
            *self.consumed.lock().unwrap() += amt;
        }
    }

    #[test]
    fn test_answer_leaves_following_lines_unread() {
        let consumed = Arc::new(Mutex::new(0));
        let reader = TrackedReader {
            inner: Cursor::new(b"y\nhello\nsecond prompt\n".to_vec()),
            consumed: consumed.clone(),
        };
        let prompt = InteractiveRepairPrompt::with_io(reader, SharedBuffer::default());

        assert_eq!(prompt.confirm_clear(&corruption()), Ok(true));
        assert_eq!(*consumed.lock().unwrap(), "y\n".len());
    }

    #[test]
    fn test_prompt_shows_reason_and_question() {
        let (_, printed) = answer("n\n");
        assert!(printed.contains("Error reading logs: EOF while parsing a list"));
        assert!(printed.contains("Do you want to clear the logs? (y/n): "));
    }
}
