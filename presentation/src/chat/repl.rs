//! REPL (Read-Eval-Print Loop) for interactive chat

use super::input::{PromptInput, ReadOutcome};
use crate::ConsoleFormatter;
use promptlog_application::{ChatSession, CompletionGateway, LogStorage, NoProgress, TurnProgress};
use std::future::Future;
use std::io::{self, Write};
use tracing::{debug, info};

const READLINE_PROMPT: &str = "> ";

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Ctrl-D or closed stdin
    EndOfInput,
    /// Ctrl-C at the prompt or while a request was in flight
    Interrupted,
}

/// Interactive chat REPL
pub struct ChatRepl<G: CompletionGateway, S: LogStorage> {
    session: ChatSession<G, S>,
    progress: Box<dyn TurnProgress>,
    output: Box<dyn Write + Send>,
}

impl<G: CompletionGateway, S: LogStorage> ChatRepl<G, S> {
    /// Create a REPL writing to stdout with no progress display
    pub fn new(session: ChatSession<G, S>) -> Self {
        Self {
            session,
            progress: Box::new(NoProgress),
            output: Box::new(io::stdout()),
        }
    }

    /// Set the progress display used while a request is in flight
    pub fn with_progress(mut self, progress: Box<dyn TurnProgress>) -> Self {
        self.progress = progress;
        self
    }

    /// Redirect rendered output
    pub fn with_output(mut self, output: Box<dyn Write + Send>) -> Self {
        self.output = output;
        self
    }

    pub fn session(&self) -> &ChatSession<G, S> {
        &self.session
    }

    /// Run until end of input or Ctrl-C.
    ///
    /// Ctrl-C is honoured both at the prompt and while a request is in
    /// flight. A prompt read cut short this way keeps its blocking thread
    /// until stdin yields, so the runtime should not wait for blocking tasks
    /// on shutdown.
    pub async fn run(&mut self, input: Box<dyn PromptInput>) -> io::Result<SessionEnd> {
        self.run_until_interrupted(input, || async {
            // Without a handler, nothing can interrupt the session
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Run with a custom interrupt source, polled while waiting for input and
    /// while each request is in flight.
    pub async fn run_until_interrupted<F, Fut>(
        &mut self,
        mut input: Box<dyn PromptInput>,
        mut interrupt: F,
    ) -> io::Result<SessionEnd>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        self.print_welcome()?;

        loop {
            writeln!(self.output, "{}", ConsoleFormatter::format_prompt_header())?;
            self.output.flush()?;

            let reading = tokio::task::spawn_blocking(move || {
                let outcome = input.read_line(READLINE_PROMPT);
                (input, outcome)
            });

            let read = tokio::select! {
                joined = reading => Some(joined),
                _ = interrupt() => None,
            };

            let Some(joined) = read else {
                debug!("Interrupted while waiting for input");
                return self.finish(SessionEnd::Interrupted);
            };

            let (returned, outcome) = joined.map_err(io::Error::other)?;
            input = returned;

            let line = match outcome? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Eof => return self.finish(SessionEnd::EndOfInput),
                ReadOutcome::Interrupted => return self.finish(SessionEnd::Interrupted),
            };

            let outcome = tokio::select! {
                outcome = self.session.submit_with_progress(&line, self.progress.as_ref()) => Some(outcome),
                _ = interrupt() => None,
            };

            let Some(outcome) = outcome else {
                debug!("Interrupted while a request was in flight");
                self.progress.on_request_complete(false);
                return self.finish(SessionEnd::Interrupted);
            };

            for block in ConsoleFormatter::format_turn(&outcome) {
                writeln!(self.output, "{}", block)?;
            }
        }
    }

    fn print_welcome(&mut self) -> io::Result<()> {
        let log = self.session.log();
        writeln!(
            self.output,
            "{}",
            ConsoleFormatter::format_welcome(&log.location(), log.len(), log.origin())
        )
    }

    fn finish(&mut self, end: SessionEnd) -> io::Result<SessionEnd> {
        info!("Session ended: {:?}", end);
        writeln!(self.output, "{}", ConsoleFormatter::format_goodbye())?;
        self.output.flush()?;
        Ok(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use promptlog_application::{
        CompletionError, LogStore, MemoryLogStorage, NeverClear,
    };
    use promptlog_domain::Prompt;
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex, mpsc};
    use std::time::Duration;

    // ==================== Test Doubles ====================

    struct ScriptedInput {
        lines: VecDeque<ReadOutcome>,
        prompts_seen: Arc<AtomicUsize>,
    }

    impl ScriptedInput {
        fn lines(lines: &[&str]) -> Self {
            Self {
                lines: lines
                    .iter()
                    .map(|l| ReadOutcome::Line(l.to_string()))
                    .collect(),
                prompts_seen: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn then(mut self, outcome: ReadOutcome) -> Self {
            self.lines.push_back(outcome);
            self
        }

        fn counter(&self) -> Arc<AtomicUsize> {
            self.prompts_seen.clone()
        }
    }

    impl PromptInput for ScriptedInput {
        fn read_line(&mut self, prompt: &str) -> io::Result<ReadOutcome> {
            assert_eq!(prompt, READLINE_PROMPT);
            self.prompts_seen.fetch_add(1, Ordering::SeqCst);
            Ok(self.lines.pop_front().unwrap_or(ReadOutcome::Eof))
        }
    }

    /// Input that waits for a line that never comes, then reports EOF.
    struct SilentInput {
        _keep_open: mpsc::Sender<()>,
        wakeup: mpsc::Receiver<()>,
    }

    impl SilentInput {
        fn new() -> Self {
            let (tx, rx) = mpsc::channel();
            Self {
                _keep_open: tx,
                wakeup: rx,
            }
        }
    }

    impl PromptInput for SilentInput {
        fn read_line(&mut self, _prompt: &str) -> io::Result<ReadOutcome> {
            let _ = self.wakeup.recv_timeout(Duration::from_millis(200));
            Ok(ReadOutcome::Eof)
        }
    }

    /// Gateway answering every prompt with the same reply.
    struct FixedGateway {
        reply: Result<Value, CompletionError>,
        calls: Mutex<Vec<String>>,
    }

    impl FixedGateway {
        fn new(reply: Result<Value, CompletionError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionGateway for FixedGateway {
        async fn complete(&self, prompt: &Prompt) -> Result<Value, CompletionError> {
            self.calls.lock().unwrap().push(prompt.as_str().to_string());
            self.reply.clone()
        }
    }

    /// Gateway that never answers.
    struct HangingGateway;

    #[async_trait]
    impl CompletionGateway for HangingGateway {
        async fn complete(&self, _prompt: &Prompt) -> Result<Value, CompletionError> {
            std::future::pending().await
        }
    }

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

    async fn repl<G: CompletionGateway>(
        gateway: Arc<G>,
        storage: Arc<MemoryLogStorage>,
    ) -> (ChatRepl<G, Arc<MemoryLogStorage>>, SharedBuffer) {
        let log = match LogStore::load(storage, &NeverClear).await {
            Ok(log) => log,
            Err(e) => panic!("load failed: {}", e),
        };
        let out = SharedBuffer::default();
        let repl = ChatRepl::new(ChatSession::new(gateway, log)).with_output(Box::new(out.clone()));
        (repl, out)
    }

    fn never() -> impl Future<Output = ()> {
        std::future::pending()
    }

    /// Interrupt source that fires from its `n`th poll site on.
    fn interrupt_on(n: usize) -> impl FnMut() -> Pin<Box<dyn Future<Output = ()>>> {
        let mut calls = 0;
        move || -> Pin<Box<dyn Future<Output = ()>>> {
            calls += 1;
            if calls >= n {
                Box::pin(std::future::ready(()))
            } else {
                Box::pin(std::future::pending::<()>())
            }
        }
    }

    fn ok_payload(texts: &[&str]) -> Value {
        let choices: Vec<Value> = texts
            .iter()
            .map(|t| json!({"message": {"role": "assistant", "content": t}}))
            .collect();
        json!({"choices": choices})
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_end_of_input_says_goodbye() {
        let gateway = FixedGateway::new(Ok(ok_payload(&["unused"])));
        let (mut repl, out) = repl(gateway.clone(), Arc::new(MemoryLogStorage::new())).await;
        let input = ScriptedInput::lines(&[]);

        let end = repl.run_until_interrupted(Box::new(input), never).await.unwrap();

        assert_eq!(end, SessionEnd::EndOfInput);
        assert!(out.text().contains("Enter your prompt:"));
        assert!(out.text().contains("Goodbye!"));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_prompt_reply_and_log() {
        let gateway = FixedGateway::new(Ok(ok_payload(&["hi there"])));
        let storage = Arc::new(MemoryLogStorage::new());
        let (mut repl, out) = repl(gateway.clone(), storage.clone()).await;
        let input = ScriptedInput::lines(&["hello"]);

        let prompts_seen = input.counter();
        repl.run_until_interrupted(Box::new(input), never).await.unwrap();

        assert_eq!(gateway.calls(), vec!["hello".to_string()]);
        assert!(out.text().contains("🤖 - hi there"));
        assert_eq!(repl.session().log().len(), 1);

        let saved: Value = serde_json::from_str(&storage.contents().unwrap()).unwrap();
        assert_eq!(saved[0]["content"], "hello");
        assert_eq!(prompts_seen.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_and_oversized_lines_skip_the_service() {
        let gateway = FixedGateway::new(Ok(ok_payload(&["unused"])));
        let (mut repl, out) = repl(gateway.clone(), Arc::new(MemoryLogStorage::new())).await;
        let too_long = "x".repeat(Prompt::MAX_CHARS + 1);
        let input = ScriptedInput::lines(&["", &too_long]);

        repl.run_until_interrupted(Box::new(input), never).await.unwrap();

        assert!(gateway.calls().is_empty());
        assert!(out.text().contains("too long"));
        assert_eq!(repl.session().log().len(), 0);
    }

    #[tokio::test]
    async fn test_failed_request_keeps_looping() {
        let gateway = FixedGateway::new(Err(CompletionError::Transport("refused".into())));
        let (mut repl, out) = repl(gateway.clone(), Arc::new(MemoryLogStorage::new())).await;
        let input = ScriptedInput::lines(&["first", "second"]);

        let end = repl.run_until_interrupted(Box::new(input), never).await.unwrap();

        assert_eq!(end, SessionEnd::EndOfInput);
        assert_eq!(gateway.calls().len(), 2);
        assert_eq!(
            out.text()
                .matches("Error with the request, please try again.")
                .count(),
            2
        );
        assert_eq!(repl.session().log().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_write_warns_and_continues() {
        let gateway = FixedGateway::new(Ok(ok_payload(&["answer"])));
        let storage = Arc::new(MemoryLogStorage::new());
        let (mut repl, out) = repl(gateway.clone(), storage.clone()).await;
        storage.set_fail_writes(true);
        let input = ScriptedInput::lines(&["one", "two"]);

        repl.run_until_interrupted(Box::new(input), never).await.unwrap();

        let text = out.text();
        assert_eq!(text.matches("🤖 - answer").count(), 2);
        assert!(text.contains("History may be incomplete"));
        assert_eq!(gateway.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_ctrl_c_at_prompt() {
        let gateway = FixedGateway::new(Ok(ok_payload(&["unused"])));
        let (mut repl, out) = repl(gateway.clone(), Arc::new(MemoryLogStorage::new())).await;
        let input = ScriptedInput::lines(&[]).then(ReadOutcome::Interrupted);

        let end = repl.run_until_interrupted(Box::new(input), never).await.unwrap();

        assert_eq!(end, SessionEnd::Interrupted);
        assert!(out.text().contains("Goodbye!"));
    }

    #[tokio::test]
    async fn test_ctrl_c_during_request_abandons_it() {
        let storage = Arc::new(MemoryLogStorage::new());
        let (mut repl, out) = repl(Arc::new(HangingGateway), storage.clone()).await;
        let input = ScriptedInput::lines(&["hello", "never read"]);
        let prompts_seen = input.counter();

        // First poll site is the prompt read, the second is the request
        let end = repl
            .run_until_interrupted(Box::new(input), interrupt_on(2))
            .await
            .unwrap();

        assert_eq!(end, SessionEnd::Interrupted);
        assert!(out.text().contains("Goodbye!"));
        assert_eq!(repl.session().log().len(), 0);
        assert_eq!(prompts_seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_signal_while_waiting_for_input() {
        let gateway = FixedGateway::new(Ok(ok_payload(&["unused"])));
        let (mut repl, out) = repl(gateway.clone(), Arc::new(MemoryLogStorage::new())).await;

        let end = repl
            .run_until_interrupted(Box::new(SilentInput::new()), interrupt_on(1))
            .await
            .unwrap();

        assert_eq!(end, SessionEnd::Interrupted);
        assert!(out.text().contains("Goodbye!"));
        assert!(gateway.calls().is_empty());
    }
}
