//! Interactive query loop.

use std::io::{self, BufRead, Write};

use runtime::{Backend, Session, ToolHost};
use tracing::warn;

pub const PROMPT: &str = "Query (or 'exit' to quit): ";

/// Input that ends the loop. Must match the whole line.
pub const EXIT_TOKEN: &str = "exit";

/// Read queries until `exit` or end of input, printing each answer.
///
/// Blank lines are skipped rather than sent to the model. A failed query is
/// reported and the loop keeps going.
pub async fn run<B, H>(
    session: &Session<B, H>,
    mut input: impl BufRead,
    output: &mut impl Write,
) -> io::Result<()>
where
    B: Backend,
    H: ToolHost,
{
    loop {
        write!(output, "\n{PROMPT}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let query = line.trim_end_matches(['\r', '\n']);
        if query == EXIT_TOKEN {
            break;
        }
        if query.trim().is_empty() {
            continue;
        }

        match session.process_query(query).await {
            Ok(answer) => writeln!(output, "\nResponse:\n{answer}")?,
            Err(e) => {
                warn!(error = %e, "query failed");
                writeln!(output, "\nError: {e}")?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtime::{EmptyToolHost, Message, ModelError, ModelRequest, ModelResponse};
    use std::io::Cursor;
    use std::sync::Mutex;

    /// Echoes the query back, or fails when asked to.
    #[derive(Default)]
    struct EchoBackend {
        seen: Mutex<Vec<String>>,
    }

    impl Backend for EchoBackend {
        async fn call(&self, request: ModelRequest<'_>) -> Result<ModelResponse, ModelError> {
            let Some(Message::User { content }) = request.messages.first() else {
                return Err(ModelError::InvalidResponse("no user message".into()));
            };
            self.seen.lock().unwrap().push(content.clone());
            if content == "fail" {
                return Err(ModelError::Network("connection reset".into()));
            }
            Ok(ModelResponse {
                content: Some(format!("you said: {content}")),
                ..Default::default()
            })
        }
    }

    async fn run_with(input: &str) -> (String, Vec<String>) {
        let session = Session::new(EchoBackend::default(), EmptyToolHost);
        let mut output = Vec::new();
        run(&session, Cursor::new(input.to_string()), &mut output)
            .await
            .unwrap();
        let seen = session.backend().seen.lock().unwrap().clone();
        (String::from_utf8(output).unwrap(), seen)
    }

    #[tokio::test]
    async fn answers_until_exit() {
        let (output, seen) = run_with("hello\nexit\nnever sent\n").await;

        assert_eq!(seen, ["hello"]);
        assert!(output.contains("Response:\nyou said: hello"));
        assert_eq!(output.matches(PROMPT).count(), 2);
    }

    #[tokio::test]
    async fn stops_at_end_of_input() {
        let (output, seen) = run_with("one\ntwo").await;

        assert_eq!(seen, ["one", "two"]);
        assert!(output.contains("you said: two"));
        assert_eq!(output.matches(PROMPT).count(), 3);
    }

    #[tokio::test]
    async fn exit_must_match_exactly() {
        let (_, seen) = run_with("exit now\n EXIT\nexit\r\n").await;

        assert_eq!(seen, ["exit now", " EXIT"]);
    }

    #[tokio::test]
    async fn blank_lines_are_skipped() {
        let (_, seen) = run_with("\n   \nhi\n").await;

        assert_eq!(seen, ["hi"]);
    }

    #[tokio::test]
    async fn failed_query_keeps_loop_alive() {
        let (output, seen) = run_with("fail\nagain\n").await;

        assert_eq!(seen, ["fail", "again"]);
        assert!(output.contains("Error: network: connection reset"));
        assert!(output.contains("you said: again"));
    }
}
