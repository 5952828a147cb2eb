// src/system/executor.rs

use crate::core::diagnostics;
use crate::system::sink::OutputSink;
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use thiserror::Error;

/// Failures that abort a single run outside the child's own control.
///
/// A non-zero exit status is not represented here: the script reports its
/// findings through the relayed lines, and the exit code is returned to the
/// caller unjudged.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command could not be parsed: {0}")]
    CommandParse(String),
    #[error("No command specified to run.")]
    EmptyCommand,
    #[error("Command '{command}' could not be started: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Command '{command}' could not be waited on: {source}")]
    WaitFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs the interpreter with the assembled argument line, relaying every
/// output line through the sink.
///
/// The argument line is split into argv here; no shell is ever involved,
/// and on Windows no console window is shown. Each output stream is owned
/// by its own reader, and both are fully drained before the exit wait, so
/// a child filling one pipe cannot deadlock the call. Lines reach the sink
/// classified and in arrival order per stream; no order is promised across
/// the two streams.
///
/// The call blocks until the child terminates on its own; there is no
/// cancellation path.
pub fn run_streaming(
    program: &str,
    argument_line: &str,
    sink: &dyn OutputSink,
) -> Result<ExitStatus, ExecutionError> {
    if program.trim().is_empty() {
        return Err(ExecutionError::EmptyCommand);
    }
    let args = shlex::split(argument_line)
        .ok_or_else(|| ExecutionError::CommandParse(argument_line.to_string()))?;

    let mut command = Command::new(program);
    command
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        command.creation_flags(CREATE_NO_WINDOW);
    }

    let display = format!("{} {}", program, argument_line);
    let mut child = command.spawn().map_err(|e| ExecutionError::SpawnFailed {
        command: display.clone(),
        source: e,
    })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // The scope joins both readers before the wait below can run.
    thread::scope(|scope| {
        if let Some(stdout) = stdout {
            scope.spawn(move || drain_lines(stdout, sink));
        }
        if let Some(stderr) = stderr {
            scope.spawn(move || drain_lines(stderr, sink));
        }
    });

    child.wait().map_err(|e| ExecutionError::WaitFailed {
        command: display,
        source: e,
    })
}

/// Reads newline-delimited output and forwards each classified line.
///
/// Decoding is lossy, so a malformed byte never stops the drain. End of
/// stream simply ends the loop; no terminal sentinel reaches the sink.
fn drain_lines(stream: impl Read, sink: &dyn OutputSink) {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                while matches!(buf.last(), Some(b'\n' | b'\r')) {
                    buf.pop();
                }
                let line = String::from_utf8_lossy(&buf);
                sink.write(&diagnostics::classify(&line));
            }
            Err(e) => {
                log::warn!("Output stream ended unexpectedly: {}", e);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutputLine;
    use crate::system::sink::MemorySink;

    #[test]
    fn a_missing_executable_fails_before_any_write() {
        let sink = MemorySink::new();
        let result = run_streaming("/no/such/interpreter-for-regrun", "script.py", &sink);
        assert!(matches!(result, Err(ExecutionError::SpawnFailed { .. })));
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn an_empty_program_is_rejected() {
        let sink = MemorySink::new();
        let result = run_streaming("  ", "script.py", &sink);
        assert!(matches!(result, Err(ExecutionError::EmptyCommand)));
    }

    #[test]
    fn an_unparsable_argument_line_is_rejected() {
        let sink = MemorySink::new();
        let result = run_streaming("python", "an 'unclosed quote", &sink);
        assert!(matches!(result, Err(ExecutionError::CommandParse(_))));
        assert!(sink.lines().is_empty());
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::fs;
        use tempfile::tempdir;

        fn run_script(script: &str) -> (MemorySink, ExitStatus) {
            let dir = tempdir().unwrap();
            let path = dir.path().join("emit.sh");
            fs::write(&path, script).unwrap();
            let sink = MemorySink::new();
            let status =
                run_streaming("sh", path.to_str().unwrap(), &sink).expect("script should start");
            (sink, status)
        }

        #[test]
        fn both_streams_are_drained_in_per_stream_order() {
            let (sink, status) = run_script(
                "echo A\necho B\necho C 1>&2\necho D 1>&2\n",
            );
            assert!(status.success());

            let lines = sink.lines();
            assert_eq!(lines.len(), 4);
            let position = |text: &str| {
                let needle = OutputLine::Plain(format!("{}\n", text));
                lines.iter().position(|l| l == &needle).unwrap()
            };
            assert!(position("A") < position("B"));
            assert!(position("C") < position("D"));
        }

        #[test]
        fn diagnostic_lines_are_promoted_in_flight() {
            let (sink, _) = run_script(
                "echo 'src/a.cpp(7,1): error Q12: unused variable'\necho done\n",
            );
            let lines = sink.lines();
            assert_eq!(lines.len(), 2);
            match lines.first().unwrap() {
                OutputLine::Diagnostic { item, .. } => {
                    assert_eq!(item.line, 6);
                    assert_eq!(item.error_text, "unused variable");
                }
                OutputLine::Plain(text) => panic!("expected a diagnostic, got {:?}", text),
            }
        }

        #[test]
        fn a_non_zero_exit_is_not_an_error() {
            let (_sink, status) = run_script("exit 3\n");
            assert_eq!(status.code(), Some(3));
        }

        #[test]
        fn a_large_single_stream_burst_does_not_deadlock() {
            // Enough output to overfill an undrained pipe several times over.
            let (sink, status) = run_script("i=0\nwhile [ $i -lt 5000 ]; do echo line-$i; i=$((i+1)); done\n");
            assert!(status.success());
            assert_eq!(sink.lines().len(), 5000);
        }
    }
}
