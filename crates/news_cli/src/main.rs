//! Line-oriented command boundary over the news store.
//!
//! # Responsibility
//! - Read one command per stdin line and answer with one JSON line.
//! - Translate service errors into status categories.
//!
//! # Commands
//! - `get <id>` / `list` / `delete <id>`
//! - `create {"title": "...", "text": "..."}`
//! - `update <id> {"title": "...", "text": "..."}`
//!
//! # Invariants
//! - A bad line, including one that is not UTF-8, gets a 400 answer and the
//!   session continues.

mod command;

use command::Response;
use log::{error, info, warn};
use news_core::{
    default_log_level, init_logging, ConfigError, InMemoryNewsRepository, NewsLimits, NewsService,
};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

const LOG_LEVEL_ENV: &str = "NEWS_LOG_LEVEL";
const LOG_DIR_ENV: &str = "NEWS_LOG_DIR";

fn main() -> ExitCode {
    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
    let log_dir = std::env::var(LOG_DIR_ENV).ok();
    if let Err(err) = init_logging(&level, log_dir.as_deref()) {
        eprintln!("news_cli: {err}");
        return ExitCode::FAILURE;
    }

    let service = match start(NewsLimits::from_env) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("news_cli: {err}");
            return ExitCode::FAILURE;
        }
    };

    match serve(&service, io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_io module=cli status=error reason={err}");
            ExitCode::FAILURE
        }
    }
}

/// Builds an empty store from the limits returned by `load`.
fn start<F>(load: F) -> Result<NewsService<InMemoryNewsRepository>, ConfigError>
where
    F: FnOnce() -> Result<NewsLimits, ConfigError>,
{
    let limits = load().map_err(|err| {
        error!("event=config_load module=cli status=error reason={err}");
        err
    })?;
    let service = NewsService::new(InMemoryNewsRepository::new(), limits);

    let active = service.limits();
    info!(
        "event=cli_start module=cli status=ok max_title_length={} max_text_length={} version={}",
        active.max_title_length,
        active.max_text_length,
        news_core::core_version()
    );
    Ok(service)
}

fn serve<R: BufRead, W: Write>(
    service: &NewsService<InMemoryNewsRepository>,
    input: R,
    mut output: W,
) -> io::Result<()> {
    for line in input.split(b'\n') {
        let line = line?;
        let response = match std::str::from_utf8(&line) {
            Ok(text) if text.trim().is_empty() => continue,
            Ok(text) => command::dispatch(service, text),
            Err(err) => {
                warn!(
                    "event=cli_read module=cli status=error reason=invalid_utf8 valid_up_to={}",
                    err.valid_up_to()
                );
                Response::error(400, format!("command is not valid UTF-8: {err}"))
            }
        };
        writeln!(output, "{response}")?;
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{serve, start};
    use news_core::{
        ConfigError, InMemoryNewsRepository, NewsLimits, NewsService, TEXT_LENGTH_MAX_ENV,
        TITLE_LENGTH_MAX_ENV,
    };
    use serde_json::Value;

    fn run(service: &NewsService<InMemoryNewsRepository>, input: &[u8]) -> Vec<Value> {
        let mut output = Vec::new();
        serve(service, input, &mut output).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn service() -> NewsService<InMemoryNewsRepository> {
        NewsService::new(InMemoryNewsRepository::new(), NewsLimits::new(10, 10))
    }

    #[test]
    fn serve_answers_each_non_blank_line() {
        let lines = run(
            &service(),
            b"create {\"title\":\"A\",\"text\":\"B\"}\n\n  \r\nget 1\r\n",
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["status"], 201);
        assert_eq!(lines[1]["body"]["title"], "A");
    }

    #[test]
    fn serve_keeps_going_after_non_utf8_line() {
        let lines = run(&service(), b"get \xff\nlist\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["status"], 400);
        assert!(lines[0]["body"]["error"]
            .as_str()
            .unwrap()
            .contains("not valid UTF-8"));
        assert_eq!(lines[1]["status"], 200);
        assert_eq!(lines[1]["body"], Value::Array(Vec::new()));
    }

    #[test]
    fn serve_answers_last_line_without_newline() {
        let lines = run(&service(), b"list");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["status"], 200);
    }

    #[test]
    fn start_applies_loaded_limits() {
        let service = start(|| {
            NewsLimits::from_lookup(|key| match key {
                TITLE_LENGTH_MAX_ENV => Some("12".to_string()),
                TEXT_LENGTH_MAX_ENV => Some("400".to_string()),
                _ => None,
            })
        })
        .unwrap();
        assert_eq!(service.limits(), NewsLimits::new(12, 400));
        assert!(service.is_empty().unwrap());
    }

    #[test]
    fn start_fails_on_missing_or_invalid_title_limit() {
        let missing = start(|| NewsLimits::from_lookup(|_| None)).err();
        assert_eq!(missing, Some(ConfigError::Missing(TITLE_LENGTH_MAX_ENV)));

        let invalid = start(|| {
            NewsLimits::from_lookup(|key| match key {
                TITLE_LENGTH_MAX_ENV => Some("wide".to_string()),
                _ => Some("10".to_string()),
            })
        })
        .err();
        assert!(
            matches!(invalid, Some(ConfigError::Invalid { key, .. }) if key == TITLE_LENGTH_MAX_ENV)
        );
    }
}
