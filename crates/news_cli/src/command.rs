//! Command parsing and status mapping.

use news_core::{NewsId, NewsPayload, NewsRepository, NewsService, NewsServiceError};
use serde_json::{json, Value};

/// Boundary response: a status category plus a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    fn ok(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }
}

impl From<NewsServiceError> for Response {
    fn from(err: NewsServiceError) -> Self {
        Self::error(err.status_code(), err.to_string())
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", json!({ "status": self.status, "body": self.body }))
    }
}

/// Parses and runs one command line against `service`.
pub fn dispatch<R: NewsRepository>(service: &NewsService<R>, line: &str) -> Response {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let result = match verb {
        "get" => parse_id(rest).and_then(|id| to_response(200, service.get_by_id(id))),
        "list" => to_response(200, service.get_all()),
        "create" => parse_payload(rest).and_then(|payload| to_response(201, service.create(payload))),
        "update" => {
            let (id, payload) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            parse_id(id).and_then(|id| {
                parse_payload(payload)
                    .and_then(|payload| to_response(200, service.update(id, payload)))
            })
        }
        "delete" => parse_id(rest).and_then(|id| {
            service
                .delete_by_id(id)
                .map(|()| Response::ok(204, Value::Null))
                .map_err(Response::from)
        }),
        other => Err(Response::error(400, format!("unknown command `{other}`"))),
    };

    result.unwrap_or_else(|err| err)
}

fn to_response<T: serde::Serialize>(
    status: u16,
    result: Result<T, NewsServiceError>,
) -> Result<Response, Response> {
    let value = result.map_err(Response::from)?;
    serde_json::to_value(value)
        .map(|body| Response::ok(status, body))
        .map_err(|err| Response::error(500, format!("failed to encode response: {err}")))
}

fn parse_id(raw: &str) -> Result<NewsId, Response> {
    raw.trim()
        .parse()
        .map_err(|_| Response::error(400, format!("invalid id `{}`", raw.trim())))
}

fn parse_payload(raw: &str) -> Result<NewsPayload, Response> {
    serde_json::from_str(raw.trim())
        .map_err(|err| Response::error(400, format!("invalid payload: {err}")))
}
