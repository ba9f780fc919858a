//! `beeswax call`: a raw request through the re-authenticating session.

use std::sync::Arc;

use beeswax_api::{Method, Params, RequestOptions, Session, UploadFile};
use serde_json::Value;

use crate::cli::{CallArgs, GlobalOpts, HttpMethod, OutputFormat};
use crate::error::CliError;
use crate::output;

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// Parse `key=value` pairs. Values that are valid JSON keep their type,
/// anything else is sent as a string.
pub(crate) fn parse_params(pairs: &[String]) -> Result<Params, CliError> {
    let mut params = Params::new();
    for pair in pairs {
        let (key, raw) = pair.split_once('=').ok_or_else(|| CliError::Validation {
            field: "param".into(),
            reason: format!("expected KEY=VALUE, got '{pair}'"),
        })?;
        if key.is_empty() {
            return Err(CliError::Validation {
                field: "param".into(),
                reason: format!("empty key in '{pair}'"),
            });
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));
        params.insert(key, value);
    }
    Ok(params)
}

fn parse_body(text: &str) -> Result<Params, CliError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(Params::from(map)),
        _ => Err(CliError::Validation {
            field: "body".into(),
            reason: "must be a JSON object".into(),
        }),
    }
}

/// Assemble request options from the call arguments.
///
/// Params go on the query string, except on POST without a body where the
/// API expects them as the JSON body.
pub(crate) fn build_options(args: &CallArgs) -> Result<RequestOptions, CliError> {
    let params = parse_params(&args.params)?;
    let mut options = RequestOptions::default();

    match args.body.as_deref() {
        Some(text) => {
            options.body = Some(parse_body(text)?.into_body());
            options.query = params;
        }
        None if args.method == HttpMethod::Post && args.file.is_none() => {
            options.body = Some(params.into_body());
        }
        None => options.query = params,
    }

    if let Some(ref path) = args.file {
        options.file = Some(UploadFile::from_path(path)?);
    }
    Ok(options)
}

pub async fn handle(
    args: CallArgs,
    session: &Arc<Session>,
    format: OutputFormat,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let options = build_options(&args)?;
    let segments: Vec<&str> = args.segments.iter().map(String::as_str).collect();

    tracing::debug!(method = ?args.method, path = %args.segments.join("/"), "calling");
    let payload = session.call(args.method.into(), &segments, &options).await?;
    output::print_output(&output::render(format, &payload)?, global.quiet);
    Ok(())
}
