//! Command-line companion for the persona chat backend: sends one question
//! to `POST /` and prints the reply.

use std::{process::ExitCode, time::Duration};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use colored::Colorize;
use serde::{Deserialize, Serialize};

const DEFAULT_URL: &str = "http://localhost:10000/";
const DEFAULT_QUESTION: &str = "Tell me about yourself?";

#[derive(Debug, Parser)]
#[command(name = "chat-client", about = "Ask the persona chat backend one question")]
struct Cli {
    /// Backend base URL.
    #[arg(long, env = "CHAT_SERVER_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Question to ask.
    #[arg(default_value = DEFAULT_QUESTION)]
    question: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 120)]
    timeout: u64,
}

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

/// Either a reply or an error detail, depending on the status.
#[derive(Debug, Default, Deserialize)]
struct AskReply {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

fn interpret(status: reqwest::StatusCode, body: &str) -> Result<String> {
    let reply: AskReply = serde_json::from_str(body).unwrap_or_default();

    if status.is_success() {
        return reply
            .response
            .ok_or_else(|| anyhow!("server answered {status} without a response field"));
    }

    let detail = match reply.detail {
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => body.trim().to_string(),
    };
    Err(anyhow!("server answered {status}: {detail}"))
}

async fn ask(cli: &Cli) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout))
        .build()
        .context("failed to build HTTP client")?;

    let res = client
        .post(&cli.url)
        .json(&AskRequest {
            question: &cli.question,
        })
        .send()
        .await
        .with_context(|| format!("request to {} failed", cli.url))?;

    let status = res.status();
    let body = res.text().await.context("failed to read response body")?;
    interpret(status, &body)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    println!("{} {}", "Question:".bold(), cli.question);
    match ask(&cli).await {
        Ok(answer) => {
            println!("{} {}", "Response:".green().bold(), answer);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn success_prints_response_field() {
        let out = interpret(StatusCode::OK, r#"{"response":"Hi, I'm Piyush."}"#).unwrap();
        assert_eq!(out, "Hi, I'm Piyush.");
    }

    #[test]
    fn error_surfaces_detail() {
        let err = interpret(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"detail":"upstream provider error: timeout"}"#,
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("upstream provider error: timeout"));
    }

    #[test]
    fn non_json_error_falls_back_to_body() {
        let err = interpret(StatusCode::BAD_GATEWAY, "bad gateway\n").unwrap_err();
        assert!(err.to_string().ends_with("bad gateway"));
    }

    #[test]
    fn defaults_match_local_backend() {
        let cli = Cli::parse_from(["chat-client"]);
        assert_eq!(cli.question, DEFAULT_QUESTION);
        assert_eq!(cli.timeout, 120);
    }
}
