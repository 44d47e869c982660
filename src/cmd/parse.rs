/*!
`parse.rs`

Implements the `parse` subcommand: build a `ProgramDescriptor` from the
configured token sources, classify it, and print the stored result.

Usage:
  loom parse model user name:string
  loom parse --line 'model post "title:string" body:text' --json
  loom parse --args-file fields.yaml model user --strict

JSON Success Output:
{
  "status": "ok",
  "path": "loom",
  "result": {
    "loom": { "args": ["user"], "name": "model", "paths": ["loom"], "params": { "name": "string" } }
  },
  "warnings": []
}

JSON Error Output:
{
  "status": "error",
  "error": "message"
}
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{Role, StyleOptions, box_header, color, emoji, table};
use crate::cmd::source::collect_tokens;
use loom::parser::param_type::unknown_params;
use loom::parser::{self, Classification, ParsedPrograms, ProgramDescriptor, Token};
use loom::{log_debug, log_trace};

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Tokens to classify: the model name, positionals and KEY:TYPE params
    #[arg(value_name = "TOKEN")]
    pub tokens: Vec<String>,

    /// Extra tokens as one shell-style string (appended after TOKEN)
    #[arg(long, value_name = "STRING")]
    pub line: Option<String>,

    /// Extra tokens from a JSON/YAML file: array of tokens or KEY: TYPE object
    #[arg(long = "args-file", value_name = "PATH")]
    pub args_file: Option<String>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,

    /// Fail when a param declares a type loom does not recognize
    #[arg(long)]
    pub strict: bool,

    /// Fail when no model name token is present
    #[arg(long = "require-name")]
    pub require_name: bool,
}

/* -------------------------------------------------------------------------- */
/* Public Entry Point                                                         */
/* -------------------------------------------------------------------------- */

pub fn execute_parse(args: ParseArgs, base_path: &str) -> Result<()> {
    let tokens = match collect_tokens(
        &args.tokens,
        args.line.as_deref(),
        args.args_file.as_deref(),
    ) {
        Ok(t) => t,
        Err(e) => return output_error(args.json, &format!("{e:#}")),
    };

    let descriptor = ProgramDescriptor::new(base_path, tokens);
    for raw in &descriptor.args {
        log_trace!("{}", Token::classify(raw));
    }

    let mut programs = ParsedPrograms::new();
    let result = parser::parse(&mut programs, &descriptor);
    log_debug!(
        "classified {} token(s) under '{}': name={:?} args={} params={}",
        descriptor.args.len(),
        base_path,
        result.name,
        result.args.len(),
        result.params.len()
    );

    let warnings = type_warnings(result);

    if args.require_name && result.name.is_none() {
        return output_error(args.json, "no model name given (first plain token)");
    }
    if args.strict && !warnings.is_empty() {
        return output_error(args.json, &warnings.join("; "));
    }

    if args.json {
        let report = json_report(base_path, &programs, &warnings);
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| report.to_string())
        );
    } else {
        println!("{}", render_human(base_path, result, &StyleOptions::detect()));
    }
    Ok(())
}

/* -------------------------------------------------------------------------- */
/* Rendering                                                                  */
/* -------------------------------------------------------------------------- */

fn type_warnings(result: &Classification) -> Vec<String> {
    unknown_params(&result.params)
        .into_iter()
        .map(|(key, kind)| format!("unknown type '{kind}' for param '{key}'"))
        .collect()
}

fn json_report(base_path: &str, programs: &ParsedPrograms, warnings: &[String]) -> serde_json::Value {
    serde_json::json!({
        "status": "ok",
        "path": base_path,
        "result": programs,
        "warnings": warnings,
    })
}

fn render_human(base_path: &str, result: &Classification, style: &StyleOptions) -> String {
    let mut out = Vec::new();

    let tokens = result.token_count();
    out.push(box_header(
        format!("{} {base_path}", emoji("model", style)).trim().to_string(),
        Some(format!("{tokens} token(s)")),
        style,
    ));

    let name = match &result.name {
        Some(n) => color(Role::Success, n, style),
        None => color(Role::Dim, "(none)", style),
    };
    out.push(format!("{} {name}", color(Role::Accent, "Model:", style)));

    let args = if result.args.is_empty() {
        color(Role::Dim, "(none)", style)
    } else {
        result.args.join(" ")
    };
    out.push(format!("{} {args}", color(Role::Accent, "Args:", style)));

    if result.params.is_empty() {
        out.push(color(
            Role::Dim,
            format!("{} No params", emoji("info", style)).trim(),
            style,
        ));
        return out.join("\n");
    }

    let unknown: Vec<&str> = unknown_params(&result.params)
        .into_iter()
        .map(|(key, _)| key)
        .collect();
    let rows: Vec<Vec<String>> = result
        .params
        .iter()
        .map(|(key, kind)| {
            let kind = if unknown.contains(&key) {
                color(
                    Role::Warning,
                    format!("{kind} {}", emoji("warn", style)).trim_end(),
                    style,
                )
            } else {
                kind.to_string()
            };
            vec![key.to_string(), kind]
        })
        .collect();
    out.push(color(Role::Accent, "Params:", style));
    out.push(table(&["NAME", "TYPE"], &rows, style));

    out.join("\n")
}

fn output_error(json: bool, msg: &str) -> Result<()> {
    if json {
        let err = serde_json::json!({"status":"error","error":msg});
        println!(
            "{}",
            serde_json::to_string_pretty(&err).unwrap_or_else(|_| err.to_string())
        );
    } else {
        let style = StyleOptions::detect();
        let title = format!("{} Parse Error", emoji("error", &style));
        println!(
            "{}",
            box_header(title.trim(), Some(color(Role::Error, msg, &style)), &style)
        );
    }
    anyhow::bail!(msg.to_string())
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                      */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        cmd: TestSub,
    }

    #[derive(clap::Subcommand, Debug)]
    enum TestSub {
        Parse(ParseArgs),
    }

    fn parse_args(argv: &[&str]) -> ParseArgs {
        let cli = TestCli::try_parse_from(argv).unwrap();
        match cli.cmd {
            TestSub::Parse(a) => a,
        }
    }

    fn classify(tokens: &[&str]) -> (ParsedPrograms, Classification) {
        let mut programs = ParsedPrograms::new();
        let result = parser::parse(&mut programs, &ProgramDescriptor::new("loom", tokens.to_vec()))
            .clone();
        (programs, result)
    }

    #[test]
    fn clap_parses_tokens_and_flags() {
        let a = parse_args(&["t", "parse", "model", "user", "name:string", "--json", "--strict"]);
        assert_eq!(a.tokens, vec!["model", "user", "name:string"]);
        assert!(a.json);
        assert!(a.strict);
        assert!(!a.require_name);
        assert!(a.line.is_none());
    }

    #[test]
    fn clap_parses_sources() {
        let a = parse_args(&[
            "t",
            "parse",
            "--line",
            "model user",
            "--args-file",
            "f.yaml",
        ]);
        assert!(a.tokens.is_empty());
        assert_eq!(a.line.as_deref(), Some("model user"));
        assert_eq!(a.args_file.as_deref(), Some("f.yaml"));
    }

    #[test]
    fn json_report_keys_result_by_path() {
        let (programs, result) = classify(&["model", "user", "name:string"]);
        let warnings = type_warnings(&result);
        assert!(warnings.is_empty());
        assert_eq!(
            json_report("loom", &programs, &warnings),
            json!({
                "status": "ok",
                "path": "loom",
                "result": {
                    "loom": {
                        "args": ["user"],
                        "name": "model",
                        "paths": ["loom"],
                        "params": { "name": "string" }
                    }
                },
                "warnings": []
            })
        );
    }

    #[test]
    fn unknown_types_become_warnings() {
        let (_, result) = classify(&["model", "owner:ref", "age:int"]);
        assert_eq!(
            type_warnings(&result),
            vec!["unknown type 'ref' for param 'owner'"]
        );
    }

    #[test]
    fn human_output_lists_model_args_and_params() {
        let (_, result) = classify(&["model", "user", "name:string", "owner:ref"]);
        let out = render_human("loom", &result, &StyleOptions::plain(80));
        assert!(out.contains("│ loom  4 token(s) │"));
        assert!(out.contains("Model: model"));
        assert!(out.contains("Args: user"));
        assert!(out.contains("name   string"));
        assert!(out.contains("owner  ref"));
    }

    #[test]
    fn human_output_without_params_or_name() {
        let (_, result) = classify(&[]);
        let out = render_human("loom", &result, &StyleOptions::plain(80));
        assert!(out.contains("Model: (none)"));
        assert!(out.contains("Args: (none)"));
        assert!(out.contains("No params"));
    }

    #[test]
    fn require_name_rejects_params_only_input() {
        let a = parse_args(&["t", "parse", "a:1", "--require-name", "--json"]);
        let err = execute_parse(a, "loom").unwrap_err();
        assert!(err.to_string().contains("no model name"));
    }

    #[test]
    fn strict_rejects_unknown_type() {
        let a = parse_args(&["t", "parse", "model", "owner:ref", "--strict", "--json"]);
        let err = execute_parse(a, "loom").unwrap_err();
        assert!(err.to_string().contains("'ref'"));
    }
}
