/*!
Token sources for building a `ProgramDescriptor`.

Order of tokens in the final descriptor:
  1. positional CLI tokens
  2. `--line` (shell-style split, quotes keep spaces)
  3. `--args-file` (JSON, or YAML for .yaml/.yml)

Base path resolution: `--path` flag > `LOOM_PATH` env > "loom".
*/

use anyhow::{Context, Result, bail};
use shell_words::split as shell_split;

use loom::{log_debug, log_trace};

pub const PATH_ENV: &str = "LOOM_PATH";
pub const DEFAULT_PATH: &str = "loom";

/// Resolve the base path from the CLI flag, falling back to `LOOM_PATH`.
pub fn resolve_path(flag: Option<&str>) -> Result<String> {
    let env = std::env::var(PATH_ENV).ok();
    resolve_path_from(flag, env.as_deref())
}

fn resolve_path_from(flag: Option<&str>, env: Option<&str>) -> Result<String> {
    if let Some(p) = flag {
        if p.trim().is_empty() {
            bail!("base path is empty");
        }
        return Ok(p.to_string());
    }
    match env {
        Some(p) if !p.trim().is_empty() => Ok(p.to_string()),
        _ => Ok(DEFAULT_PATH.to_string()),
    }
}

/// Split a single command-line string into tokens.
pub fn split_line(line: &str) -> Result<Vec<String>> {
    shell_split(line).with_context(|| format!("failed to split --line (shell quoting): {line}"))
}

/// Read tokens from a JSON or YAML file.
///
/// Root may be an array (each element one token) or an object (each entry
/// becomes a `key:value` token, in document order). Non-string scalars are
/// stringified; nested arrays/objects and keys containing `:` are rejected.
pub fn load_args_file(path: &str) -> Result<Vec<String>> {
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("failed to read args file: {path}"))?;
    let lower = path.to_ascii_lowercase();

    let value: serde_json::Value = if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        let yaml_v: serde_yaml::Value =
            serde_yaml::from_str(&raw).context("failed to parse YAML args file")?;
        serde_json::to_value(yaml_v).context("failed to convert YAML to JSON")?
    } else {
        serde_json::from_str(&raw).context("failed to parse JSON args file")?
    };

    tokens_from_value(&value).with_context(|| format!("invalid args file: {path}"))
}

fn tokens_from_value(value: &serde_json::Value) -> Result<Vec<String>> {
    match value {
        serde_json::Value::Array(items) => items.iter().map(scalar_to_string).collect(),
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(k, v)| -> Result<String> {
                if k.contains(':') {
                    bail!("args file keys must not contain ':', got: {k}");
                }
                Ok(format!("{k}:{}", scalar_to_string(v)?))
            })
            .collect(),
        _ => bail!("args file root must be an array or an object"),
    }
}

fn scalar_to_string(v: &serde_json::Value) -> Result<String> {
    match v {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            bail!("args file entries must be scalars, got: {v}")
        }
        other => Ok(other.to_string()),
    }
}

/// Merge every configured source into one ordered token list.
pub fn collect_tokens(
    positional: &[String],
    line: Option<&str>,
    args_file: Option<&str>,
) -> Result<Vec<String>> {
    let mut tokens = positional.to_vec();
    log_debug!("{} positional token(s)", tokens.len());

    if let Some(line) = line {
        let split = split_line(line)?;
        log_debug!("--line produced {} token(s)", split.len());
        tokens.extend(split);
    }

    if let Some(path) = args_file {
        let loaded = load_args_file(path)?;
        log_debug!("args file '{path}' produced {} token(s)", loaded.len());
        tokens.extend(loaded);
    }

    log_trace!("tokens: {tokens:?}");
    Ok(tokens)
}
