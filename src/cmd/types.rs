/*!
`types.rs`

Implements the `types` subcommand: list the parameter types loom recognizes
in `KEY:TYPE` tokens, with their accepted aliases.
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{StyleOptions, box_header, table};
use loom::parser::param_type::ParamType;

#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute_types(args: TypesArgs) -> Result<()> {
    if args.json {
        let report = json_report();
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| report.to_string())
        );
    } else {
        let style = StyleOptions::detect();
        let count = ParamType::variants().len();
        println!("{}", box_header(format!("Param types ({count})"), None::<&str>, &style));
        println!("{}", table(&["TYPE", "ALIASES"], &rows(), &style));
    }
    Ok(())
}

fn rows() -> Vec<Vec<String>> {
    ParamType::variants()
        .iter()
        .map(|t| vec![t.to_string(), t.aliases().join(", ")])
        .collect()
}

fn json_report() -> serde_json::Value {
    let types: Vec<serde_json::Value> = ParamType::variants()
        .iter()
        .map(|t| serde_json::json!({ "name": t.to_string(), "aliases": t.aliases() }))
        .collect();
    serde_json::json!({
        "status": "ok",
        "count": types.len(),
        "types": types,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_lists_every_type() {
        let report = json_report();
        assert_eq!(report["count"], json!(ParamType::variants().len()));
        assert_eq!(report["types"][0], json!({ "name": "string", "aliases": ["str"] }));
        assert_eq!(report["types"][1], json!({ "name": "text", "aliases": [] }));
    }

    #[test]
    fn table_rows_join_aliases() {
        let rows = rows();
        assert_eq!(rows[2], vec!["integer", "int"]);
        assert_eq!(rows.len(), ParamType::variants().len());
    }
}
