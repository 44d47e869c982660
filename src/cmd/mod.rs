/*!
Command modules for the `loom` CLI.

  parse.rs    (ParseArgs + execute_parse)
  types.rs    (TypesArgs + execute_types)
  source.rs   token sources + base path resolution
  format.rs   human output primitives

Each subcommand module exposes one public `execute_*` function returning
`anyhow::Result<()>`; argument structs derive `clap::Args`.
*/

pub mod format;
pub mod parse;
pub mod source;
pub mod types;

pub use parse::{ParseArgs, execute_parse};
pub use types::{TypesArgs, execute_types};
