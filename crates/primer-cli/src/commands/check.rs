//! `primer check`: validate a module or class name.

use primer_core::{
    domain::{ClassName, ModuleName},
    error::PrimerError,
};

use crate::{
    cli::{CheckArgs, IdentifierKind, OutputFormat},
    error::CliResult,
    output::OutputManager,
};

/// Report whether `args.value` passes the rules for `args.kind`.
///
/// An invalid name is a user error (exit code 2) carrying the rejection
/// reason.
pub fn execute(args: CheckArgs, output: OutputManager) -> CliResult<()> {
    let what = match args.kind {
        IdentifierKind::Module => {
            ModuleName::parse(&args.value).map_err(PrimerError::from)?;
            "module"
        }
        IdentifierKind::Class => {
            ClassName::parse(&args.value).map_err(PrimerError::from)?;
            "class"
        }
    };

    if output.format() == OutputFormat::Json {
        output.json(&serde_json::json!({ "kind": what, "value": args.value, "valid": true }))?;
    } else {
        output.success(&format!("\"{}\" is a valid {what} name", args.value))?;
    }
    Ok(())
}
