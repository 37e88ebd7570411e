//! # Validators Subcommand
//!
//! Lists the backends registered in this build, marks the default, and
//! shows which one `NBCHECK_VALIDATOR` currently selects.

use anyhow::Result;
use clap::Args;
use nbcheck_schema::registry;

/// Arguments for the validators subcommand.
#[derive(Args, Debug)]
pub struct ValidatorsArgs {}

/// Execute the validators subcommand. Fails if `NBCHECK_VALIDATOR` names
/// an unregistered backend.
pub fn run_validators(_args: &ValidatorsArgs, json: bool) -> Result<u8> {
    let default = registry::default_backend();
    let names = registry::registered_names();
    let selected = registry::current_backend()?;

    if json {
        let value = serde_json::json!({
            "registered": names,
            "default": default,
            "selected": selected,
            "env": registry::VALIDATOR_ENV_VAR,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(0);
    }

    println!("Registered validators:");
    for name in &names {
        let marker = if *name == default.as_str() { " (default)" } else { "" };
        println!("  {name}{marker}");
    }
    println!();
    println!("{}: {selected}", registry::VALIDATOR_ENV_VAR);
    Ok(0)
}
