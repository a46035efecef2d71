//! `keystash get` — print a single secret's value.

use crate::cli::{open_store, Cli};
use crate::errors::{KeystashError, Result};
use crate::vault::SecretStore;

/// Execute the `get` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let store = open_store(cli)?;

    match store.retrieve(name)? {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => Err(KeystashError::SecretNotFound(name.to_string())),
    }
}
