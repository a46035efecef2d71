//! `keystash set` — add or overwrite a secret.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::{KeystashError, Result};
use crate::vault::SecretStore;

/// Execute the `set` command.
pub fn execute(cli: &Cli, name: &str, value: Option<&str>) -> Result<()> {
    let store = open_store(cli)?;

    let secret_value = if let Some(v) = value {
        output::warning("Value provided on command line — it may appear in shell history.");
        Zeroizing::new(v.to_string())
    } else if !io::stdin().is_terminal() {
        // Piped input.
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed_len = buf.trim_end_matches(['\r', '\n']).len();
        buf.truncate(trimmed_len);
        buf
    } else {
        let entered = dialoguer::Password::new()
            .with_prompt(format!("Enter value for {name}"))
            .allow_empty_password(true)
            .interact()
            .map_err(|e| KeystashError::CommandFailed(format!("input prompt: {e}")))?;
        Zeroizing::new(entered)
    };

    let existed = store.contains(name)?;
    store.store(name, &secret_value)?;

    if existed {
        output::success(&format!("Secret '{name}' updated ({})", store.name()));
    } else {
        output::success(&format!("Secret '{name}' stored ({})", store.name()));
    }

    Ok(())
}
