//! `keystash reset-key` — replace the master key.
//!
//! Works on a vault whose key file is corrupted: the store is never
//! opened, only the key provider is touched.  Existing secret files are
//! left in place and will fail to decrypt under the new key.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{base_dir, Cli};
use crate::config::{Backend, Settings};
use crate::crypto::MasterKeyProvider;
use crate::errors::{KeystashError, Result};

/// Execute the `reset-key` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let base = base_dir(cli)?;
    let settings = Settings::load(&base)?;

    if settings.backend != Backend::File {
        return Err(KeystashError::CommandFailed(
            "reset-key only applies to the file backend".into(),
        ));
    }

    if !force {
        output::warning("Every stored secret will become permanently unreadable.");
        let confirmed = Confirm::new()
            .with_prompt("Reset the master key?")
            .default(false)
            .interact()
            .map_err(|e| KeystashError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let provider = MasterKeyProvider::new(settings.key_path(&base));
    provider.reset_key()?;

    output::success(&format!(
        "New master key written to {}",
        provider.path().display()
    ));
    output::tip("Store your secrets again with `keystash set <NAME>`.");
    Ok(())
}
