//! List, enable and disable check-in policies.

use tracing::info;

use crate::config::Config;
use crate::error::Error;
use crate::host::PolicyHost;

/// Run policies command.
pub fn list() -> Result<(), Error> {
    let config = Config::load()?;
    let mut host = PolicyHost::with_builtin_policies();
    host.apply_config(&config)?;

    for (descriptor, enabled) in host.policies() {
        let state = if enabled { "enabled" } else { "disabled" };
        println!("{} [{}]", descriptor.display_name, state);
        println!("  id:      {}", descriptor.unique_id);
        println!("  about:   {}", descriptor.short_description);
        println!("  install: {}", descriptor.install_hint);
    }
    Ok(())
}

/// Run enable/disable command.
pub fn set_enabled(unique_id: &str, enabled: bool) -> Result<(), Error> {
    let mut config = Config::load()?;
    update_config(&mut config, unique_id, enabled)?;
    config.save()?;

    println!(
        "Policy {} {}.",
        unique_id,
        if enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}

/// Toggle a policy and write every policy's state back into the config.
pub fn update_config(config: &mut Config, unique_id: &str, enabled: bool) -> Result<(), Error> {
    let mut host = PolicyHost::with_builtin_policies();
    host.apply_config(config)?;
    host.set_enabled(unique_id, enabled)?;
    host.store_config(config)?;
    info!(policy = unique_id, enabled, "Updated policy config");
    Ok(())
}
