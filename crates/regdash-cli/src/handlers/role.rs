//! Role command handlers.

use anyhow::Result;

use regdash_core::{Role, keys};

use crate::bootstrap::CliContext;

/// Show the role-switcher panel.
///
/// The minimized flag persists across invocations under the
/// `role_switcher_minimized` key, like the floating panel it mirrors.
pub async fn show(ctx: &CliContext, toggle_minimize: bool) -> Result<()> {
    let mut minimized = matches!(
        ctx.store.get(keys::ROLE_SWITCHER_MINIMIZED).await,
        Ok(Some(flag)) if flag == "true"
    );

    if toggle_minimize {
        minimized = !minimized;
        let flag = if minimized { "true" } else { "false" };
        if let Err(err) = ctx.store.set(keys::ROLE_SWITCHER_MINIMIZED, flag).await {
            println!("Warning: could not persist the panel state ({err})");
        }
    }

    let config = ctx.roles.role_config();
    if minimized {
        // Compact badge: first letter of the role, like the collapsed panel.
        println!(
            "Dev Mode: [{}]  (run `regdash role show --toggle-minimize` to expand)",
            config.name.chars().next().unwrap_or('?')
        );
        return Ok(());
    }

    println!("Dev Mode: {} ({})", config.display_name, config.name);
    println!("  {}", config.description);
    println!("  badge color: {}", config.color);
    println!();
    println!("Available roles:");
    for role in Role::ALL {
        let marker = if role == ctx.roles.current_role() {
            "*"
        } else {
            " "
        };
        let config = role.config();
        println!(
            " {marker} {:<8} {:<20} {}",
            config.name, config.display_name, config.description
        );
    }
    Ok(())
}

/// Switch the simulated role.
pub async fn switch(ctx: &CliContext, name: &str) -> Result<()> {
    let role = ctx.roles.simulate_role(name).await?;
    let config = role.config();
    println!("Simulated role is now {} ({})", config.display_name, config.name);
    Ok(())
}

/// List roles with their permission sets, locally and server-side.
pub async fn list(ctx: &CliContext) -> Result<()> {
    println!("Built-in roles:");
    for role in Role::ALL {
        println!("  {:<8} {}", role.as_str(), role.permissions().join(", "));
    }

    match ctx.backend.available_roles().await {
        Ok(server_roles) => {
            println!();
            println!("Server roles:");
            for role in server_roles {
                println!("  {:<8} {}", role.name, role.permissions.join(", "));
            }
        }
        Err(err) => {
            println!();
            println!("Warning: could not load server roles ({err})");
        }
    }
    Ok(())
}
