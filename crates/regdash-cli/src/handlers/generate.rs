//! Mock-data generation trigger.

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Ask the backend to generate mock regulation data. Requires the
/// `generate:data` permission.
pub async fn execute(ctx: &CliContext, titles: u32) -> Result<()> {
    if !ctx.roles.can_generate() {
        println!(
            "The {} role cannot generate data. Switch roles with `regdash role switch <name>`.",
            ctx.roles.role_config().display_name
        );
        return Ok(());
    }

    match ctx.backend.generate_mock_data(titles).await {
        Ok(()) => println!("Mock data generation started for {titles} titles."),
        Err(err) => println!("Warning: generation request failed ({err})"),
    }
    Ok(())
}
