//! Relationship analytics view.

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Render the analytics summary. Requires the `view:all` permission.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    if !ctx.roles.can_view_all() {
        println!(
            "The {} role cannot view analytics. Switch roles with `regdash role switch <name>`.",
            ctx.roles.role_config().display_name
        );
        return Ok(());
    }

    match ctx.backend.fetch_analytics().await {
        Ok(summary) => {
            println!("Regulations:    {:>8}", summary.total_regulations);
            println!("Relationships:  {:>8}", summary.total_relationships);
            println!("Conflicts:      {:>8}", summary.conflict_count);
            println!("Redundancies:   {:>8}", summary.redundancy_count);
        }
        Err(err) => {
            println!("Warning: analytics are unavailable ({err})");
        }
    }
    Ok(())
}
