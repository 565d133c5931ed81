//! CFR titles view.

use anyhow::Result;

use regdash_core::bundled_titles;

use crate::bootstrap::CliContext;

/// Render the CFR title table, falling back to the bundled catalog when
/// the backend is unreachable.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let titles = match ctx.backend.fetch_titles().await {
        Ok(titles) => titles,
        Err(err) => {
            println!("Warning: backend CFR endpoint not available, using bundled catalog ({err})");
            bundled_titles()
        }
    };

    println!(
        "{:>5}  {:<45} {:<45} {:>6} {:>9}",
        "Title", "Name", "Agency", "Regs", "Conflicts"
    );
    for title in &titles {
        println!(
            "{:>5}  {:<45} {:<45} {:>6} {:>9}",
            title.number, title.name, title.agency, title.regulation_count, title.conflict_count
        );
    }
    println!("{} titles", titles.len());
    Ok(())
}
