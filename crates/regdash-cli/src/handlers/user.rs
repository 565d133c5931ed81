//! User command handlers.

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Show the current simulated user.
pub async fn whoami(ctx: &CliContext) -> Result<()> {
    println!("{}", ctx.users.display_info());
    if let Some(user) = ctx.users.current_user() {
        println!("  username:   {}", user.username);
        println!("  email:      {}", user.email);
        println!("  department: {}", user.department);
        println!(
            "  avatar:     {} on {}",
            user.avatar_initials,
            ctx.users.avatar_style().background_color
        );
        println!(
            "  AI access:  {}",
            if ctx.users.can_use_ai() { "yes" } else { "no" }
        );
    }
    Ok(())
}

/// List the simulated user catalog.
pub async fn list(ctx: &CliContext) -> Result<()> {
    let current_id = ctx.users.current_user().map(|u| u.id);
    for user in ctx.users.available_users() {
        let marker = if current_id.as_deref() == Some(user.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            " {marker} {:<9} {:<18} {:<8} {}",
            user.username,
            user.display_name,
            user.role.as_str(),
            user.department
        );
    }
    Ok(())
}

/// Switch the simulated user by username.
pub async fn switch(ctx: &CliContext, username: &str) -> Result<()> {
    let user = ctx.users.switch_user_by_username(username).await?;
    // The chat view follows the new user's conversation list.
    ctx.conversations.refresh().await;
    println!("Signed in as {} ({})", user.display_name, user.role);
    Ok(())
}

/// Sign the simulated user out.
pub async fn logout(ctx: &CliContext) -> Result<()> {
    ctx.users.logout().await;
    ctx.conversations.refresh().await;
    println!("Signed out. The simulated role is unchanged.");
    Ok(())
}
