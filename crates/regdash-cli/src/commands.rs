//! Subcommand definitions.

use clap::Subcommand;

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show or switch the simulated role
    Role {
        #[command(subcommand)]
        command: Option<RoleCommand>,
    },

    /// Show or switch the simulated user
    User {
        #[command(subcommand)]
        command: Option<UserCommand>,
    },

    /// Interactive AI chat session
    Chat,

    /// List CFR titles (bundled catalog when the backend is offline)
    Titles,

    /// Show the relationship analytics summary
    Analytics,

    /// Trigger mock-data generation on the backend
    Generate {
        /// Number of CFR titles to generate data for
        #[arg(default_value_t = 5)]
        titles: u32,
    },
}

/// Role subcommands. Defaults to `show`.
#[derive(Debug, Subcommand)]
pub enum RoleCommand {
    /// Show the role-switcher panel
    Show {
        /// Flip the panel between full and minimized and persist the choice
        #[arg(long)]
        toggle_minimize: bool,
    },

    /// Switch the simulated role (case-insensitive)
    Switch {
        /// Role name: ADMIN, ANALYST, AUDITOR, or VISITOR
        name: String,
    },

    /// List all roles and their permissions
    List,
}

/// User subcommands. Defaults to `whoami`.
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Show the current simulated user
    Whoami,

    /// List the simulated user catalog
    List,

    /// Switch the simulated user by username
    Switch {
        /// Username: admin, analyst1, analyst2, auditor, or visitor
        username: String,
    },

    /// Sign the simulated user out (role state is kept)
    Logout,
}
