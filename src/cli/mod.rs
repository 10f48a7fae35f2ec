// CLI module: serving, migrations and seeding

pub mod migrate;
pub mod seed;

use clap::{Parser, Subcommand};

/// ProjectX admin backend
#[derive(Parser)]
#[command(name = "projectx")]
#[command(about = "ProjectX administrative backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply migrations and start the HTTP server (default)
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Create the operation tree, the Super Admin role and the super admin account
    Seed {
        /// Super admin email
        #[arg(long, env = "SUPER_ADMIN_EMAIL")]
        email: Option<String>,

        /// Super admin password
        #[arg(long, env = "SUPER_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}
