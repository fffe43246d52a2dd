use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "daily-lesson",
    version,
    about = "Pick today's lesson from the course listings and emit the dated page"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Run,
    Demo,
    Show,
}
