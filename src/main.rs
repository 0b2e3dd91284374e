//! CLI entry point for slidekit.

mod app;
mod cli;

use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = cli::Args::parse();
    let code = app::entry::run(args).await;
    std::process::exit(code);
}
