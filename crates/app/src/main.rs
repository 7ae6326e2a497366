use clap::Parser;

use quill_app::cli::Args;
use quill_app::Config;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let config = Config::from(args);

    quill_app::process::spawn_service(&config).await;
}
