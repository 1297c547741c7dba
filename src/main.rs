use clap::Parser;
use std::process;
use visitor_counter::cli::{Cli, Commands};
use visitor_counter::cli_handlers;
use visitor_counter::config::ServerConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.logging().init();

    let result = match cli.command {
        Commands::Serve { host, port } => {
            cli_handlers::handle_serve(ServerConfig {
                host,
                port,
                db_path: cli.db,
            })
            .await
        }
        Commands::Count => cli_handlers::handle_count(&cli.db),
        Commands::Reset => cli_handlers::handle_reset(&cli.db),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
