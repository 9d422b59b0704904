use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = mailgen::cli::Cli::parse();

    if let Err(err) = mailgen::run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
