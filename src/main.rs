#[tokio::main]
async fn main() {
    if let Err(e) = connecta_stats::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
