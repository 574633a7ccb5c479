#[tokio::main]
async fn main() {
    if let Err(e) = hubguard::run().await {
        eprintln!("hubguard: {e}");
        std::process::exit(1);
    }
}
