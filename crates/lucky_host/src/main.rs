#[tokio::main]
async fn main() {
    if let Err(e) = lucky_host::init().await {
        eprintln!("❌ Lucky Barrel host failed: {e}");
        std::process::exit(1);
    }
}
