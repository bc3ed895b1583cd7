#[tokio::main]
async fn main() {
    if let Err(e) = product_reviews_be::start_server().await {
        eprintln!("Failed to start product reviews server: {}", e);
        std::process::exit(1);
    }
}
