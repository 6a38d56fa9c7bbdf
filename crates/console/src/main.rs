#[tokio::main]
async fn main() {
    console::start(std::env::args()).await;
}
