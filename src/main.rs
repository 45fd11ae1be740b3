#[tokio::main]
async fn main() -> std::io::Result<()> {
    focusmeter::run().await
}
