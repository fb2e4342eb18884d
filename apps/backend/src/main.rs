#[tokio::main]
async fn main() -> anyhow::Result<()> {
    openprep_backend::run().await
}
