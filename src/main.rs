use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    synth_scope::app::run().await
}
