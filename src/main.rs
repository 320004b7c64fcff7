/*
 * Responsibility
 * - tokio runtime
 * - call app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    image3d_proxy::app::run().await
}
