#[tokio::main]
async fn main() -> anyhow::Result<()> {
    concept_coach_backend::run().await
}
