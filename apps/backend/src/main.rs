#[tokio::main]
async fn main() -> anyhow::Result<()> {
    study_notes_backend::run().await
}
