use server::{config::SETTINGS, fsm::Core, games::GamesHandle};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    log::info!("listen_port={} (transport collaborator's job to bind)", SETTINGS.listen_port);

    let core = Arc::new(Core::load(&SETTINGS.lexicon_path)?);
    let _games = GamesHandle::new();

    log::info!("core ready, awaiting shutdown");
    tokio::signal::ctrl_c().await?;

    Ok(())
}
