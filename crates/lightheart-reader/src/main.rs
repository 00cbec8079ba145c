//! Light Heart Tales terminal reader entry point.

use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use lightheart_reader::app::{Reader, open_store, spawn_stdin_commands};
use lightheart_reader::config::ReaderConfig;
use lightheart_reader::error::AppError;
use lightheart_reader::render::render_not_found;
use lightheart_story::application::loader::load_story;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // Logs go to stderr so they never interleave with the story on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = ReaderConfig::from_env()?;
    tracing::info!(story = %config.story_path.display(), "starting Light Heart Tales reader");

    let graph = Arc::new(load_story(&config.story_path).map_err(AppError::from)?);
    let store = open_store(&config.progress_path);

    let mut reader = match Reader::open(graph, store, &config, std::io::stdout()) {
        Ok(reader) => reader,
        Err(AppError::SceneNotFound(path)) => {
            print!("{}", render_not_found(&path));
            return Ok(ExitCode::FAILURE);
        }
        Err(error) => return Err(error.into()),
    };

    let mut commands = spawn_stdin_commands();
    reader.run(&mut commands).await?;
    reader.close();

    Ok(ExitCode::SUCCESS)
}
