//! Session setup and initialization

use crate::api::{ApiClient, SchoolApi};
use crate::config::Config;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::environment::Environment;
use crate::events::{Event, EventSender};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Backend client shared by loaders and the login submitter
    pub api: Arc<dyn SchoolApi>,
    pub environment: Environment,
    /// Sender handed to every background task
    pub event_sender: EventSender,
    /// Event receiver drained by the active mode
    pub event_receiver: mpsc::Receiver<Event>,
    /// Login defaults loaded from disk
    pub config: Config,
    pub config_path: PathBuf,
}

/// Sets up a session against `env`
///
/// Builds the HTTP client (with its cookie store), creates the event channel,
/// and loads the saved login defaults from `config_path`.
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - The HTTP client could not be built
pub fn setup_session(env: Environment, config_path: PathBuf) -> Result<SessionData, Box<dyn Error>> {
    let api = ApiClient::new(env.clone())?;
    let (sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let config = Config::load_or_default(&config_path);

    Ok(SessionData {
        api: Arc::new(api),
        environment: env,
        event_sender: EventSender::new(sender),
        event_receiver,
        config,
        config_path,
    })
}
