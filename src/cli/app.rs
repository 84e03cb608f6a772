use std::sync::Arc;

use crate::{
    Res,
    config::Config,
    deezer::{DeezerClient, MusicService, RateLimiter},
    download::{self, DownloadExecutor},
    m3u::Library,
    management::StateStore,
    sync::{ConsoleNotifier, SyncContext},
};

/// Everything a run needs, built once from the configuration.
pub struct App {
    pub config: Config,
    client: DeezerClient,
    executor: Box<dyn DownloadExecutor>,
    store: StateStore,
    library: Library,
    notifier: ConsoleNotifier,
}

impl App {
    pub fn from_config(config: Config) -> Res<Self> {
        let limiter = Arc::new(RateLimiter::new(config.max_requests, config.time_window));
        let client = DeezerClient::new(&config.api_url, limiter)?;
        let executor = download::executor_from_config(&config);
        let store = StateStore::new(config.state_dir.clone());
        let library = Library::new(config.music_path.clone(), config.playlists_path.clone());

        Ok(Self {
            config,
            client,
            executor,
            store,
            library,
            notifier: ConsoleNotifier,
        })
    }

    pub fn service(&self) -> &dyn MusicService {
        &self.client
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn executor_name(&self) -> &str {
        self.executor.name()
    }

    pub fn context(&self) -> SyncContext<'_> {
        SyncContext {
            service: &self.client,
            executor: self.executor.as_ref(),
            notifier: &self.notifier,
            store: &self.store,
            library: &self.library,
            download_albums: self.config.download_albums,
        }
    }
}
