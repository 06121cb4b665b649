use std::sync::Arc;

use dosh_config::Config;
use dosh_config::audio::AudioConfig;
use dosh_config::dictionary::DictionaryConfig;
use dosh_remote::RemoteStore;

/// Everything the components share for one editing session.
///
/// The store owns the credential; paths and layout come from config.
pub struct SessionContext {
    store: Arc<dyn RemoteStore>,
    dictionary: DictionaryConfig,
    audio: AudioConfig,
}

impl SessionContext {
    pub fn new(store: Arc<dyn RemoteStore>, dictionary: DictionaryConfig, audio: AudioConfig) -> Self {
        Self {
            store,
            dictionary,
            audio,
        }
    }

    pub fn from_config(store: Arc<dyn RemoteStore>, config: &Config) -> Self {
        Self::new(store, config.dictionary.clone(), config.audio.clone())
    }

    pub fn store(&self) -> &dyn RemoteStore {
        self.store.as_ref()
    }

    pub fn admin_path(&self) -> &str {
        &self.dictionary.admin_path
    }

    pub fn public_path(&self) -> &str {
        &self.dictionary.public_path
    }

    pub fn schema_version(&self) -> &str {
        &self.dictionary.schema_version
    }

    pub fn audio(&self) -> &AudioConfig {
        &self.audio
    }
}
