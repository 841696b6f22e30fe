use std::sync::Arc;

use anyhow::Context;

use crate::{
    config::Config,
    services::{
        catalog::{Catalog, CatalogStore},
        fixtures::{DemoFixtures, FixtureResolver, NoFixtures},
        marketplace::{load_candidates, Ranker},
        providers::{OfflineProvider, OpenAiProvider, StyleProvider, Stylist},
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogStore,
    pub ranker: Arc<Ranker>,
    pub stylist: Stylist,
    pub fixtures: Arc<dyn FixtureResolver>,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        ranker: Ranker,
        provider: Arc<dyn StyleProvider>,
        fixtures: Arc<dyn FixtureResolver>,
    ) -> Self {
        Self {
            catalog: CatalogStore::new(catalog),
            ranker: Arc::new(ranker),
            stylist: Stylist::new(provider),
            fixtures,
        }
    }

    /// Builds the state described by `config`
    ///
    /// Fails only when a configured marketplace catalog cannot be loaded.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let catalog = if config.seed_sample_collection {
            Catalog::with_samples()
        } else {
            Catalog::new()
        };

        let ranker = match &config.marketplace_catalog {
            Some(path) => {
                let candidates = load_candidates(path)
                    .with_context(|| format!("Invalid MARKETPLACE_CATALOG {}", path))?;
                tracing::info!(path = %path, products = candidates.len(), "Loaded marketplace catalog");
                Ranker::new(candidates)
            }
            None => Ranker::default(),
        };

        let provider: Arc<dyn StyleProvider> = match config.api_key() {
            Some(key) => Arc::new(OpenAiProvider::new(
                key.to_string(),
                config.openai_api_url.clone(),
                config.openai_models(),
            )),
            None => {
                tracing::warn!("OPENAI_API_KEY not set, AI features will use fallbacks");
                Arc::new(OfflineProvider)
            }
        };

        let fixtures: Arc<dyn FixtureResolver> = if config.demo_fixtures {
            Arc::new(DemoFixtures)
        } else {
            Arc::new(NoFixtures)
        };

        Ok(Self::new(catalog, ranker, provider, fixtures))
    }
}
