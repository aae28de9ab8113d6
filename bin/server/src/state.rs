//! Shared application state.

use amber_dialer_assistant::AssistantApi;
use amber_dialer_core::Slug;
use amber_dialer_directory::DirectoryStore;
use amber_dialer_relay::{ConversationRelay, PollConfig};
use std::sync::Arc;

/// State shared by every request handler.
pub struct AppState {
    /// The external assistant service.
    pub api: Arc<dyn AssistantApi>,
    /// The company directory.
    pub directory: Arc<dyn DirectoryStore>,
    /// The conversation relay over both.
    pub relay: ConversationRelay,
    /// Builder for shareable demo and booking links.
    pub links: LinkBuilder,
}

impl AppState {
    /// Assembles application state from its collaborators.
    #[must_use]
    pub fn new(
        api: Arc<dyn AssistantApi>,
        directory: Arc<dyn DirectoryStore>,
        poll: PollConfig,
        links: LinkBuilder,
    ) -> Self {
        let relay =
            ConversationRelay::new(api.clone(), directory.clone()).with_poll_config(poll);
        Self {
            api,
            directory,
            relay,
            links,
        }
    }
}

/// Builds the shareable links returned from provisioning.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    public_base_url: String,
    calendar_base_url: String,
}

impl LinkBuilder {
    /// Creates a link builder for the deployment's public base URL.
    #[must_use]
    pub fn new(public_base_url: &str, calendar_base_url: &str) -> Self {
        Self {
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            calendar_base_url: calendar_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The company's shareable demo page URL.
    #[must_use]
    pub fn demo_url(&self, slug: &Slug) -> String {
        format!("{}/{slug}", self.public_base_url)
    }

    /// The company's booking link.
    #[must_use]
    pub fn calendar_link(&self, slug: &Slug) -> String {
        format!("{}/{slug}", self.calendar_base_url)
    }
}
