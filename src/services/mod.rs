//! Service layer for business logic operations.
//!
//! Services coordinate between repositories, upstream providers and
//! handlers. Handlers never call each other; everything they share lives here.

mod coach_service;
mod community_service;
mod competition_service;
mod quote_service;
mod savings_service;

pub use coach_service::{CoachReply, CoachService};
pub use community_service::{CommunityService, CommunitySnapshot};
pub use competition_service::{CompetitionService, LeaderboardEntry};
pub use quote_service::{QuoteService, SymbolQuote};
pub use savings_service::{SaveInput, SaveOutcome, SavingsService};

#[cfg(test)]
pub(crate) use coach_service::tests::StubChat;
#[cfg(test)]
pub(crate) use quote_service::tests::StubQuotes;

use std::sync::Arc;

use crate::config::Settings;
use crate::external::{ChatProvider, FinnhubQuotes, OpenAiChat, QuoteProvider};
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap: repositories share the pool and providers sit behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub quotes: QuoteService,
    pub coach: CoachService,
    pub savings: SavingsService,
    pub competitions: CompetitionService,
    pub community: CommunityService,
}

impl Services {
    /// Wire services to the configured upstream providers.
    pub fn new(repos: Repositories, settings: &Settings) -> Self {
        Self::with_providers(
            repos,
            settings,
            Arc::new(FinnhubQuotes::new(&settings.quotes)),
            Arc::new(OpenAiChat::new(&settings.coach)),
        )
    }

    /// Wire services to explicit providers.
    pub fn with_providers(
        repos: Repositories,
        settings: &Settings,
        quote_provider: Arc<dyn QuoteProvider>,
        chat_provider: Arc<dyn ChatProvider>,
    ) -> Self {
        Self {
            quotes: QuoteService::new(quote_provider, settings.quotes.max_symbols),
            coach: CoachService::new(chat_provider, settings.coach.system_prompt.clone()),
            savings: SavingsService::new(
                repos.users,
                repos.saves,
                repos.competitions.clone(),
                repos.community.clone(),
            ),
            competitions: CompetitionService::new(repos.competitions),
            community: CommunityService::new(repos.community),
        }
    }
}
