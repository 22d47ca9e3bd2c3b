use crate::api::{Client, Error, Profile, Repository, Result};
use crate::languages::{top_languages, LanguageShare};
use crate::listing::Totals;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Everything shown for one searched user.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub profile: Profile,
    pub repositories: Vec<Repository>,
    pub languages: Vec<LanguageShare>,
    pub totals: Totals,
}

impl Report {
    pub fn new(profile: Profile, repositories: Vec<Repository>) -> Self {
        let languages = top_languages(&repositories);
        let totals = Totals::of(&repositories);
        Report {
            profile,
            repositories,
            languages,
            totals,
        }
    }
}

/// Fetches profile and repositories concurrently. Fails with the first error of either request.
pub async fn fetch_report<C: Client>(client: &C, handle: &str) -> Result<Report> {
    let (profile, repositories) = futures::try_join!(client.profile(handle), client.repositories(handle))?;
    debug!("Fetched profile {} with {} repositories", profile.login, repositories.len());
    Ok(Report::new(profile, repositories))
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading {
        generation: u64,
        handle: String,
    },
    Ready {
        generation: u64,
        report: Arc<Report>,
    },
    Failed {
        generation: u64,
        error: Error,
    },
}

#[derive(Debug, Clone)]
pub enum Transition {
    Started { generation: u64, handle: String },
    Succeeded { generation: u64, report: Arc<Report> },
    Failed { generation: u64, error: Error },
    Abandoned { generation: u64 },
}

impl Transition {
    fn generation(&self) -> u64 {
        match self {
            Transition::Started { generation, .. }
            | Transition::Succeeded { generation, .. }
            | Transition::Failed { generation, .. }
            | Transition::Abandoned { generation } => *generation,
        }
    }
}

impl SearchState {
    pub fn generation(&self) -> u64 {
        match self {
            SearchState::Idle => 0,
            SearchState::Loading { generation, .. }
            | SearchState::Ready { generation, .. }
            | SearchState::Failed { generation, .. } => *generation,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading { .. })
    }

    pub fn report(&self) -> Option<&Arc<Report>> {
        match self {
            SearchState::Ready { report, .. } => Some(report),
            _ => None,
        }
    }

    /// Applies `transition`, ignoring it when it belongs to a superseded search.
    ///
    /// A new search replaces whatever is shown. Outcomes only land on the `Loading` state of the
    /// same generation.
    pub fn reduce(self, transition: Transition) -> SearchState {
        match (self, transition) {
            (state, Transition::Started { generation, handle }) if generation > state.generation() => {
                SearchState::Loading { generation, handle }
            }
            (SearchState::Loading { generation: current, .. }, transition) if transition.generation() == current => {
                match transition {
                    Transition::Succeeded { generation, report } => SearchState::Ready { generation, report },
                    Transition::Failed { generation, error } => SearchState::Failed { generation, error },
                    Transition::Abandoned { .. } => SearchState::Idle,
                    Transition::Started { generation, handle } => SearchState::Loading { generation, handle },
                }
            }
            (state, transition) => {
                warn!(
                    "Ignoring stale search result of generation {} (current {})",
                    transition.generation(),
                    state.generation()
                );
                state
            }
        }
    }
}

/// Drives user searches and publishes the resulting [`SearchState`].
pub struct Search {
    generation: AtomicU64,
    state: watch::Sender<SearchState>,
}

impl Default for Search {
    fn default() -> Self {
        let (state, _) = watch::channel(SearchState::Idle);
        Search {
            generation: AtomicU64::new(0),
            state,
        }
    }
}

impl Search {
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub async fn run<C: Client>(&self, client: &C, handle: &str) -> Result<Arc<Report>> {
        let handle = handle.trim();
        if handle.is_empty() {
            return Err(Error::BlankHandle);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Searching for {} (generation {})", handle, generation);
        self.dispatch(Transition::Started {
            generation,
            handle: handle.to_string(),
        });
        let in_flight = InFlight {
            search: self,
            generation,
            settled: false,
        };

        match fetch_report(client, handle).await {
            Ok(report) => {
                let report = Arc::new(report);
                in_flight.settle(Transition::Succeeded {
                    generation,
                    report: report.clone(),
                });
                Ok(report)
            }
            Err(error) => {
                warn!("Search for {} failed: {}", handle, error);
                in_flight.settle(Transition::Failed {
                    generation,
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    fn dispatch(&self, transition: Transition) {
        self.state.send_modify(|state| {
            *state = std::mem::take(state).reduce(transition);
        });
    }
}

/// Releases the loading state of its generation on every exit path, including a dropped future.
struct InFlight<'a> {
    search: &'a Search,
    generation: u64,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, transition: Transition) {
        self.settled = true;
        self.search.dispatch(transition);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            debug!("Search generation {} abandoned", self.generation);
            self.search.dispatch(Transition::Abandoned {
                generation: self.generation,
            });
        }
    }
}
