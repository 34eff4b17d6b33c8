use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, info_span, instrument, warn, Instrument};

use super::messages::{ActionResponse, Completion, ControllerRequest, FetchTicket};
use super::source::ListSource;
use crate::domain::Pagination;
use crate::error::ApiError;
use crate::http::{Filters, ListPage, ListQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Success,
    Error,
}

/// Everything a list page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub filters: Filters,
    pub pagination: Pagination,
    pub load: LoadState,
    /// Message of the last failed fetch.
    pub error: Option<String>,
    /// Message of the last failed row action.
    pub action_error: Option<String>,
    /// Generation of the most recently issued fetch.
    pub generation: u64,
}

impl<T> ListState<T> {
    fn initial(query: &ListQuery) -> Self {
        Self {
            items: Vec::new(),
            filters: query.filters.clone(),
            pagination: Pagination { current_page: query.page, limit: query.limit, ..Pagination::default() },
            load: LoadState::Idle,
            error: None,
            action_error: None,
            generation: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }
}

/// Actor owning one list page.
///
/// Every filter, page or limit change issues a fetch stamped with a new
/// generation. Fetches run in spawned tasks and report back through an
/// internal channel; a result whose generation is no longer the latest is
/// dropped, so the page always shows the answer to the newest request.
///
/// Row actions also run in spawned tasks. Whether they succeed or fail,
/// the list is fetched again afterwards and never patched locally.
pub struct ListController<S: ListSource> {
    source: Arc<S>,
    receiver: mpsc::Receiver<ControllerRequest<S::Action>>,
    completions_tx: mpsc::UnboundedSender<Completion<S::Item>>,
    completions: mpsc::UnboundedReceiver<Completion<S::Item>>,
    query: ListQuery,
    state: watch::Sender<ListState<S::Item>>,
    generation: u64,
}

impl<S: ListSource> ListController<S> {
    pub fn new(source: S, query: ListQuery, buffer_size: usize) -> (Self, ListHandle<S::Item, S::Action>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (completions_tx, completions) = mpsc::unbounded_channel();
        let (state, state_rx) = watch::channel(ListState::initial(&query));
        let controller = Self {
            source: Arc::new(source),
            receiver,
            completions_tx,
            completions,
            query,
            state,
            generation: 0,
        };
        (controller, ListHandle { sender, state: state_rx })
    }

    /// Fetches once on start, then serves requests until every handle is dropped.
    #[instrument(name = "list_controller", skip(self))]
    pub async fn run(mut self) {
        info!("ListController starting");
        self.start_fetch();

        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(request) => self.handle_request(request),
                    None => break,
                },
                Some(completion) = self.completions.recv() => self.handle_completion(completion),
            }
        }

        info!("ListController stopped");
    }

    fn handle_request(&mut self, request: ControllerRequest<S::Action>) {
        match request {
            ControllerRequest::SetFilter { key, value, respond_to } => {
                self.handle_set_filter(key, value, respond_to);
            }
            ControllerRequest::ResetFilters { respond_to } => {
                debug!("Resetting filters");
                self.query.filters.clear();
                self.query.page = 1;
                self.fetch_and_ack(respond_to);
            }
            ControllerRequest::GoToPage { page, respond_to } => {
                self.query.page = page.max(1);
                self.fetch_and_ack(respond_to);
            }
            ControllerRequest::NextPage { respond_to } => {
                self.handle_step(true, respond_to);
            }
            ControllerRequest::PrevPage { respond_to } => {
                self.handle_step(false, respond_to);
            }
            ControllerRequest::SetLimit { limit, respond_to } => {
                self.query.limit = limit.max(1);
                self.query.page = 1;
                self.fetch_and_ack(respond_to);
            }
            ControllerRequest::Refresh { respond_to } => {
                self.fetch_and_ack(respond_to);
            }
            ControllerRequest::RunAction { action, respond_to } => {
                self.handle_run_action(action, respond_to);
            }
        }
    }

    #[instrument(fields(key = %key, value = %value), skip(self, key, value, respond_to))]
    fn handle_set_filter(&mut self, key: String, value: String, respond_to: FetchTicket) {
        debug!("Processing set_filter request");
        self.query.filters.set(key, value);
        self.query.page = 1;
        self.fetch_and_ack(respond_to);
    }

    /// Moves one page when the server said a page exists in that direction.
    fn handle_step(&mut self, forward: bool, respond_to: FetchTicket) {
        let pagination = self.state.borrow().pagination;
        let allowed = if forward { pagination.has_next_page } else { pagination.has_prev_page };
        if !allowed {
            debug!(forward, "No page in that direction");
            let _ = respond_to.send(self.generation);
            return;
        }
        self.query.page = if forward {
            pagination.current_page.saturating_add(1)
        } else {
            pagination.current_page.saturating_sub(1).max(1)
        };
        self.fetch_and_ack(respond_to);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_run_action(&mut self, action: S::Action, respond_to: ActionResponse) {
        debug!("Processing run_action request");
        let source = Arc::clone(&self.source);
        let completions = self.completions_tx.clone();
        tokio::spawn(
            async move {
                let result = source.apply(action).await;
                let _ = completions.send(Completion::ActionDone { result, respond_to });
            }
            .instrument(info_span!("row_action")),
        );
    }

    fn handle_completion(&mut self, completion: Completion<S::Item>) {
        match completion {
            Completion::Fetched { generation, result } => self.handle_fetched(generation, result),
            Completion::ActionDone { result, respond_to } => {
                match &result {
                    Ok(()) => info!("Row action completed"),
                    Err(e) => warn!(error = %e, "Row action failed"),
                }
                let action_error = result.as_ref().err().map(ToString::to_string);
                self.state.send_modify(|state| state.action_error = action_error);
                self.start_fetch();
                let _ = respond_to.send(result);
            }
        }
    }

    #[instrument(skip(self, result))]
    fn handle_fetched(&mut self, generation: u64, result: Result<ListPage<S::Item>, ApiError>) {
        if generation != self.generation {
            debug!(latest = self.generation, "Discarding stale fetch result");
            return;
        }

        match result {
            Ok(page) => {
                info!(count = page.items.len(), "List loaded");
                self.state.send_modify(|state| {
                    state.items = page.items;
                    if let Some(patch) = &page.pagination {
                        state.pagination.merge(patch);
                    }
                    state.load = LoadState::Success;
                    state.error = None;
                });
                self.query.page = self.state.borrow().pagination.current_page;
            }
            Err(e) => {
                warn!(error = %e, "List fetch failed");
                self.state.send_modify(|state| {
                    state.load = LoadState::Error;
                    state.error = Some(e.to_string());
                });
            }
        }
    }

    fn fetch_and_ack(&mut self, respond_to: FetchTicket) {
        let generation = self.start_fetch();
        let _ = respond_to.send(generation);
    }

    /// Publishes the loading state and spawns the fetch for the current query.
    fn start_fetch(&mut self) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        let query = self.query.clone();

        self.state.send_modify(|state| {
            // Direction flags describe the page last loaded. Until the new
            // page answers there is no page to step to.
            if state.pagination.current_page != query.page {
                state.pagination.has_next_page = false;
                state.pagination.has_prev_page = false;
            }
            state.filters = query.filters.clone();
            state.pagination.current_page = query.page;
            state.pagination.limit = query.limit;
            state.load = LoadState::Loading;
            state.error = None;
            state.generation = generation;
        });

        let source = Arc::clone(&self.source);
        let completions = self.completions_tx.clone();
        tokio::spawn(
            async move {
                debug!("Fetching list");
                let result = source.fetch(&query).await;
                let _ = completions.send(Completion::Fetched { generation, result });
            }
            .instrument(info_span!("fetch", generation)),
        );
        generation
    }
}

/// Client side of a [`ListController`].
pub struct ListHandle<T, A> {
    sender: mpsc::Sender<ControllerRequest<A>>,
    state: watch::Receiver<ListState<T>>,
}

impl<T, A> Clone for ListHandle<T, A> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone(), state: self.state.clone() }
    }
}

impl<T: Clone, A> ListHandle<T, A> {
    async fn navigate(&self, build: impl FnOnce(FetchTicket) -> ControllerRequest<A>) -> Result<u64, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ApiError::ActorCommunicationError("list controller closed".to_string()))?;
        response
            .await
            .map_err(|_| ApiError::ActorCommunicationError("list controller dropped request".to_string()))
    }

    /// Sets (or, with an empty value, removes) a filter and returns to page 1.
    pub async fn set_filter(&self, key: impl Into<String>, value: impl Into<String>) -> Result<u64, ApiError> {
        let (key, value) = (key.into(), value.into());
        self.navigate(|respond_to| ControllerRequest::SetFilter { key, value, respond_to }).await
    }

    pub async fn reset_filters(&self) -> Result<u64, ApiError> {
        self.navigate(|respond_to| ControllerRequest::ResetFilters { respond_to }).await
    }

    pub async fn go_to_page(&self, page: u32) -> Result<u64, ApiError> {
        self.navigate(|respond_to| ControllerRequest::GoToPage { page, respond_to }).await
    }

    pub async fn next_page(&self) -> Result<u64, ApiError> {
        self.navigate(|respond_to| ControllerRequest::NextPage { respond_to }).await
    }

    pub async fn prev_page(&self) -> Result<u64, ApiError> {
        self.navigate(|respond_to| ControllerRequest::PrevPage { respond_to }).await
    }

    pub async fn set_limit(&self, limit: u32) -> Result<u64, ApiError> {
        self.navigate(|respond_to| ControllerRequest::SetLimit { limit, respond_to }).await
    }

    pub async fn refresh(&self) -> Result<u64, ApiError> {
        self.navigate(|respond_to| ControllerRequest::Refresh { respond_to }).await
    }

    /// Runs a row action. Resolves once the action has finished and the
    /// follow-up fetch has been issued.
    pub async fn run_action(&self, action: A) -> Result<(), ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ControllerRequest::RunAction { action, respond_to })
            .await
            .map_err(|_| ApiError::ActorCommunicationError("list controller closed".to_string()))?;
        response
            .await
            .map_err(|_| ApiError::ActorCommunicationError("list controller dropped request".to_string()))?
    }

    pub fn snapshot(&self) -> ListState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.state.clone()
    }

    /// Waits until at least one fetch was issued and none is in flight.
    pub async fn settled(&self) -> Result<ListState<T>, ApiError> {
        let mut state = self.state.clone();
        let settled = state
            .wait_for(|s| s.generation > 0 && !s.is_loading())
            .await
            .map_err(|_| ApiError::ActorCommunicationError("list controller stopped".to_string()))?;
        Ok(settled.clone())
    }
}
