use tokio::sync::oneshot;

use crate::error::ApiError;
use crate::http::ListPage;

/// Acknowledges a navigation request with the generation of the fetch it issued.
pub type FetchTicket = oneshot::Sender<u64>;
pub type ActionResponse = oneshot::Sender<Result<(), ApiError>>;

/// Messages a [`ListHandle`](super::ListHandle) sends to its controller.
#[derive(Debug)]
pub enum ControllerRequest<A> {
    SetFilter {
        key: String,
        value: String,
        respond_to: FetchTicket,
    },
    ResetFilters {
        respond_to: FetchTicket,
    },
    GoToPage {
        page: u32,
        respond_to: FetchTicket,
    },
    NextPage {
        respond_to: FetchTicket,
    },
    PrevPage {
        respond_to: FetchTicket,
    },
    SetLimit {
        limit: u32,
        respond_to: FetchTicket,
    },
    Refresh {
        respond_to: FetchTicket,
    },
    RunAction {
        action: A,
        respond_to: ActionResponse,
    },
}

/// Results that spawned fetch and action tasks report back to the controller.
pub(crate) enum Completion<T> {
    Fetched {
        generation: u64,
        result: Result<ListPage<T>, ApiError>,
    },
    ActionDone {
        result: Result<(), ApiError>,
        respond_to: ActionResponse,
    },
}
