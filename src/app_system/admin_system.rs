use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use super::config::AppConfig;
use crate::controller::{ListController, ListHandle, ListSource};
use crate::error::ApiError;
use crate::http::{ApiClient, ListQuery, ReqwestTransport};
use crate::services::{FeeService, MaterialService, OrderService, TaxService, UserService, VendorService};
use crate::session::Session;

const CONTROLLER_BUFFER: usize = 32;

/// Every admin service over one authenticated client, plus the list
/// controllers opened against them.
pub struct AdminSystem {
    pub orders: OrderService,
    pub fees: FeeService,
    pub materials: MaterialService,
    pub vendors: VendorService,
    pub users: UserService,
    pub tax: TaxService,
    handles: Vec<JoinHandle<()>>,
}

impl AdminSystem {
    pub fn new(api: ApiClient) -> Self {
        Self {
            orders: OrderService::new(api.clone()),
            fees: FeeService::new(api.clone()),
            materials: MaterialService::new(api.clone()),
            vendors: VendorService::new(api.clone()),
            users: UserService::new(api.clone()),
            tax: TaxService::new(api),
            handles: Vec::new(),
        }
    }

    /// Production wiring: `reqwest` transport from the configuration.
    pub fn connect(config: &AppConfig, session: Session) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&config.api_base_url, config.http_timeout)?;
        info!(api_base_url = %config.api_base_url, "Admin system connected");
        Ok(Self::new(ApiClient::new(Arc::new(transport), session)))
    }

    /// Spawns a list controller over `source`; it fetches immediately.
    pub fn open_list<S: ListSource>(&mut self, source: S, query: ListQuery) -> ListHandle<S::Item, S::Action> {
        let (controller, handle) = ListController::new(source, query, CONTROLLER_BUFFER);
        self.handles.push(tokio::spawn(controller.run()));
        handle
    }

    /// Waits for every opened controller to stop. Controllers stop once all
    /// of their handles are dropped, so drop those first.
    pub async fn shutdown(self) -> Result<(), ApiError> {
        info!("Shutting down admin system...");
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("List controller task failed: {:?}", e);
                return Err(ApiError::ActorCommunicationError(format!("list controller task failed: {e}")));
            }
        }
        info!("Admin system shutdown complete.");
        Ok(())
    }
}
