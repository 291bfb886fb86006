//! Payloads for the landing page and the admin dashboard.

use crate::{
    model::transit::{
        AlertDto, DashboardDto, DriverDto, LandingDto, RouteDto, ALERTS_COLLECTION,
        DRIVERS_COLLECTION, ROUTES_COLLECTION,
    },
    server::{
        error::{store::StoreError, Error},
        model::{
            query::{CollectionQuery, Direction},
            session::Principal,
            timestamp::LAST_UPDATED_FIELD,
        },
        service::cache::{PageCache, DASHBOARD_PATH, LANDING_PATH},
        store::DocumentStore,
        sync::decode_documents,
    },
};

/// Routes sorted by name.
pub fn routes_query() -> CollectionQuery {
    CollectionQuery::new(ROUTES_COLLECTION).order_by("nombre", Direction::Asc)
}

/// Alerts, newest first.
pub fn alerts_query() -> CollectionQuery {
    CollectionQuery::new(ALERTS_COLLECTION).order_by(LAST_UPDATED_FIELD, Direction::Desc)
}

/// Drivers sorted by name.
pub fn drivers_query() -> CollectionQuery {
    CollectionQuery::new(DRIVERS_COLLECTION).order_by("nombre", Direction::Asc)
}

/// The query a page uses for `collection`, or an unordered one for anything else.
pub fn query_for(collection: &str) -> CollectionQuery {
    match collection {
        ROUTES_COLLECTION => routes_query(),
        ALERTS_COLLECTION => alerts_query(),
        DRIVERS_COLLECTION => drivers_query(),
        other => CollectionQuery::new(other),
    }
}

pub struct ViewService<'a> {
    store: &'a DocumentStore,
    pages: &'a PageCache,
}

impl<'a> ViewService<'a> {
    pub fn new(store: &'a DocumentStore, pages: &'a PageCache) -> Self {
        Self { store, pages }
    }

    pub async fn routes(&self, caller: Option<&Principal>) -> Result<Vec<RouteDto>, StoreError> {
        let documents = self.store.list(caller, &routes_query()).await?;

        Ok(decode_documents(&documents))
    }

    pub async fn alerts(&self, caller: Option<&Principal>) -> Result<Vec<AlertDto>, StoreError> {
        let documents = self.store.list(caller, &alerts_query()).await?;

        Ok(decode_documents(&documents))
    }

    pub async fn drivers(&self, caller: Option<&Principal>) -> Result<Vec<DriverDto>, StoreError> {
        let documents = self.store.list(caller, &drivers_query()).await?;

        Ok(decode_documents(&documents))
    }

    /// Landing page payload, served from the page cache when present.
    pub async fn landing(&self) -> Result<LandingDto, Error> {
        let payload = self
            .pages
            .get_or_render(LANDING_PATH, || async {
                let landing = LandingDto {
                    routes: self.routes(None).await?,
                    alerts: self.alerts(None).await?,
                };

                Ok::<_, Error>(serde_json::to_value(landing)?)
            })
            .await?;

        Ok(serde_json::from_value(payload)?)
    }

    /// Dashboard payload for a signed-in `caller`.
    ///
    /// Drivers are only queried for admins; other signed-in users get an empty driver list
    /// instead of a permission error.
    pub async fn dashboard(&self, caller: &Principal) -> Result<DashboardDto, Error> {
        let variant = if caller.admin { "admin" } else { "user" };
        let key = format!("{}?{}", DASHBOARD_PATH, variant);

        let payload = self
            .pages
            .get_or_render(&key, || async {
                let drivers = match caller.admin {
                    true => self.drivers(Some(caller)).await?,
                    false => Vec::new(),
                };
                let dashboard = DashboardDto {
                    routes: self.routes(Some(caller)).await?,
                    alerts: self.alerts(Some(caller)).await?,
                    drivers,
                    is_admin: caller.admin,
                };

                Ok::<_, Error>(serde_json::to_value(dashboard)?)
            })
            .await?;

        Ok(serde_json::from_value(payload)?)
    }
}
