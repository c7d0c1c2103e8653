//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and see only driving ports, so
//! they can be exercised with fixtures or mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureItemCommand, FixtureItemQuery, FixtureUserAccounts, ItemCommand, ItemQuery,
    UserAccounts,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Item creation.
    pub items: Arc<dyn ItemCommand>,
    /// Item lookup.
    pub items_query: Arc<dyn ItemQuery>,
    /// Registration, login and token checks.
    pub users: Arc<dyn UserAccounts>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use marketplace::domain::ports::{FixtureItemCommand, FixtureItemQuery, FixtureUserAccounts};
    /// use marketplace::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureItemCommand),
    ///     Arc::new(FixtureItemQuery),
    ///     Arc::new(FixtureUserAccounts),
    /// );
    /// let _items = state.items.clone();
    /// ```
    pub fn new(
        items: Arc<dyn ItemCommand>,
        items_query: Arc<dyn ItemQuery>,
        users: Arc<dyn UserAccounts>,
    ) -> Self {
        Self {
            items,
            items_query,
            users,
        }
    }

    /// State backed entirely by in-process fixtures.
    pub fn fixtures() -> Self {
        Self::new(
            Arc::new(FixtureItemCommand),
            Arc::new(FixtureItemQuery),
            Arc::new(FixtureUserAccounts),
        )
    }
}
