//! Service tests for the dashboard
//!
//! This module contains tests for the catalog, data source client and session store.
