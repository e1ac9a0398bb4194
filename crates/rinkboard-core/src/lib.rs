// Library root for the league dashboard core: data model, navigation state,
// history bridge, derived metrics, API client, and sync orchestration.

pub mod api;
pub mod history;
pub mod metrics;
pub mod model;
pub mod navigation;
pub mod salary_csv;
pub mod store;
pub mod sync;
pub mod view;
