//! Remote list view engine: the load → derive → filter → render pipeline
//! shared by every list screen of the admin client.
//!
//! A screen owns a [`ListViewController`], points it at a fetch future, and
//! reads a consistent render model back: current phase, the rows admitted
//! by the active filter, an aggregate over the collection, and the last
//! error. Overlapping fetches follow last-request-wins via monotonically
//! increasing request tickets; a failed refresh never blanks data that is
//! already on screen.

pub use aggregate::{
    Aggregate, ExpiryPolicy, STATUS_ACTIVE, STATUS_EXPIRED, STATUS_EXPIRING_SOON, STATUS_OTHER,
    Summarize, classify_expiry, summarize,
};
pub use controller::{AggregateScope, ListView, ListViewController, ViewPhase};
pub use error::{ErrorInfo, FetchError};
pub use filter::{Facet, FilterPatch, FilterState, Filterable};
pub use money::Money;
pub use resource::{Applied, LoadTicket, Phase, RemoteResource};

mod aggregate;
mod controller;
mod error;
mod filter;
mod money;
mod resource;
