//! Fee-burn dashboard.
//!
//! The dashboard is a small state machine: it starts in `Loading`, receives
//! one round aggregate (or an error message), and from then on reacts to
//! row clicks and back presses by moving between seven views:
//!
//! ```text
//! main ─▶ round-parties ─▶ round-transactions ─▶ round-detail
//!   └──▶ day-parties   ─▶ day-transactions   ─▶ day-detail
//! ```
//!
//! Every view is a pure projection of the loaded data plus the selection
//! path carried by the [`View`] variant. Rendering goes through a
//! serialisable [`Page`] model, turned into markup by [`html`].

pub mod chart;
pub mod demo;
pub mod error;
pub mod html;
pub mod page;
pub mod source;
pub mod state;

pub use chart::{Chart, ChartPoint, ChartRenderer, HtmlBarChart};
pub use error::DashboardError;
pub use page::{Card, Page, Row, Section, Table};
pub use source::{load, DataOrigin, DemoRoundSource, RemoteRoundSource, RoundSource};
pub use state::{Dashboard, DashboardData, DrillContext, LoadStatus, NavEvent, Selection, View};
