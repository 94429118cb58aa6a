//! Dashboard view state machine.

use feeburn_types::{BurnAggregate, Day, Party, Round, Transaction};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::DashboardError;
use crate::page::{self, Page};
use crate::source::DataOrigin;

/// Which branch of the drill-down a transactions or detail view belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrillContext {
    #[default]
    Round,
    Day,
}

/// The view currently shown.
///
/// Each variant carries exactly the selection path it needs, as indices into
/// the loaded [`DashboardData`]. A detail view cannot exist without its
/// party and its round or day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum View {
    #[default]
    Main,
    RoundParties {
        round: usize,
    },
    DayParties {
        day: usize,
    },
    RoundTransactions {
        round: usize,
        party: usize,
    },
    DayTransactions {
        day: usize,
        party: usize,
    },
    RoundDetail {
        round: usize,
        party: usize,
        tx: usize,
    },
    DayDetail {
        day: usize,
        party: usize,
        tx: usize,
    },
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::RoundParties { .. } => "round-parties",
            Self::DayParties { .. } => "day-parties",
            Self::RoundTransactions { .. } => "round-transactions",
            Self::DayTransactions { .. } => "day-transactions",
            Self::RoundDetail { .. } => "round-detail",
            Self::DayDetail { .. } => "day-detail",
        }
    }

    /// Drill branch of this view; `None` for `main`.
    pub fn drill_context(&self) -> Option<DrillContext> {
        match self {
            Self::Main => None,
            Self::RoundParties { .. } | Self::RoundTransactions { .. } | Self::RoundDetail { .. } => {
                Some(DrillContext::Round)
            }
            Self::DayParties { .. } | Self::DayTransactions { .. } | Self::DayDetail { .. } => {
                Some(DrillContext::Day)
            }
        }
    }

    /// Target of the back action: parties → main, transactions → parties,
    /// detail → transactions. `main` has none.
    pub fn parent(&self) -> Option<View> {
        match *self {
            Self::Main => None,
            Self::RoundParties { .. } | Self::DayParties { .. } => Some(Self::Main),
            Self::RoundTransactions { round, .. } => Some(Self::RoundParties { round }),
            Self::DayTransactions { day, .. } => Some(Self::DayParties { day }),
            Self::RoundDetail { round, party, .. } => Some(Self::RoundTransactions { round, party }),
            Self::DayDetail { day, party, .. } => Some(Self::DayTransactions { day, party }),
        }
    }
}

/// User input that moves between views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "index", rename_all = "kebab-case")]
pub enum NavEvent {
    SelectRound(usize),
    SelectDay(usize),
    SelectParty(usize),
    SelectTransaction(usize),
    Back,
}

/// The most recent selections.
///
/// Back navigation changes only the view; these keep their last values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub round: Option<usize>,
    pub day: Option<usize>,
    pub party: Option<usize>,
    pub transaction: Option<usize>,
    pub drill_context: DrillContext,
}

/// Everything the views project from. Immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardData {
    pub rounds: Vec<Round>,
    /// Empty when the source only yields a round.
    pub days: Vec<Day>,
}

impl DashboardData {
    pub fn from_round(round: Round) -> Self {
        Self {
            rounds: vec![round],
            days: Vec::new(),
        }
    }

    pub fn round(&self, index: usize) -> Result<&Round, DashboardError> {
        self.rounds.get(index).ok_or(DashboardError::OutOfRange {
            what: "round",
            index,
        })
    }

    pub fn day(&self, index: usize) -> Result<&Day, DashboardError> {
        self.days.get(index).ok_or(DashboardError::OutOfRange {
            what: "day",
            index,
        })
    }

    /// The round or day a drill path starts from.
    pub fn source(
        &self,
        context: DrillContext,
        index: usize,
    ) -> Result<&dyn BurnAggregate, DashboardError> {
        Ok(match context {
            DrillContext::Round => self.round(index)? as &dyn BurnAggregate,
            DrillContext::Day => self.day(index)?,
        })
    }

    pub fn party(
        &self,
        context: DrillContext,
        source: usize,
        index: usize,
    ) -> Result<&Party, DashboardError> {
        self.source(context, source)?
            .parties()
            .get(index)
            .ok_or(DashboardError::OutOfRange {
                what: "party",
                index,
            })
    }

    pub fn transaction(
        &self,
        context: DrillContext,
        source: usize,
        party: usize,
        index: usize,
    ) -> Result<&Transaction, DashboardError> {
        self.party(context, source, party)?
            .transactions
            .get(index)
            .ok_or(DashboardError::OutOfRange {
                what: "transaction",
                index,
            })
    }
}

/// Progress of the single data load.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready(DashboardData),
    Failed(String),
}

/// The dashboard session: load status, current view and selections.
#[derive(Clone, Debug)]
pub struct Dashboard {
    status: LoadStatus,
    view: View,
    selection: Selection,
    origin: DataOrigin,
}

impl Dashboard {
    /// A freshly mounted dashboard, waiting for its load to complete.
    pub fn new(origin: DataOrigin) -> Self {
        Self {
            status: LoadStatus::Loading,
            view: View::Main,
            selection: Selection::default(),
            origin,
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading)
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn origin(&self) -> DataOrigin {
        self.origin
    }

    pub fn data(&self) -> Option<&DashboardData> {
        match &self.status {
            LoadStatus::Ready(data) => Some(data),
            _ => None,
        }
    }

    /// Resolve the pending load with a single round.
    pub fn finish_load(&mut self, result: Result<Round, String>) -> Result<(), DashboardError> {
        self.finish_load_data(result.map(DashboardData::from_round))
    }

    /// Resolve the pending load with a full data set, days included.
    pub fn finish_load_data(
        &mut self,
        result: Result<DashboardData, String>,
    ) -> Result<(), DashboardError> {
        if !self.is_loading() {
            return Err(DashboardError::NotLoading);
        }
        self.status = match result {
            Ok(data) => {
                info!(
                    rounds = data.rounds.len(),
                    days = data.days.len(),
                    "dashboard data loaded"
                );
                LoadStatus::Ready(data)
            }
            Err(message) => {
                warn!(%message, "dashboard load failed");
                LoadStatus::Failed(message)
            }
        };
        self.view = View::Main;
        Ok(())
    }

    /// Go back to `Loading` after a failure so the load can run again.
    pub fn retry(&mut self) -> Result<(), DashboardError> {
        match self.status {
            LoadStatus::Failed(_) => {
                info!("retrying dashboard load");
                self.status = LoadStatus::Loading;
                self.view = View::Main;
                Ok(())
            }
            _ => Err(DashboardError::RetryUnavailable),
        }
    }

    /// Apply a navigation event. On error the state is left untouched.
    pub fn navigate(&mut self, event: NavEvent) -> Result<View, DashboardError> {
        let data = self.data().ok_or(DashboardError::NotReady)?;
        let invalid = DashboardError::InvalidTransition {
            view: self.view.name(),
            event,
        };

        let mut selection = self.selection;
        let next = match (self.view, event) {
            (View::Main, NavEvent::SelectRound(round)) => {
                data.round(round)?;
                selection.round = Some(round);
                View::RoundParties { round }
            }
            (View::Main, NavEvent::SelectDay(day)) => {
                data.day(day)?;
                selection.day = Some(day);
                View::DayParties { day }
            }
            (View::RoundParties { round }, NavEvent::SelectParty(party)) => {
                data.party(DrillContext::Round, round, party)?;
                selection.party = Some(party);
                selection.drill_context = DrillContext::Round;
                View::RoundTransactions { round, party }
            }
            (View::DayParties { day }, NavEvent::SelectParty(party)) => {
                data.party(DrillContext::Day, day, party)?;
                selection.party = Some(party);
                selection.drill_context = DrillContext::Day;
                View::DayTransactions { day, party }
            }
            (View::RoundTransactions { round, party }, NavEvent::SelectTransaction(tx)) => {
                data.transaction(DrillContext::Round, round, party, tx)?;
                selection.transaction = Some(tx);
                View::RoundDetail { round, party, tx }
            }
            (View::DayTransactions { day, party }, NavEvent::SelectTransaction(tx)) => {
                data.transaction(DrillContext::Day, day, party, tx)?;
                selection.transaction = Some(tx);
                View::DayDetail { day, party, tx }
            }
            (view, NavEvent::Back) => view.parent().ok_or(invalid)?,
            _ => return Err(invalid),
        };

        debug!(from = self.view.name(), to = next.name(), ?event, "navigate");
        self.view = next;
        self.selection = selection;
        Ok(next)
    }

    /// Project the current state into a page. Has no side effects.
    pub fn render(&self) -> Page {
        page::render(self)
    }
}
