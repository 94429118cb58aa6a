//! Round sources backed by this server's own aggregator.

use std::sync::Arc;

use feeburn_aggregator::{Aggregator, Clock, ScanApi, ScanClient, SystemClock};
use feeburn_dashboard::{DataOrigin, DemoRoundSource, RemoteRoundSource, RoundSource};
use feeburn_types::Round;

/// Feeds the dashboard from an in-process aggregation pass.
///
/// Scan errors are flattened into their display message.
pub struct AggregatorSource<S, C = SystemClock> {
    aggregator: Arc<Aggregator<S, C>>,
}

impl<S, C> AggregatorSource<S, C> {
    pub fn new(aggregator: Arc<Aggregator<S, C>>) -> Self {
        Self { aggregator }
    }
}

impl<S: ScanApi, C: Clock> RoundSource for AggregatorSource<S, C> {
    fn origin(&self) -> DataOrigin {
        DataOrigin::Live
    }

    async fn load(&self) -> Result<Round, String> {
        self.aggregator
            .current_round()
            .await
            .map_err(|e| e.to_string())
    }
}

/// The source selected by the configured [`ServeMode`](crate::ServeMode).
pub enum ModeSource {
    Demo(DemoRoundSource),
    Live(AggregatorSource<ScanClient>),
    Remote(RemoteRoundSource),
}

impl RoundSource for ModeSource {
    fn origin(&self) -> DataOrigin {
        match self {
            Self::Demo(s) => s.origin(),
            Self::Live(s) => s.origin(),
            Self::Remote(s) => s.origin(),
        }
    }

    async fn load(&self) -> Result<Round, String> {
        match self {
            Self::Demo(s) => s.load().await,
            Self::Live(s) => s.load().await,
            Self::Remote(s) => s.load().await,
        }
    }
}
