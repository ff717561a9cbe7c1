//! Analysis session — one "current analysis" slot owned by the caller.
//!
//! Loading recomputes the whole bundle and replaces whatever was there. The
//! core keeps no global state; an application that serves several clients
//! owns one session per client (or guards a shared one itself).

use crate::bundle::ResultBundle;
use crate::config::EngineConfig;
use crate::domain::{BarFrame, IndexBars, SecurityBars, ValidationError};
use crate::pipeline;
use crate::report::{signal_timeline, AnalysisReport, SignalEvent, SignalTotals};
use crate::summary::{summarize_with, Summary};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no analysis loaded")]
    NotLoaded,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
pub struct LoadedAnalysis {
    pub symbol: String,
    pub index_symbol: String,
    pub bundle: ResultBundle,
}

/// Recent signal events plus overall counts.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalOverview {
    pub recent: Vec<SignalEvent>,
    pub totals: SignalTotals,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    config: EngineConfig,
    current: Option<LoadedAnalysis>,
}

impl AnalysisSession {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute a fresh bundle and make it the current analysis.
    ///
    /// On a validation error the previous analysis is left in place.
    pub fn load(
        &mut self,
        symbol: impl Into<String>,
        index_symbol: impl Into<String>,
        security: &BarFrame,
        index: &BarFrame,
    ) -> Result<&LoadedAnalysis, SessionError> {
        let security = SecurityBars::from_frame(security)?;
        let index = IndexBars::from_frame(index)?;
        let bundle = pipeline::compute_with(&security, &index, &self.config)?;

        let loaded = LoadedAnalysis {
            symbol: symbol.into(),
            index_symbol: index_symbol.into(),
            bundle,
        };
        tracing::info!(
            symbol = %loaded.symbol,
            index = %loaded.index_symbol,
            bars = loaded.bundle.len(),
            "analysis loaded"
        );
        Ok(&*self.current.insert(loaded))
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Result<&LoadedAnalysis, SessionError> {
        self.current.as_ref().ok_or(SessionError::NotLoaded)
    }

    pub fn summary(&self) -> Result<Summary, SessionError> {
        Ok(summarize_with(&self.current()?.bundle, &self.config.trend))
    }

    pub fn signals(&self) -> Result<SignalOverview, SessionError> {
        let bundle = &self.current()?.bundle;
        Ok(SignalOverview {
            recent: signal_timeline(bundle, self.config.report.recent_signal_limit),
            totals: SignalTotals::from_bundle(bundle),
        })
    }

    pub fn report(&self) -> Result<AnalysisReport, SessionError> {
        Ok(AnalysisReport::build(&self.current()?.bundle, &self.config))
    }
}
