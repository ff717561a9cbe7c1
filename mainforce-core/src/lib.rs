//! Mainforce Core — "main force" indicator and signal engine.
//!
//! Turns a security's daily OHLCV bars plus a reference index's OHLC bars
//! (aligned to the same calendar) into a bundle of indicator series and
//! trading signals:
//! - Primitive operators (EMA, weighted SMA, HHV/LLV, REF, CROSS, FILTER, COUNT, ...)
//! - Indicator pipeline: momentum V1–VB, strength V11/V12, price flow AA–DD,
//!   A/B/C trend bands, super-buy preconditions
//! - Signals: debounced buy (BB1), sell (CC1) and super-buy
//! - Latest-bar summary, signal timeline and analysis report
//! - A caller-owned session holding the current analysis
//!
//! Everything is batch, synchronous and deterministic: the same bars always
//! produce the same bundle, and no value at bar t depends on bars after t.

pub mod bundle;
pub mod config;
pub mod domain;
pub mod pipeline;
pub mod primitives;
pub mod report;
pub mod session;
pub mod signals;
pub mod summary;

pub use bundle::{Column, IndicatorKey, ResultBundle};
pub use config::{ConfigError, EngineConfig};
pub use domain::{Bar, BarFrame, IndexBars, SecurityBars, TimeSeries, ValidationError};
pub use pipeline::{compute, compute_bars, compute_with};
pub use report::{signal_timeline, AnalysisReport, SignalEvent, SignalKind};
pub use session::{AnalysisSession, SessionError};
pub use signals::SignalSet;
pub use summary::{summarize, Summary, TrendStrength};
