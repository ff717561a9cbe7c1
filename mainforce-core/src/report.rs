//! Signal timeline and analysis report.
//!
//! Both are read-only views over a computed [`ResultBundle`]; nothing here
//! recomputes indicators. Rule thresholds for trend direction and strength come
//! from [`TrendConfig`]; the remaining cut points (capital flow 30/50, price
//! position 20/80, the 2:1 signal imbalance) are fixed.
//!
//! NaN inputs are not sanitized. Every comparison against NaN is false, so a
//! NaN value falls through to the default branch of each rule.

use crate::bundle::{IndicatorKey, ResultBundle};
use crate::config::{EngineConfig, TrendConfig};
use crate::summary::{summarize_with, Summary, TrendStrength};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ─── Timeline ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Buy,
    Sell,
    SuperBuy,
}

impl SignalKind {
    pub fn description(self) -> &'static str {
        match self {
            SignalKind::Buy => "main force entering, buy",
            SignalKind::Sell => "main force reducing, sell",
            SignalKind::SuperBuy => "main force building a position, strong buy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub date: NaiveDate,
    pub kind: SignalKind,
}

/// Most recent `limit` signal events, oldest first.
///
/// A bar emits at most one event: buy wins over sell, sell over super-buy.
pub fn signal_timeline(bundle: &ResultBundle, limit: usize) -> Vec<SignalEvent> {
    let flags = |key| bundle.flags(key).unwrap_or(&[]);
    let (buy, sell, super_buy) = (
        flags(IndicatorKey::Bb1),
        flags(IndicatorKey::Cc1),
        flags(IndicatorKey::SuperBuySignal),
    );
    let at = |v: &[bool], i: usize| v.get(i).copied().unwrap_or(false);

    let events: Vec<SignalEvent> = bundle
        .dates()
        .iter()
        .enumerate()
        .filter_map(|(i, &date)| {
            let kind = if at(buy, i) {
                SignalKind::Buy
            } else if at(sell, i) {
                SignalKind::Sell
            } else if at(super_buy, i) {
                SignalKind::SuperBuy
            } else {
                return None;
            };
            Some(SignalEvent { date, kind })
        })
        .collect();

    let skip = events.len().saturating_sub(limit);
    events.into_iter().skip(skip).collect()
}

/// Number of bars on which each emitted signal fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalTotals {
    pub buy: usize,
    pub sell: usize,
    pub super_buy: usize,
}

impl SignalTotals {
    pub fn from_bundle(bundle: &ResultBundle) -> Self {
        Self {
            buy: bundle.count_true(IndicatorKey::Bb1),
            sell: bundle.count_true(IndicatorKey::Cc1),
            super_buy: bundle.count_true(IndicatorKey::SuperBuySignal),
        }
    }

    /// Buy count over sell count, with the denominator floored at one.
    pub fn ratio(&self) -> f64 {
        self.buy as f64 / self.sell.max(1) as f64
    }
}

// ─── Recommendations ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Rising,
    Falling,
    Sideways,
}

impl TrendDirection {
    pub fn classify(b4: f64, config: &TrendConfig) -> Self {
        if b4 > config.rising_above {
            TrendDirection::Rising
        } else if b4 < config.falling_below {
            TrendDirection::Falling
        } else {
            TrendDirection::Sideways
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// What a recommendation is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    SuperBuySignal,
    BuySignal,
    SellSignal,
    NoSignal,
    Trend,
    CapitalFlow,
    SignalBalance,
    PricePosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    StrongBuy,
    Buy,
    Sell,
    Hold,
    Watch,
    HoldOrAdd,
    Reduce,
    WaitForSignal,
    FollowMainForce,
    MainForceBearish,
    WaitForMainForce,
    LeanBuy,
    LeanCautious,
    AvoidChasing,
    BuyOnDips,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub action: Action,
    pub risk: RiskLevel,
    /// 1 is most urgent.
    pub priority: u8,
    pub message: String,
}

impl Recommendation {
    fn new(kind: RecommendationKind, action: Action, risk: RiskLevel, priority: u8, message: String) -> Self {
        Self {
            kind,
            action,
            risk,
            priority,
            message,
        }
    }
}

/// Headline verdict combining the active signal with the mid-term trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overall {
    pub action: Action,
    pub risk: RiskLevel,
}

// ─── Report ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub total_bars: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub current_price: f64,
    /// Percentage change from the first close to the last.
    pub price_change_percent: f64,
    pub max_price: f64,
    pub min_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub current_trend_value: f64,
    pub direction: TrendDirection,
    pub strength: TrendStrength,
    pub v11_value: f64,
    pub v12_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub price: PriceStats,
    pub totals: SignalTotals,
    pub signal_ratio: f64,
    pub trend: TrendAnalysis,
    pub recent_signals: Vec<SignalEvent>,
    /// Sorted by ascending priority; ties keep rule order.
    pub recommendations: Vec<Recommendation>,
    pub overall: Overall,
}

impl AnalysisReport {
    pub fn build(bundle: &ResultBundle, config: &EngineConfig) -> Self {
        let summary = summarize_with(bundle, &config.trend);
        let totals = SignalTotals::from_bundle(bundle);
        let price = price_stats(bundle, summary.current_price);

        let trend = TrendAnalysis {
            current_trend_value: summary.mid_trend_value,
            direction: TrendDirection::classify(summary.mid_trend_value, &config.trend),
            strength: summary.trend_strength,
            v11_value: summary.v11_value,
            v12_value: summary.v12_value,
        };

        let mut recommendations = recommend(&summary, &totals, &price, &config.trend);
        recommendations.sort_by_key(|r| r.priority);

        Self {
            signal_ratio: totals.ratio(),
            overall: overall(&summary, &config.trend),
            recent_signals: signal_timeline(bundle, config.report.recent_signal_limit),
            price,
            totals,
            trend,
            recommendations,
        }
    }
}

fn price_stats(bundle: &ResultBundle, current_price: f64) -> PriceStats {
    let closes = bundle.numeric(IndicatorKey::Price).unwrap_or(&[]);
    let (first, last) = match (closes.first(), closes.last()) {
        (Some(&f), Some(&l)) => (f, l),
        _ => (f64::NAN, f64::NAN),
    };
    // f64::max/min skip a NaN operand, so NaN closes are ignored and an
    // all-NaN or empty series stays NaN.
    let max_price = closes.iter().copied().fold(f64::NAN, f64::max);
    let min_price = closes.iter().copied().fold(f64::NAN, f64::min);

    PriceStats {
        total_bars: bundle.len(),
        first_date: bundle.dates().first().copied(),
        last_date: bundle.dates().last().copied(),
        current_price,
        price_change_percent: (last - first) / first * 100.0,
        max_price,
        min_price,
    }
}

fn recommend(summary: &Summary, totals: &SignalTotals, price: &PriceStats, trend: &TrendConfig) -> Vec<Recommendation> {
    use Action as A;
    use RecommendationKind as K;
    use RiskLevel as R;

    let mut out = Vec::with_capacity(5);

    out.push(if summary.super_buy_signal_active {
        Recommendation::new(
            K::SuperBuySignal,
            A::StrongBuy,
            R::Medium,
            1,
            "super-buy signal: main force is building a position".into(),
        )
    } else if summary.buy_signal_active {
        Recommendation::new(K::BuySignal, A::Buy, R::Medium, 2, "buy signal: consider buying in tranches".into())
    } else if summary.sell_signal_active {
        Recommendation::new(K::SellSignal, A::Sell, R::High, 2, "sell signal: consider cutting the position".into())
    } else {
        Recommendation::new(K::NoSignal, A::Watch, R::Low, 7, "no active buy or sell signal".into())
    });

    let b4 = summary.mid_trend_value;
    out.push(if b4 > trend.strong_above {
        Recommendation::new(K::Trend, A::HoldOrAdd, R::Low, 3, format!("mid-term trend is strong ({b4:.1})"))
    } else if b4 < trend.medium_above {
        Recommendation::new(K::Trend, A::Reduce, R::High, 3, format!("mid-term trend is weak ({b4:.1})"))
    } else {
        Recommendation::new(K::Trend, A::WaitForSignal, R::Medium, 3, format!("mid-term trend is range-bound ({b4:.1})"))
    });

    let (v11, v12) = (summary.v11_value, summary.v12_value);
    out.push(if v11 > 50.0 && v12 < 30.0 {
        Recommendation::new(
            K::CapitalFlow,
            A::FollowMainForce,
            R::Low,
            4,
            format!("main force accumulating (V11 {v11:.1}), little selling pressure (V12 {v12:.1})"),
        )
    } else if v11 < 30.0 && v12 > 50.0 {
        Recommendation::new(
            K::CapitalFlow,
            A::MainForceBearish,
            R::High,
            4,
            format!("main force reducing (V11 {v11:.1}), heavy selling pressure (V12 {v12:.1})"),
        )
    } else {
        Recommendation::new(
            K::CapitalFlow,
            A::WaitForMainForce,
            R::Medium,
            4,
            format!("main force undecided (V11 {v11:.1}, V12 {v12:.1})"),
        )
    });

    if totals.buy > totals.sell * 2 {
        out.push(Recommendation::new(
            K::SignalBalance,
            A::LeanBuy,
            R::Medium,
            5,
            format!("{} buy signals against {} sell signals", totals.buy, totals.sell),
        ));
    } else if totals.sell > totals.buy * 2 {
        out.push(Recommendation::new(
            K::SignalBalance,
            A::LeanCautious,
            R::High,
            5,
            format!("{} sell signals against {} buy signals", totals.sell, totals.buy),
        ));
    }

    let current = summary.current_price;
    if current > 0.0 && price.max_price > price.min_price {
        let position = (current - price.min_price) / (price.max_price - price.min_price) * 100.0;
        if position > 80.0 {
            out.push(Recommendation::new(
                K::PricePosition,
                A::AvoidChasing,
                R::High,
                6,
                format!("price near the top of its range ({position:.1}%)"),
            ));
        } else if position < 20.0 {
            out.push(Recommendation::new(
                K::PricePosition,
                A::BuyOnDips,
                R::Medium,
                6,
                format!("price near the bottom of its range ({position:.1}%)"),
            ));
        }
    }

    out
}

fn overall(summary: &Summary, trend: &TrendConfig) -> Overall {
    let b4 = summary.mid_trend_value;
    let (action, risk) = if summary.super_buy_signal_active && b4 > 60.0 {
        (Action::StrongBuy, RiskLevel::Medium)
    } else if summary.buy_signal_active && b4 > trend.rising_above {
        (Action::Buy, RiskLevel::Medium)
    } else if summary.sell_signal_active || b4 < trend.medium_above {
        (Action::Sell, RiskLevel::High)
    } else if b4 > trend.strong_above {
        (Action::Hold, RiskLevel::Low)
    } else {
        (Action::Watch, RiskLevel::Medium)
    };
    Overall { action, risk }
}
