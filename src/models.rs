// src/models.rs

use chrono::NaiveDate;
use clap::ValueEnum;

/// Candle interval, in minutes (1440 = one trading day).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Interval {
    #[value(name = "1")]
    Min1,
    #[value(name = "5")]
    Min5,
    #[value(name = "15")]
    Min15,
    #[value(name = "30")]
    Min30,
    #[value(name = "60")]
    Min60,
    #[default]
    #[value(name = "1440")]
    Daily,
}

impl Interval {
    pub fn label(self) -> &'static str {
        match self {
            Self::Min1 => "1min",
            Self::Min5 => "5min",
            Self::Min15 => "15min",
            Self::Min30 => "30min",
            Self::Min60 => "60min",
            Self::Daily => "daily",
        }
    }
}

/// Column of the loaded price frame targeted by quantitative commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TargetColumn {
    Open,
    High,
    Low,
    #[default]
    Close,
    AdjClose,
    Volume,
    Returns,
    LogRet,
}

impl TargetColumn {
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::AdjClose => "adj-close",
            Self::Volume => "volume",
            Self::Returns => "returns",
            Self::LogRet => "log-ret",
        }
    }
}

/// Context of the root menu. The root holds no dataset; everything
/// ticker-related lives below `stocks`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootContext;

/// Context of the stocks menu: the loaded ticker and its price window.
#[derive(Debug, Clone, Default)]
pub struct StocksContext {
    pub ticker: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub interval: Interval,
}

impl StocksContext {
    /// The loaded ticker, if any. Data menus refuse to open without one.
    pub fn loaded_ticker(&self) -> Option<&str> {
        self.ticker.as_deref()
    }
}

/// Context of the fundamental-analysis menu, inherited from stocks.
#[derive(Debug, Clone)]
pub struct FaContext {
    pub ticker: String,
    pub start: Option<NaiveDate>,
}

/// Context of the Financial Modeling Prep sub-menu, inherited from fa.
#[derive(Debug, Clone)]
pub struct FmpContext {
    pub ticker: String,
}

/// Context of the due-diligence menu.
#[derive(Debug, Clone)]
pub struct DdContext {
    pub ticker: String,
}

/// Context of the quantitative-analysis menu.
#[derive(Debug, Clone)]
pub struct QaContext {
    pub ticker: String,
    pub target: TargetColumn,
}
