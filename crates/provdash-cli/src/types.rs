use clap::ValueEnum;
use provdash_runtime::ChartStyle;
use provdash_types::BatchKind;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ChartStyleArg {
    Bars,
    Chart,
}

impl fmt::Display for ChartStyleArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartStyleArg::Bars => write!(f, "bars"),
            ChartStyleArg::Chart => write!(f, "chart"),
        }
    }
}

impl From<ChartStyleArg> for ChartStyle {
    fn from(style: ChartStyleArg) -> Self {
        match style {
            ChartStyleArg::Bars => ChartStyle::Bars,
            ChartStyleArg::Chart => ChartStyle::Chart,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ReviewVerb {
    Approve,
    Reject,
    Override,
}

impl fmt::Display for ReviewVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewVerb::Approve => write!(f, "approve"),
            ReviewVerb::Reject => write!(f, "reject"),
            ReviewVerb::Override => write!(f, "override"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum BatchKindArg {
    Daily,
    Weekly,
    Full,
}

impl fmt::Display for BatchKindArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchKindArg::Daily => write!(f, "daily"),
            BatchKindArg::Weekly => write!(f, "weekly"),
            BatchKindArg::Full => write!(f, "full"),
        }
    }
}

impl From<BatchKindArg> for BatchKind {
    fn from(kind: BatchKindArg) -> Self {
        match kind {
            BatchKindArg::Daily => BatchKind::Daily,
            BatchKindArg::Weekly => BatchKind::Weekly,
            BatchKindArg::Full => BatchKind::Full,
        }
    }
}
