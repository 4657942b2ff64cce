use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Candle intervals offered by the MEXC contract kline endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    Min1,
    Min5,
    Min15,
    Min30,
    Min60,
    Hour4,
    Hour8,
    Day1,
    Week1,
    Month1,
}

impl Timeframe {
    /// Returns the duration of this timeframe in minutes
    ///
    /// Months are counted as 30 days.
    pub fn to_minutes(&self) -> usize {
        match self {
            Timeframe::Min1 => 1,
            Timeframe::Min5 => 5,
            Timeframe::Min15 => 15,
            Timeframe::Min30 => 30,
            Timeframe::Min60 => 60,
            Timeframe::Hour4 => 240,
            Timeframe::Hour8 => 480,
            Timeframe::Day1 => 1440,
            Timeframe::Week1 => 10_080,
            Timeframe::Month1 => 43_200,
        }
    }

    /// Converts to the MEXC contract API interval string
    pub fn to_mexc_string(&self) -> &'static str {
        match self {
            Timeframe::Min1 => "Min1",
            Timeframe::Min5 => "Min5",
            Timeframe::Min15 => "Min15",
            Timeframe::Min30 => "Min30",
            Timeframe::Min60 => "Min60",
            Timeframe::Hour4 => "Hour4",
            Timeframe::Hour8 => "Hour8",
            Timeframe::Day1 => "Day1",
            Timeframe::Week1 => "Week1",
            Timeframe::Month1 => "Month1",
        }
    }
}

impl FromStr for Timeframe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "min1" | "1m" => Ok(Timeframe::Min1),
            "min5" | "5m" => Ok(Timeframe::Min5),
            "min15" | "15m" => Ok(Timeframe::Min15),
            "min30" | "30m" => Ok(Timeframe::Min30),
            "min60" | "1h" => Ok(Timeframe::Min60),
            "hour4" | "4h" => Ok(Timeframe::Hour4),
            "hour8" | "8h" => Ok(Timeframe::Hour8),
            "day1" | "1d" => Ok(Timeframe::Day1),
            "week1" | "1w" => Ok(Timeframe::Week1),
            "month1" | "1mo" => Ok(Timeframe::Month1),
            _ => Err(anyhow!(
                "Invalid timeframe: '{}'. Valid options: Min1, Min5, Min15, Min30, Min60, Hour4, Hour8, Day1, Week1, Month1",
                s
            )),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_mexc_string())
    }
}
