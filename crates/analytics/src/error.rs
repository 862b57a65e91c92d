use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Invalid calendar period: year {year}, month {month}")]
    InvalidPeriod { year: i32, month: u32 },

    #[error("A histogram needs at least one bucket, got {0}")]
    InvalidBinCount(usize),
}
