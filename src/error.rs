use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Transport-level failure while reaching the market-data provider.
    #[error("market data request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("market data provider returned status {status}: {body}")]
    FetchStatus { status: u16, body: String },

    /// Provider payload matched neither the `ok` nor the `no_data` shape.
    #[error("malformed candle payload:\n{0}")]
    Decode(String),

    /// Provider explicitly reported that the requested range has no candles.
    #[error("no candle data for `{symbol}`")]
    NoData { symbol: String },

    #[error("data range unavailable: {0}")]
    DataRange(String),

    #[error("chart precondition failed: {0}")]
    Precondition(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ChartError {
    /// Returns `true` for the "nothing to show" outcome, as opposed to a failure.
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }
}
