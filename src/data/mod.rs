//! Market data acquisition: request types, payload validation and the
//! Finnhub client.

mod decode;
mod finnhub;
mod request;

pub use decode::{CandlePayload, FieldIssue, decode_candle_payload, decode_candle_payload_str};
pub use finnhub::{
    API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, FinnhubClient, FinnhubConfig,
};
pub use request::{CandleRequest, Resolution};
