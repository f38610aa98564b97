//! ohlc-chart: interactive OHLC price chart with a moving-average overlay,
//! volume bars and a crosshair legend, fed by Finnhub candle data.
//!
//! The crate keeps a strict split: `core` holds pure scale and series math,
//! `interaction` turns pointer positions into crosshair state, `render`
//! defines backend-agnostic primitives, `data` fetches and validates candles
//! and `api` ties them together behind `Chart`.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{Chart, ChartConfig};
pub use error::{ChartError, ChartResult};
