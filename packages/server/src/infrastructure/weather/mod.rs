//! Weather provider implementations.

pub mod amap;

pub use amap::AmapWeatherClient;
