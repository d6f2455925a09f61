//! NotPixel game API binding.
//!
//! DESIGN
//! ======
//! One adapter ([`api::ApiRequest`]) maps each game operation to a single
//! network exchange. HTTP operations run through a caller-supplied
//! [`http::HttpClient`] and return a classified [`outcome::Outcome`]; the
//! pixel snapshot opens its own WebSocket per call.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod outcome;
pub mod pixels;

pub use api::{ApiRequest, PageviewEvent, PaintCommand};
pub use config::{ApiConfig, SnapshotDecode};
pub use error::ApiError;
pub use http::{HttpClient, HttpError, HttpResponse, ReqwestHttp};
pub use outcome::Outcome;
pub use pixels::PixelSnapshot;
