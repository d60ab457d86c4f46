//! # Host Bridge Traits
//!
//! Platform abstraction traits that the drive client depends on but does not
//! implement itself.
//!
//! ## Overview
//!
//! The client core never talks to a network stack directly. Every request goes
//! through [`HttpClient`](http::HttpClient), which a host platform implements
//! (the `bridge-desktop` crate ships a `reqwest` implementation).
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type. A
//! bridge error means the exchange did not complete; a completed exchange with
//! a non-2xx status is returned as an ordinary [`HttpResponse`](http::HttpResponse)
//! and interpreted by the caller.
//!
//! ## Thread Safety
//!
//! Bridge traits require `Send + Sync` so a single client can be shared by
//! every connection and iterator in the process.
//!
//! ## Examples
//!
//! ### Implementing HttpClient
//!
//! ```ignore
//! use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
//! use bridge_traits::error::Result;
//! use async_trait::async_trait;
//!
//! pub struct MyHttpClient {
//!     client: reqwest::Client,
//! }
//!
//! #[async_trait]
//! impl HttpClient for MyHttpClient {
//!     async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
//!         // Implementation
//!         todo!()
//!     }
//! }
//! ```

pub mod error;
pub mod http;

pub use error::BridgeError;
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
