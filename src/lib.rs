//! Minimal client for the Cloudflare v4 DNS API.
//!
//! ```no_run
//! use cfdns::{CloudflareClient, DnsApiClient};
//!
//! # async fn run() -> cfdns::Result<()> {
//! let client = CloudflareClient::new("test@example.com", "dc771129ae047c934adba2d1dc4fe184");
//!
//! let zones = client.list_zones().await?;
//! if let Some(zone) = zones.iter().find(|zone| zone.name == "example.com") {
//!     client
//!         .create_dns_record(&zone.id, "test.example.com", "A", "192.168.0.2")
//!         .await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod reconcile;


pub use api::{CloudflareClient, DnsApiClient, DnsRecord, Zone};
pub use error::{Error, Result};
