//! Client for LeetCode's public profile GraphQL API.
//!
//! ```no_run
//! # async fn run() -> Result<(), peekaleet::FetchError> {
//! use peekaleet::{LoadOptions, ProfileClient};
//!
//! let mut client = ProfileClient::new("alice")?;
//! client.load(LoadOptions::default().total_count(true).streak(true)).await?;
//! println!("{:?} solved, streak {:?}", client.total_count(), client.streak());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod options;
pub mod profile;

pub use api::client::{ClientSettings, LeetCodeClient};
pub use api::transport::{GraphQLRequest, HttpTransport, Transport};
pub use api::types::{ContestEntry, Profile, ProfileDetails, RecentSubmission, TagCount, TopicWise};
pub use error::{FetchError, FetchResult, TransportError};
pub use options::LoadOptions;
pub use profile::{ProfileClient, ProfileSnapshot};
