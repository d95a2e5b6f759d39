//! Crawler module for page fetching and per-call crawl state
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with cancellation and status classification
//! - Per-site request pacing
//! - Per-call record/error accumulation
//! - Coordination of a single fetch/extract sequence

mod coordinator;
mod fetcher;
mod scheduler;
mod session;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use scheduler::{DomainState, Scheduler, SchedulerPermit};
pub use session::{CrawlOutcome, CrawlSession};
