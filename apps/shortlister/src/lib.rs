//! Resume shortlisting client: ingests a batch of uploaded resumes, asks the
//! verdict service about each one in upload order, and exports the results.

pub mod config;
pub mod errors;
pub mod ingestion;
pub mod report;
pub mod shortlist;
pub mod verdict_client;
