pub mod aggregated;
pub mod anomalies;
pub mod ingest;
pub mod processed;
