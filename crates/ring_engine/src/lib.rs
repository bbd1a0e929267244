//! Swagger ring engine: source retrieval and the aggregation pipeline.
mod aggregate;
mod fetch;
mod types;

pub use aggregate::{
    AggregateError, Aggregation, AggregationPolicy, Aggregator, EmptyResultPolicy,
    RenderedDocument, SourceErrorPolicy,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use types::{
    AggregationReport, FailureKind, FetchError, FetchMetadata, FetchOutput, SourceError,
    SourceOutcome, SourceStatus,
};
