use std::sync::Arc;

use ring_core::{
    annotate, merge, parse, serialize, DocFormat, Mapping, OutputFormat, RenderOptions,
    SerializeError, SourceDescriptor,
};
use ring_logging::{ring_debug, ring_info, ring_warn};
use thiserror::Error;

use crate::{AggregationReport, Fetcher, SourceError, SourceStatus};

/// What to do when a source cannot be fetched or parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceErrorPolicy {
    /// Log the failure and keep merging the remaining sources.
    #[default]
    Skip,
    /// Fail the whole aggregation on the first failing source.
    Abort,
}

/// What to serve when no source could be merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyResultPolicy {
    #[default]
    EmptyDocument,
    Error,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationPolicy {
    pub on_source_error: SourceErrorPolicy,
    pub on_empty: EmptyResultPolicy,
}

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("source {location} failed: {source}")]
    Source {
        location: String,
        #[source]
        source: SourceError,
    },
    #[error("none of the {configured} configured sources could be merged")]
    NoUsableSources { configured: usize },
    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

/// Annotated merge result of one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub document: Mapping,
    pub report: AggregationReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub body: String,
    pub content_type: &'static str,
    pub report: AggregationReport,
}

/// Runs the fetch, parse, merge, annotate and serialize pipeline over an
/// ordered source list.
///
/// Holds no per-request state: every call builds its own accumulator, so one
/// aggregator can serve concurrent requests.
pub struct Aggregator {
    fetcher: Arc<dyn Fetcher>,
    sources: Vec<SourceDescriptor>,
    policy: AggregationPolicy,
    render_options: RenderOptions,
}

impl Aggregator {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        sources: Vec<SourceDescriptor>,
        policy: AggregationPolicy,
        render_options: RenderOptions,
    ) -> Self {
        Self {
            fetcher,
            sources,
            policy,
            render_options,
        }
    }

    pub fn sources(&self) -> &[SourceDescriptor] {
        &self.sources
    }

    /// Merges every source in list order. Source `i + 1` is fetched only
    /// after source `i` has been merged or skipped.
    pub async fn aggregate(&self) -> Result<Aggregation, AggregateError> {
        let mut accumulator = Mapping::new();
        let mut report = AggregationReport::default();

        for source in &self.sources {
            if source.format == DocFormat::Unknown {
                ring_debug!("excluding {}: unknown document format", source.location);
                report.record(&source.location, SourceStatus::Excluded);
                continue;
            }

            match self.load(source).await {
                Ok(tree) => {
                    ring_debug!("merging {} ({} top-level keys)", source.location, tree.len());
                    accumulator = merge(accumulator, tree);
                    report.record(&source.location, SourceStatus::Merged);
                }
                Err(err) => match self.policy.on_source_error {
                    SourceErrorPolicy::Skip => {
                        ring_warn!("skipping source {}: {}", source.location, err);
                        report.record(
                            &source.location,
                            SourceStatus::Skipped {
                                reason: err.to_string(),
                            },
                        );
                    }
                    SourceErrorPolicy::Abort => {
                        return Err(AggregateError::Source {
                            location: source.location.clone(),
                            source: err,
                        });
                    }
                },
            }
        }

        if report.merged_count() == 0 && self.policy.on_empty == EmptyResultPolicy::Error {
            return Err(AggregateError::NoUsableSources {
                configured: self.sources.len(),
            });
        }

        Ok(Aggregation {
            document: annotate(accumulator),
            report,
        })
    }

    pub async fn render(&self, format: OutputFormat) -> Result<RenderedDocument, AggregateError> {
        let Aggregation { document, report } = self.aggregate().await?;
        let body = serialize(&document, format, &self.render_options)?;
        ring_info!(
            "rendered {} document: {} merged, {} skipped, {} excluded, {} bytes",
            format,
            report.merged_count(),
            report.skipped_count(),
            report.excluded_count(),
            body.len()
        );
        Ok(RenderedDocument {
            body,
            content_type: format.content_type(),
            report,
        })
    }

    async fn load(&self, source: &SourceDescriptor) -> Result<Mapping, SourceError> {
        let output = self.fetcher.fetch(&source.location).await?;
        let parsed = parse(&output.bytes, source.format)?;
        // Unknown formats never reach this point.
        Ok(parsed.unwrap_or_default())
    }
}
