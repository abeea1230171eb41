//! End-to-end planning pipeline.

use ciq_config::ClusterIqConfig;
use ciq_core::KeywordRecord;
use ciq_vectors::{VectorError, VectorSource};
use tracing::{debug, info};

use crate::error::PlanError;
use crate::grouping::{GroupingParams, group};
use crate::report::{ContentPlan, ReportOptions, assemble};
use crate::roles::assign_roles;
use crate::scoring::IntentWeights;

/// Everything the pipeline needs besides records and vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlannerOptions {
    pub grouping: GroupingParams,
    pub report: ReportOptions,
}

impl From<&ClusterIqConfig> for PlannerOptions {
    fn from(config: &ClusterIqConfig) -> Self {
        Self {
            grouping: GroupingParams::from(&config.clustering),
            report: ReportOptions {
                link_planning: config.output.link_planning,
                weights: IntentWeights::from(&config.scoring),
            },
        }
    }
}

/// Groups keywords, picks pillars, scores and links them.
///
/// The planner holds no vector state. The same records and vectors always
/// produce the same plan.
#[derive(Debug, Clone, Default)]
pub struct ContentPlanner {
    options: PlannerOptions,
}

impl ContentPlanner {
    #[must_use]
    pub const fn new(options: PlannerOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn from_config(config: &ClusterIqConfig) -> Self {
        Self::new(PlannerOptions::from(config))
    }

    #[must_use]
    pub const fn options(&self) -> &PlannerOptions {
        &self.options
    }

    /// Embed every keyword with `source`, then plan.
    ///
    /// Grouping parameters are checked before the source is touched, so a bad
    /// threshold never triggers a model download.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] for invalid parameters, vector source failures, or
    /// a source that returns the wrong number of vectors.
    pub fn plan(
        &self,
        records: &[KeywordRecord],
        source: &mut dyn VectorSource,
    ) -> Result<ContentPlan, PlanError> {
        self.options.grouping.validate()?;
        if records.is_empty() {
            info!("no keywords to plan");
            return Ok(ContentPlan::default());
        }

        let texts: Vec<String> = records.iter().map(|r| r.keyword.clone()).collect();
        debug!(source = source.name(), count = texts.len(), "embedding keywords");
        let vectors = source.embed(&texts)?;
        if vectors.len() != records.len() {
            return Err(VectorError::CountMismatch {
                expected: records.len(),
                actual: vectors.len(),
            }
            .into());
        }

        self.plan_with_vectors(records, &vectors)
    }

    /// Plan from precomputed vectors, one per record in the same order.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::LengthMismatch`] when counts differ, plus any
    /// grouping error.
    pub fn plan_with_vectors(
        &self,
        records: &[KeywordRecord],
        vectors: &[Vec<f32>],
    ) -> Result<ContentPlan, PlanError> {
        if vectors.len() != records.len() {
            return Err(PlanError::LengthMismatch {
                what: "vectors",
                expected: records.len(),
                actual: vectors.len(),
            });
        }

        let labels = group(vectors, &self.options.grouping)?;
        let assignment = assign_roles(records, &labels)?;
        let plan = assemble(records, &assignment, &self.options.report);

        info!(
            keywords = plan.summary.keywords,
            clusters = plan.summary.clusters,
            content_clusters = plan.summary.content_clusters,
            dropped_singletons = plan.summary.dropped_singletons,
            rows = plan.summary.rows,
            "content plan ready"
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ciq_core::Intent;
    use ciq_vectors::StaticSource;

    fn record(keyword: &str) -> KeywordRecord {
        KeywordRecord::new(keyword, 100.0, 1.0, Intent::Informational)
    }

    /// Returns fewer vectors than requested.
    struct ShortSource;

    impl VectorSource for ShortSource {
        fn name(&self) -> &str {
            "short"
        }

        fn embed(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>, VectorError> {
            Ok(texts.iter().skip(1).map(|_| vec![0.0, 0.0]).collect())
        }
    }

    /// Fails the test if it is ever called.
    struct UntouchedSource;

    impl VectorSource for UntouchedSource {
        fn name(&self) -> &str {
            "untouched"
        }

        fn embed(&mut self, _texts: &[String]) -> Result<Vec<Vec<f32>>, VectorError> {
            panic!("source must not be called");
        }
    }

    #[test]
    fn empty_input_skips_embedding() {
        let plan = ContentPlanner::default()
            .plan(&[], &mut UntouchedSource)
            .unwrap();
        assert_eq!(plan, ContentPlan::default());
    }

    #[test]
    fn invalid_threshold_fails_before_embedding() {
        let mut options = PlannerOptions::default();
        options.grouping.threshold = 0.0;
        let err = ContentPlanner::new(options)
            .plan(&[record("a")], &mut UntouchedSource)
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidThreshold(_)));
    }

    #[test]
    fn short_vector_batch_is_rejected() {
        let err = ContentPlanner::default()
            .plan(&[record("a"), record("b")], &mut ShortSource)
            .unwrap_err();
        assert!(matches!(
            err,
            PlanError::Vector(VectorError::CountMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn vector_count_must_match_records() {
        let err = ContentPlanner::default()
            .plan_with_vectors(&[record("a")], &[])
            .unwrap_err();
        assert!(matches!(err, PlanError::LengthMismatch { .. }));
    }

    #[test]
    fn source_vectors_drive_grouping() {
        let mut source: StaticSource = [
            ("shoes", vec![0.0, 0.0]),
            ("running shoes", vec![0.1, 0.0]),
            ("cake", vec![9.0, 9.0]),
        ]
        .into_iter()
        .collect();
        let records = [record("running shoes"), record("cake"), record("shoes")];

        let plan = ContentPlanner::default().plan(&records, &mut source).unwrap();

        assert_eq!(plan.summary.clusters, 2);
        assert_eq!(plan.summary.dropped_singletons, 1);
        assert_eq!(plan.rows.len(), 2);
        assert_eq!(plan.rows[0].keyword, "running shoes");
        assert_eq!(plan.rows[0].link_target_url, "/shoes");
        assert_eq!(plan.rows[1].keyword, "shoes");
    }

    #[test]
    fn options_follow_config() {
        let mut config = ClusterIqConfig::default();
        config.clustering.threshold = 0.4;
        config.output.link_planning = false;
        config.scoring.commercial = 2.0;

        let planner = ContentPlanner::from_config(&config);
        let options = planner.options();
        assert!((options.grouping.threshold - 0.4).abs() < f64::EPSILON);
        assert!(!options.report.link_planning);
        assert!((options.report.weights.commercial - 2.0).abs() < f64::EPSILON);
    }
}
