//! Eligible-reviewer lookup with project-scoped workload.

use labelflow_core::reviewer_allocation::ReviewerCandidate;
use labelflow_core::types::DbId;
use sqlx::PgExecutor;

pub struct ReviewerRepo;

impl ReviewerRepo {
    /// Project members whose role grants `review_annotations`, each with the
    /// number of pending reviews they hold *in this project*.
    ///
    /// One aggregated query; members with no pending reviews report zero.
    /// Ordered by workload then user id.
    pub async fn eligible_reviewers<'e, E>(
        executor: E,
        project_id: DbId,
        exclude_user_id: Option<DbId>,
    ) -> Result<Vec<ReviewerCandidate>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let rows: Vec<(DbId, i64)> = sqlx::query_as(
            "SELECT m.user_id, COALESCE(w.pending_count, 0) AS pending_review_count
             FROM project_members m
             JOIN project_roles r ON r.id = m.role_id
             LEFT JOIN (
                 SELECT reviewer_id, COUNT(*) AS pending_count
                 FROM reviews
                 WHERE project_id = $1 AND status = 'pending'
                 GROUP BY reviewer_id
             ) w ON w.reviewer_id = m.user_id
             WHERE m.project_id = $1
               AND r.review_annotations
               AND ($2::BIGINT IS NULL OR m.user_id <> $2)
             ORDER BY pending_review_count ASC, m.user_id ASC",
        )
        .bind(project_id)
        .bind(exclude_user_id)
        .fetch_all(executor)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(user_id, pending_review_count)| ReviewerCandidate {
                user_id,
                pending_review_count,
            })
            .collect())
    }
}
