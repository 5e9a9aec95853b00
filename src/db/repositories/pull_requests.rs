use chrono::Utc;
use diesel::prelude::*;

use crate::db::enums::PullRequestStatus;
use crate::db::models::pull_request::{NewPullRequest, NewReviewerAssignment, PullRequest};
use crate::db::models::user::User;

pub struct PullRequestRepo;

impl PullRequestRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_pr: &NewPullRequest,
    ) -> Result<PullRequest, diesel::result::Error> {
        diesel::insert_into(crate::schema::pull_requests::table)
            .values(new_pr)
            .returning(PullRequest::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(conn: &mut PgConnection, pr_id: i32) -> Result<PullRequest, diesel::result::Error> {
        use crate::schema::pull_requests::dsl::*;
        pull_requests
            .filter(id.eq(pr_id))
            .select(PullRequest::as_select())
            .first::<PullRequest>(conn)
    }

    /// Same as `find_by_id`, holding a row lock until the transaction ends.
    pub fn find_by_id_for_update(
        conn: &mut PgConnection,
        pr_id: i32,
    ) -> Result<PullRequest, diesel::result::Error> {
        use crate::schema::pull_requests::dsl::*;
        pull_requests
            .filter(id.eq(pr_id))
            .select(PullRequest::as_select())
            .for_update()
            .first::<PullRequest>(conn)
    }

    pub fn mark_merged(conn: &mut PgConnection, pr_id: i32) -> Result<PullRequest, diesel::result::Error> {
        use crate::schema::pull_requests::dsl::*;
        let now = Utc::now();
        diesel::update(pull_requests.filter(id.eq(pr_id)))
            .set((
                status.eq(PullRequestStatus::Merged),
                updated_at.eq(now),
                merged_at.eq(Some(now)),
            ))
            .returning(PullRequest::as_returning())
            .get_result(conn)
    }

    pub fn add_reviewer(
        conn: &mut PgConnection,
        pr: i32,
        reviewer: i32,
    ) -> Result<usize, diesel::result::Error> {
        let assignment = NewReviewerAssignment {
            pr_id: pr,
            reviewer_id: reviewer,
            assigned_at: Utc::now(),
        };
        diesel::insert_into(crate::schema::pr_reviewers::table)
            .values(&assignment)
            .execute(conn)
    }

    pub fn remove_reviewer(
        conn: &mut PgConnection,
        pr: i32,
        reviewer: i32,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::pr_reviewers::dsl::*;
        diesel::delete(pr_reviewers.filter(pr_id.eq(pr)).filter(reviewer_id.eq(reviewer)))
            .execute(conn)
    }

    pub fn is_assigned(
        conn: &mut PgConnection,
        pr: i32,
        reviewer: i32,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::pr_reviewers::dsl::*;
        diesel::select(diesel::dsl::exists(
            pr_reviewers.filter(pr_id.eq(pr)).filter(reviewer_id.eq(reviewer)),
        ))
        .get_result(conn)
    }

    /// Reviewers of a PR in assignment order.
    pub fn reviewers(conn: &mut PgConnection, pr: i32) -> Result<Vec<User>, diesel::result::Error> {
        use crate::schema::{pr_reviewers, users};
        users::table
            .inner_join(pr_reviewers::table)
            .filter(pr_reviewers::pr_id.eq(pr))
            .order((pr_reviewers::assigned_at.asc(), pr_reviewers::reviewer_id.asc()))
            .select(User::as_select())
            .load::<User>(conn)
    }

    pub fn list_by_reviewer(
        conn: &mut PgConnection,
        reviewer: i32,
    ) -> Result<Vec<PullRequest>, diesel::result::Error> {
        use crate::schema::{pr_reviewers, pull_requests};
        pull_requests::table
            .inner_join(pr_reviewers::table)
            .filter(pr_reviewers::reviewer_id.eq(reviewer))
            .order((pull_requests::created_at.desc(), pull_requests::id.desc()))
            .select(PullRequest::as_select())
            .load::<PullRequest>(conn)
    }
}
