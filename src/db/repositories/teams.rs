use chrono::Utc;
use diesel::prelude::*;

use crate::db::models::team::{NewTeam, NewTeamMember, Team};
use crate::db::models::user::User;

pub struct TeamRepo;

impl TeamRepo {
    pub fn find_by_name(conn: &mut PgConnection, team_name: &str) -> Result<Team, diesel::result::Error> {
        use crate::schema::teams::dsl::*;
        teams
            .filter(name.eq(team_name))
            .select(Team::as_select())
            .first::<Team>(conn)
    }

    pub fn insert(conn: &mut PgConnection, team_name: &str) -> Result<Team, diesel::result::Error> {
        let now = Utc::now();
        let new_team = NewTeam {
            name: team_name,
            created_at: now,
            updated_at: now,
        };
        diesel::insert_into(crate::schema::teams::table)
            .values(&new_team)
            .returning(Team::as_returning())
            .get_result(conn)
    }

    /// Existing memberships are left untouched.
    pub fn add_member(
        conn: &mut PgConnection,
        team: i32,
        user: i32,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::team_members::dsl::*;
        let new_member = NewTeamMember {
            team_id: team,
            user_id: user,
            created_at: Utc::now(),
        };
        diesel::insert_into(team_members)
            .values(&new_member)
            .on_conflict((team_id, user_id))
            .do_nothing()
            .execute(conn)
    }

    pub fn members(conn: &mut PgConnection, team: i32) -> Result<Vec<User>, diesel::result::Error> {
        use crate::schema::{team_members, users};
        users::table
            .inner_join(team_members::table)
            .filter(team_members::team_id.eq(team))
            .order(users::id.asc())
            .select(User::as_select())
            .load::<User>(conn)
    }

    pub fn active_members(conn: &mut PgConnection, team: i32) -> Result<Vec<User>, diesel::result::Error> {
        use crate::schema::{team_members, users};
        users::table
            .inner_join(team_members::table)
            .filter(team_members::team_id.eq(team))
            .filter(users::is_active.eq(true))
            .order(users::id.asc())
            .select(User::as_select())
            .load::<User>(conn)
    }
}
