use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::db::models::user::{NewUser, User};

pub struct UserRepo;

impl UserRepo {
    pub fn find_by_id(conn: &mut PgConnection, user_id: i32) -> Result<User, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(id.eq(user_id))
            .select(User::as_select())
            .first::<User>(conn)
    }

    /// Insert the user, or refresh `is_active` when the username is taken.
    pub fn upsert(
        conn: &mut PgConnection,
        user_name: &str,
        active: bool,
    ) -> Result<User, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        let now = Utc::now();
        let new_user = NewUser {
            username: user_name,
            is_active: active,
            created_at: now,
            updated_at: now,
        };
        diesel::insert_into(users)
            .values(&new_user)
            .on_conflict(username)
            .do_update()
            .set((is_active.eq(excluded(is_active)), updated_at.eq(now)))
            .returning(User::as_returning())
            .get_result(conn)
    }

    pub fn update_active(
        conn: &mut PgConnection,
        user_id: i32,
        active: bool,
    ) -> Result<User, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::update(users.filter(id.eq(user_id)))
            .set((is_active.eq(active), updated_at.eq(Utc::now())))
            .returning(User::as_returning())
            .get_result(conn)
    }

    /// Team ids of a user, earliest membership first.
    pub fn team_ids(conn: &mut PgConnection, member_id: i32) -> Result<Vec<i32>, diesel::result::Error> {
        use crate::schema::team_members::dsl::*;
        team_members
            .filter(user_id.eq(member_id))
            .order((created_at.asc(), team_id.asc()))
            .select(team_id)
            .load::<i32>(conn)
    }

    /// `(user_id, team_name)` rows for the given users, each user's earliest
    /// membership first.
    pub fn team_names(
        conn: &mut PgConnection,
        member_ids: &[i32],
    ) -> Result<Vec<(i32, String)>, diesel::result::Error> {
        use crate::schema::{team_members, teams};
        team_members::table
            .inner_join(teams::table)
            .filter(team_members::user_id.eq_any(member_ids))
            .order((
                team_members::user_id.asc(),
                team_members::created_at.asc(),
                team_members::team_id.asc(),
            ))
            .select((team_members::user_id, teams::name))
            .load::<(i32, String)>(conn)
    }
}
