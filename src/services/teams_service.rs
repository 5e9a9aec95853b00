use crate::{
    db::{models::TeamResponse, store::ReviewStore},
    error::{AppError, AppResult, Resource, StoreError},
    validation::CreateTeamRequest,
};

pub struct TeamsService;

impl TeamsService {
    pub fn validate_name(name: &str) -> Result<(), AppError> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Team name is required"));
        }
        Ok(())
    }

    /// Create a team and upsert its members. Existing users keep their id and
    /// take the supplied active flag.
    pub fn create<S: ReviewStore>(store: &mut S, req: &CreateTeamRequest) -> AppResult<TeamResponse> {
        Self::validate_name(&req.team_name)?;
        for member in &req.members {
            if member.username.trim().is_empty() {
                return Err(AppError::validation("Member username is required"));
            }
        }

        store.in_transaction(|store| {
            match store.team_by_name(&req.team_name) {
                Ok(_) => return Err(StoreError::AlreadyExists.on(Resource::Team)),
                Err(StoreError::NotFound) => {}
                Err(e) => return Err(e.into()),
            }

            let team = store
                .create_team(&req.team_name)
                .map_err(|e| e.on(Resource::Team))?;

            for member in &req.members {
                let user = store
                    .upsert_user(&member.username, member.is_active)
                    .map_err(|e| e.on(Resource::User))?;
                store.add_team_member(team.id, user.id)?;
            }

            let members = store.team_members(team.id)?;
            tracing::info!(
                team_id = team.id,
                team_name = %team.name,
                members = members.len(),
                "Team created"
            );
            Ok(TeamResponse::new(&team, &members))
        })
    }

    /// Team with every member, inactive ones included.
    pub fn get_by_name<S: ReviewStore>(store: &mut S, name: &str) -> AppResult<TeamResponse> {
        Self::validate_name(name)?;
        store.in_transaction(|store| {
            let team = store.team_by_name(name).map_err(|e| e.on(Resource::Team))?;
            let members = store.team_members(team.id)?;
            Ok(TeamResponse::new(&team, &members))
        })
    }
}
