//! Resolves the Project -> Teams -> Member-Users tree out of three
//! independently stored collections.
//!
//! Resolution is best-effort by contract: every reference is weak, so ids
//! without a matching document are dropped silently, and a failed lookup is
//! contained to the project (or team) it was serving. One broken project
//! never takes down the listing.

use std::collections::HashMap;

use bson::oid::ObjectId;
use tracing::warn;

use crate::auth::PublicUser;
use crate::models::{Project, Team};
use crate::projects::dto::{ProjectView, TeamView};
use crate::store::Store;

pub async fn aggregate(store: &dyn Store, projects: Vec<Project>) -> Vec<ProjectView> {
    let mut views = Vec::with_capacity(projects.len());
    for project in projects {
        let teams = resolve_teams(store, &project).await;
        views.push(ProjectView::assemble(project, teams));
    }
    views
}

/// One batched lookup for the project's team ids, re-sorted to the project's
/// own ordering. A lookup failure resolves to no teams at all.
async fn resolve_teams(store: &dyn Store, project: &Project) -> Vec<TeamView> {
    if project.teams.is_empty() {
        return Vec::new();
    }
    let found = match store.teams_by_ids(&project.teams).await {
        Ok(found) => found,
        Err(err) => {
            warn!(project_id = %project.id, error = %err, "team lookup failed");
            return Vec::new();
        }
    };

    let mut by_id: HashMap<ObjectId, Team> =
        found.into_iter().map(|team| (team.id, team)).collect();

    let mut views = Vec::with_capacity(by_id.len());
    for id in &project.teams {
        let Some(team) = by_id.remove(id) else {
            continue;
        };
        let members = resolve_members(store, &team).await;
        views.push(TeamView::assemble(team, members));
    }
    views
}

/// Same batched pattern one level down. Member views are the public user
/// shape; the password hash never passes through this path.
async fn resolve_members(store: &dyn Store, team: &Team) -> Vec<PublicUser> {
    if team.members.is_empty() {
        return Vec::new();
    }
    let found = match store.users_by_ids(&team.members).await {
        Ok(found) => found,
        Err(err) => {
            warn!(team_id = %team.id, error = %err, "member lookup failed");
            return Vec::new();
        }
    };

    let mut by_id: HashMap<ObjectId, _> = found.into_iter().map(|user| (user.id, user)).collect();

    team.members
        .iter()
        .filter_map(|id| by_id.remove(id))
        .map(PublicUser::from)
        .collect()
}
