//! In-memory [`Store`] used by unit tests in place of a live MongoDB.

use std::collections::HashSet;
use std::sync::Mutex;

use anyhow::bail;
use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::models::{Checkin, Project, Team, User};
use crate::store::{CheckinFilter, ProjectPatch, Store, TeamPatch};

#[derive(Default)]
pub struct MemStore {
    users: Mutex<Vec<User>>,
    teams: Mutex<Vec<Team>>,
    projects: Mutex<Vec<Project>>,
    checkins: Mutex<Vec<Checkin>>,
    poisoned_team_lookups: Mutex<HashSet<ObjectId>>,
    poisoned_user_lookups: Mutex<HashSet<ObjectId>>,
}

impl MemStore {
    /// Make any batched team lookup that includes `id` fail, simulating a
    /// store error for one project while others keep resolving.
    pub fn poison_team_lookup(&self, id: ObjectId) {
        self.poisoned_team_lookups.lock().unwrap().insert(id);
    }

    pub fn poison_user_lookup(&self, id: ObjectId) {
        self.poisoned_user_lookups.lock().unwrap().insert(id);
    }
}

fn matches_filter(checkin: &Checkin, filter: &CheckinFilter) -> bool {
    if let Some(user_id) = filter.user_id {
        if checkin.user_id != user_id {
            return false;
        }
    }
    if let Some((start, end)) = filter.created_within {
        let at = checkin.created_at.timestamp_millis();
        if at < start.timestamp_millis() || at >= end.timestamp_millis() {
            return false;
        }
    }
    true
}

#[async_trait]
impl Store for MemStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_user_by_id(&self, id: ObjectId) -> anyhow::Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn users_by_ids(&self, ids: &[ObjectId]) -> anyhow::Result<Vec<User>> {
        let poisoned = self.poisoned_user_lookups.lock().unwrap();
        if ids.iter().any(|id| poisoned.contains(id)) {
            bail!("simulated user lookup failure");
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn insert_user(&self, user: &User) -> anyhow::Result<()> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn list_teams(&self) -> anyhow::Result<Vec<Team>> {
        Ok(self.teams.lock().unwrap().clone())
    }

    async fn find_team_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Team>> {
        Ok(self
            .teams
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn teams_by_ids(&self, ids: &[ObjectId]) -> anyhow::Result<Vec<Team>> {
        let poisoned = self.poisoned_team_lookups.lock().unwrap();
        if ids.iter().any(|id| poisoned.contains(id)) {
            bail!("simulated team lookup failure");
        }
        // Reversed on purpose: the contract makes no ordering promise, and
        // this flushes out callers that forget to re-sort.
        Ok(self
            .teams
            .lock()
            .unwrap()
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .rev()
            .collect())
    }

    async fn insert_team(&self, team: &Team) -> anyhow::Result<()> {
        self.teams.lock().unwrap().push(team.clone());
        Ok(())
    }

    async fn update_team(&self, id: ObjectId, patch: TeamPatch) -> anyhow::Result<()> {
        if let Some(team) = self.teams.lock().unwrap().iter_mut().find(|t| t.id == id) {
            team.name = patch.name;
            team.description = patch.description;
            team.members = patch.members;
            team.lead = patch.lead;
        }
        Ok(())
    }

    async fn delete_team(&self, id: ObjectId) -> anyhow::Result<()> {
        self.teams.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }

    async fn list_projects(&self) -> anyhow::Result<Vec<Project>> {
        Ok(self.projects.lock().unwrap().clone())
    }

    async fn find_project_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Project>> {
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn insert_project(&self, project: &Project) -> anyhow::Result<()> {
        self.projects.lock().unwrap().push(project.clone());
        Ok(())
    }

    async fn update_project(&self, id: ObjectId, patch: ProjectPatch) -> anyhow::Result<()> {
        if let Some(project) = self
            .projects
            .lock()
            .unwrap()
            .iter_mut()
            .find(|p| p.id == id)
        {
            project.name = patch.name;
            project.description = patch.description;
            if let Some(start) = patch.start_date {
                project.start_date = Some(start);
            }
            if let Some(end) = patch.end_date {
                project.end_date = Some(end);
            }
            if let Some(teams) = patch.teams {
                project.teams = teams;
            }
        }
        Ok(())
    }

    async fn delete_project(&self, id: ObjectId) -> anyhow::Result<()> {
        self.projects.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn list_checkins(&self, filter: CheckinFilter) -> anyhow::Result<Vec<Checkin>> {
        Ok(self
            .checkins
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches_filter(c, &filter))
            .cloned()
            .collect())
    }

    async fn insert_checkin(&self, checkin: &Checkin) -> anyhow::Result<()> {
        self.checkins.lock().unwrap().push(checkin.clone());
        Ok(())
    }
}
