use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::TryStreamExt;
use mongodb::{options::ClientOptions, Client, Collection, Database};

use crate::models::{Checkin, Project, Team, User};
use crate::store::{CheckinFilter, ProjectPatch, Store, TeamPatch};

pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> anyhow::Result<Self> {
        let mut options = ClientOptions::parse(uri)
            .await
            .context("parse MONGODB_URI")?;
        // Bound how long a request-scoped lookup can sit waiting for a server.
        options.server_selection_timeout = Some(Duration::from_secs(10));
        options.connect_timeout = Some(Duration::from_secs(10));
        let client = Client::with_options(options).context("build mongodb client")?;
        Ok(Self {
            db: client.database(database),
        })
    }

    fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }

    fn teams(&self) -> Collection<Team> {
        self.db.collection("teams")
    }

    fn projects(&self) -> Collection<Project> {
        self.db.collection("projects")
    }

    fn checkins(&self) -> Collection<Checkin> {
        self.db.collection("checkins")
    }
}

fn checkin_query(filter: &CheckinFilter) -> Document {
    let mut query = Document::new();
    if let Some(user_id) = filter.user_id {
        query.insert("userId", user_id);
    }
    if let Some((start, end)) = filter.created_within {
        query.insert("createdAt", doc! { "$gte": start, "$lt": end });
    }
    query
}

#[async_trait]
impl Store for MongoStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = self
            .users()
            .find_one(doc! { "email": email })
            .await
            .context("find user by email")?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: ObjectId) -> anyhow::Result<Option<User>> {
        let user = self
            .users()
            .find_one(doc! { "_id": id })
            .await
            .context("find user by id")?;
        Ok(user)
    }

    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        let users = self
            .users()
            .find(doc! {})
            .await
            .context("list users")?
            .try_collect()
            .await
            .context("drain users cursor")?;
        Ok(users)
    }

    async fn users_by_ids(&self, ids: &[ObjectId]) -> anyhow::Result<Vec<User>> {
        let users = self
            .users()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await
            .context("find users by ids")?
            .try_collect()
            .await
            .context("drain users cursor")?;
        Ok(users)
    }

    async fn insert_user(&self, user: &User) -> anyhow::Result<()> {
        self.users()
            .insert_one(user)
            .await
            .context("insert user")?;
        Ok(())
    }

    async fn list_teams(&self) -> anyhow::Result<Vec<Team>> {
        let teams = self
            .teams()
            .find(doc! {})
            .await
            .context("list teams")?
            .try_collect()
            .await
            .context("drain teams cursor")?;
        Ok(teams)
    }

    async fn find_team_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Team>> {
        let team = self
            .teams()
            .find_one(doc! { "_id": id })
            .await
            .context("find team by id")?;
        Ok(team)
    }

    async fn teams_by_ids(&self, ids: &[ObjectId]) -> anyhow::Result<Vec<Team>> {
        let teams = self
            .teams()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await
            .context("find teams by ids")?
            .try_collect()
            .await
            .context("drain teams cursor")?;
        Ok(teams)
    }

    async fn insert_team(&self, team: &Team) -> anyhow::Result<()> {
        self.teams()
            .insert_one(team)
            .await
            .context("insert team")?;
        Ok(())
    }

    async fn update_team(&self, id: ObjectId, patch: TeamPatch) -> anyhow::Result<()> {
        let fields = bson::to_document(&patch).context("serialize team patch")?;
        self.teams()
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await
            .context("update team")?;
        Ok(())
    }

    async fn delete_team(&self, id: ObjectId) -> anyhow::Result<()> {
        self.teams()
            .delete_one(doc! { "_id": id })
            .await
            .context("delete team")?;
        Ok(())
    }

    async fn list_projects(&self) -> anyhow::Result<Vec<Project>> {
        let projects = self
            .projects()
            .find(doc! {})
            .await
            .context("list projects")?
            .try_collect()
            .await
            .context("drain projects cursor")?;
        Ok(projects)
    }

    async fn find_project_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Project>> {
        let project = self
            .projects()
            .find_one(doc! { "_id": id })
            .await
            .context("find project by id")?;
        Ok(project)
    }

    async fn insert_project(&self, project: &Project) -> anyhow::Result<()> {
        self.projects()
            .insert_one(project)
            .await
            .context("insert project")?;
        Ok(())
    }

    async fn update_project(&self, id: ObjectId, patch: ProjectPatch) -> anyhow::Result<()> {
        let fields = bson::to_document(&patch).context("serialize project patch")?;
        self.projects()
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await
            .context("update project")?;
        Ok(())
    }

    async fn delete_project(&self, id: ObjectId) -> anyhow::Result<()> {
        self.projects()
            .delete_one(doc! { "_id": id })
            .await
            .context("delete project")?;
        Ok(())
    }

    async fn list_checkins(&self, filter: CheckinFilter) -> anyhow::Result<Vec<Checkin>> {
        let checkins = self
            .checkins()
            .find(checkin_query(&filter))
            .await
            .context("list checkins")?
            .try_collect()
            .await
            .context("drain checkins cursor")?;
        Ok(checkins)
    }

    async fn insert_checkin(&self, checkin: &Checkin) -> anyhow::Result<()> {
        self.checkins()
            .insert_one(checkin)
            .await
            .context("insert checkin")?;
        Ok(())
    }
}
