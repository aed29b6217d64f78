use std::{path::Path, sync::Arc};

use serde::Deserialize;

use crate::{
    auth::hash_password,
    db::IdAllocator,
    errors::AppResult,
    models::domain::{
        role::{ROLE_STUDENT, ROLE_TEACHER},
        Role, User,
    },
    repositories::{RoleRepository, UserRepository},
};

const SEED_PASSWORD: &str = "123456";
const SEED_CLASS: &str = "3eme annee";
const SEED_LEVEL: &str = "L3";

/// One entry of the student-profiles seed file.
#[derive(Debug, Deserialize)]
struct SeedProfile {
    student_id: String,
    last_name: String,
    first_name: String,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    class_name: Option<String>,
}

/// Populates an empty database with the two base roles and a starter set of
/// accounts. Runs on every boot but only writes when the target collection
/// is empty, so restarting never duplicates data.
pub async fn initialize(
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    ids: Arc<dyn IdAllocator>,
    seed_file: &str,
) -> AppResult<()> {
    seed_roles(&*roles, &*ids).await?;
    seed_users(&*users, &*ids, seed_file).await
}

async fn seed_roles(roles: &dyn RoleRepository, ids: &dyn IdAllocator) -> AppResult<()> {
    if roles.count().await? > 0 {
        return Ok(());
    }

    for name in [ROLE_STUDENT, ROLE_TEACHER] {
        let id = ids.next_id("roles").await?;
        roles.create(Role::new(id, name)).await?;
    }

    log::info!("Seeded base roles");
    Ok(())
}

async fn seed_users(
    users: &dyn UserRepository,
    ids: &dyn IdAllocator,
    seed_file: &str,
) -> AppResult<()> {
    if users.count().await? > 0 {
        return Ok(());
    }

    let profiles = load_profiles(seed_file);

    for profile in &profiles {
        let id = ids.next_id("users").await?;
        users.create(student_account(id, profile)?).await?;
    }

    let teacher_id = ids.next_id("users").await?;
    users.create(teacher_account(teacher_id)?).await?;

    log::info!("Seeded {} student accounts and 1 teacher account", profiles.len());
    Ok(())
}

/// Reads the student-profiles file, falling back to a built-in roster when
/// the file is absent or unreadable. Boot never fails over seed data.
fn load_profiles(seed_file: &str) -> Vec<SeedProfile> {
    if Path::new(seed_file).exists() {
        match std::fs::read_to_string(seed_file) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(profiles) => return profiles,
                Err(e) => log::warn!("Seed file '{}' is not valid JSON: {}", seed_file, e),
            },
            Err(e) => log::warn!("Could not read seed file '{}': {}", seed_file, e),
        }
    }

    default_profiles()
}

fn default_profiles() -> Vec<SeedProfile> {
    [
        ("422001", "Benali", "Ahmed"),
        ("270002", "Trabelsi", "Sami"),
        ("783003", "Khlifi", "Mariem"),
    ]
    .into_iter()
    .map(|(student_id, last_name, first_name)| SeedProfile {
        student_id: student_id.to_string(),
        last_name: last_name.to_string(),
        first_name: first_name.to_string(),
        level: None,
        class_name: None,
    })
    .collect()
}

fn student_account(id: i64, profile: &SeedProfile) -> AppResult<User> {
    let password_hash = hash_password(SEED_PASSWORD)?;

    Ok(User::new(
        id,
        &profile.last_name,
        &profile.first_name,
        &format!("{}@student.com", profile.student_id),
        profile.student_id.parse().ok(),
        profile.class_name.as_deref().unwrap_or(SEED_CLASS),
        profile.level.as_deref().unwrap_or(SEED_LEVEL),
        &password_hash,
        &profile.student_id,
        ROLE_STUDENT,
    ))
}

fn teacher_account(id: i64) -> AppResult<User> {
    let password_hash = hash_password(SEED_PASSWORD)?;

    Ok(User::new(
        id,
        "Khalil",
        "Fatma",
        "enseignant@test.com",
        None,
        SEED_CLASS,
        SEED_LEVEL,
        &password_hash,
        "PROF001",
        ROLE_TEACHER,
    ))
}
