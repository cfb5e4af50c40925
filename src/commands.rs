//! Management commands behind the `dailynews` binary.

use std::{env, fs, path::Path};

use anyhow::{bail, Context, Result};
use entity::user::{Model as UserModel, Role};
use tracing::info;

use crate::db::{
    bootstrap::{create_database, split_database_url, DEFAULT_DATABASE_NAME},
    mariadb_service::{MariaDbService, MigrationState},
};
use crate::fixtures::parse_fixture;
use crate::types::user::DBUserCreate;
use crate::utils::{
    token::encrypt,
    validation::{validate_email, validate_password, validate_username},
};

pub const SUPERUSER_PASSWORD_ENV: &str = "DAILYNEWS_SUPERUSER_PASSWORD";

/// Creates the database named by `name`, falling back to the one in the URL
/// and then to `dailynews_db`. Returns the name used.
pub async fn createdb(database_url: &str, name: Option<String>) -> Result<String> {
    let (server_url, url_name) = split_database_url(database_url)?;
    let name = name
        .or(url_name)
        .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());
    create_database(&server_url, &name)
        .await
        .with_context(|| format!("creating database {name}"))?;
    Ok(name)
}

pub async fn migrate(database_url: &str) -> Result<MariaDbService> {
    let db = MariaDbService::connect(database_url)
        .await
        .context("connecting to the database")?;
    let pending = db.pending_migrations().await?;
    if pending.is_empty() {
        info!("No migrations to apply.");
    } else {
        info!("Applying {} migration(s)", pending.len());
    }
    db.migrate().await.context("applying migrations")?;
    Ok(db)
}

pub async fn showmigrations(database_url: &str) -> Result<Vec<MigrationState>> {
    let db = MariaDbService::connect(database_url)
        .await
        .context("connecting to the database")?;
    Ok(db.migration_status().await?)
}

/// `[X] name` for applied migrations, `[ ] name` otherwise.
pub fn format_migrations(states: &[MigrationState]) -> String {
    states
        .iter()
        .map(|m| format!("[{}] {}", if m.applied { "X" } else { " " }, m.name))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn loaddata(db: &MariaDbService, path: &Path) -> Result<usize> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading fixture {}", path.display()))?;
    let fixture =
        parse_fixture(&raw).with_context(|| format!("parsing fixture {}", path.display()))?;
    let count = db
        .load_fixture(fixture)
        .await
        .with_context(|| format!("loading fixture {}", path.display()))?;
    Ok(count)
}

#[derive(Debug, Clone, Default)]
pub struct SuperuserArgs {
    pub username: Option<String>,
    pub email: Option<String>,
    pub noinput: bool,
}

/// Staff and superuser flags set, no publishers. The role stays READER so the
/// account only gains the admin surface.
pub async fn create_superuser(
    db: &MariaDbService,
    username: &str,
    email: &str,
    password: &str,
) -> Result<UserModel> {
    let mut errors = Vec::new();
    errors.extend(validate_username(username));
    if !email.is_empty() {
        errors.extend(validate_email(email));
    }
    errors.extend(validate_password(username, password, password));
    if !errors.is_empty() {
        bail!(errors.join("; "));
    }
    if db.user_exists_by_username(username).await? {
        bail!("Error: That username is already taken.");
    }

    let hashed = encrypt(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let user = db
        .create_user(
            DBUserCreate {
                username: username.to_string(),
                email: email.to_string(),
                first_name: String::new(),
                last_name: String::new(),
                password: hashed,
                role: Role::Reader,
                profile_photo: None,
                is_staff: true,
                is_superuser: true,
            },
            &[],
        )
        .await?;
    info!("Superuser {} created", user.username);
    Ok(user)
}

/// Gathers the superuser fields from flags, the environment or prompts.
pub fn superuser_input(args: SuperuserArgs) -> Result<(String, String, String)> {
    if args.noinput {
        let username = args
            .username
            .context("--username is required with --noinput")?;
        let password = env::var(SUPERUSER_PASSWORD_ENV)
            .with_context(|| format!("{SUPERUSER_PASSWORD_ENV} must be set with --noinput"))?;
        return Ok((username, args.email.unwrap_or_default(), password));
    }

    let username = match args.username {
        Some(u) => u,
        None => promptly::prompt::<String, _>("Username")?,
    };
    let email = match args.email {
        Some(e) => e,
        None => promptly::prompt_default("Email address", String::new())?,
    };
    let password: String = promptly::prompt("Password")?;
    let again: String = promptly::prompt("Password (again)")?;
    if password != again {
        bail!("Error: Your passwords didn't match.");
    }
    Ok((username, email, password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_listing() {
        let states = vec![
            MigrationState { name: "m20251101_000001_create_publisher_table".into(), applied: true },
            MigrationState { name: "m20251101_000002_create_user_table".into(), applied: false },
        ];
        assert_eq!(
            format_migrations(&states),
            "[X] m20251101_000001_create_publisher_table\n[ ] m20251101_000002_create_user_table"
        );
    }

    #[test]
    fn noinput_requires_username() {
        let err = superuser_input(SuperuserArgs { noinput: true, ..Default::default() }).unwrap_err();
        assert!(err.to_string().contains("--username"));
    }
}
