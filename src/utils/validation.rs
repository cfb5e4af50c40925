use std::collections::{BTreeMap, HashMap};

use email_address::EmailAddress;
use entity::publisher::Model as PublisherModel;
use entity::user::Role;

pub const USERNAME_MAX_LEN: usize = 150;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const TITLE_MAX_LEN: usize = 255;
pub const PUBLISHER_NAME_MAX_LEN: usize = 100;
pub const ACCESS_PASSWORD_MAX_LEN: usize = 128;

pub fn validate_username(username: &str) -> Option<String> {
    if username.is_empty() || username.chars().count() > USERNAME_MAX_LEN {
        return Some(format!("Username must be 1 to {USERNAME_MAX_LEN} characters."));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || "@.+-_".contains(c);
    if !username.chars().all(allowed) {
        return Some(
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
                .to_string(),
        );
    }
    None
}

pub fn validate_email(email: &str) -> Option<String> {
    if email.trim().is_empty() {
        return Some("Email Address is required.".to_string());
    }
    if !EmailAddress::is_valid(email.trim()) {
        return Some("Enter a valid email address.".to_string());
    }
    None
}

/// Confirmation match plus the basic strength rules.
pub fn validate_password(username: &str, password1: &str, password2: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if password1 != password2 {
        errors.push("The two password fields didn't match.".to_string());
        return errors;
    }
    if password1.chars().count() < PASSWORD_MIN_LEN {
        errors.push(format!(
            "This password is too short. It must contain at least {PASSWORD_MIN_LEN} characters."
        ));
    }
    if !password1.is_empty() && password1.chars().all(|c| c.is_ascii_digit()) {
        errors.push("This password is entirely numeric.".to_string());
    }
    if !username.is_empty() && password1.to_lowercase().contains(&username.to_lowercase()) {
        errors.push("The password is too similar to the username.".to_string());
    }
    errors
}

/// Resolves the publishers a new staff member may join.
///
/// `supplied` maps publisher name to the passphrase the applicant typed and
/// `known` maps name to the stored publisher. Blank passphrases are ignored.
/// Every failing entry is reported, not just the first.
pub fn check_publisher_passwords(
    role: Role,
    supplied: &BTreeMap<String, String>,
    known: &HashMap<String, PublisherModel>,
) -> Result<Vec<PublisherModel>, Vec<String>> {
    let attempts: Vec<(&String, &String)> = supplied
        .iter()
        .filter(|(_, pass)| !pass.is_empty())
        .collect();

    if attempts.is_empty() {
        return Err(vec![
            "Journalists and Editors must join at least one Publisher. Please provide a valid access password for ActualToday or SportToday."
                .to_string(),
        ]);
    }

    let mut valid = Vec::new();
    let mut errors = Vec::new();
    for (name, pass) in attempts {
        match known.get(name) {
            None => errors.push(format!("{name} Publisher not found. Contact administrator.")),
            Some(p) if &p.access_password != pass => {
                errors.push(format!("Incorrect access password for {name}."))
            }
            Some(p) => valid.push(p.clone()),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    if role == Role::Editor && valid.len() > 1 {
        return Err(vec!["As an Editor, you can only join one publisher.".to_string()]);
    }
    Ok(valid)
}

pub fn validate_article(title: &str, body: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if title.trim().is_empty() {
        errors.push("Title is required.".to_string());
    } else if title.chars().count() > TITLE_MAX_LEN {
        errors.push(format!("Title must be at most {TITLE_MAX_LEN} characters."));
    }
    if body.trim().is_empty() {
        errors.push("Body is required.".to_string());
    }
    errors
}

pub fn validate_publisher(name: &str, access_password: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push("Publisher name is required.".to_string());
    } else if name.chars().count() > PUBLISHER_NAME_MAX_LEN {
        errors.push(format!("Publisher name must be at most {PUBLISHER_NAME_MAX_LEN} characters."));
    }
    if access_password.is_empty() {
        errors.push("Access password is required.".to_string());
    } else if access_password.chars().count() > ACCESS_PASSWORD_MAX_LEN {
        errors.push(format!("Access password must be at most {ACCESS_PASSWORD_MAX_LEN} characters."));
    }
    errors
}
