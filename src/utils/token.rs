use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine as _,
};
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::{OsRng, RngCore};

/// Length of password reset codes.
pub const RESET_CODE_LEN: usize = 24;

/// 32 random bytes, URL-safe base64 without padding.
pub fn new_token() -> String {
    let mut buf = [0u8; 32];
    let mut rng = OsRng;
    rng.fill_bytes(&mut buf);
    URL_SAFE_NO_PAD.encode(buf)
}

pub fn new_reset_code() -> String {
    nanoid::nanoid!(RESET_CODE_LEN)
}

/// Argon2 PHC string for a password or token secret.
pub fn encrypt(secret: &str) -> Result<String, argon2::password_hash::Error> {
    let mut rng = OsRng;
    let salt = SaltString::generate(&mut rng);
    let hash = Argon2::default().hash_password(secret.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// False for anything that is not a parseable argon2 hash, including
/// hashes imported from fixtures in other formats.
pub fn verify(secret: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(secret.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

/// Client-facing token: base64 of `<user id>.<secret>`.
pub fn construct_token(user_id: i32, secret: &str) -> String {
    STANDARD.encode(format!("{user_id}.{secret}"))
}

pub fn extract_token_parts(token: &str) -> Option<(i32, String)> {
    let decoded = STANDARD.decode(token.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (id, secret) = decoded.split_once('.')?;
    if secret.is_empty() {
        return None;
    }
    Some((id.parse().ok()?, secret.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_user_id() {
        let secret = new_token();
        let token = construct_token(42, &secret);
        assert_eq!(extract_token_parts(&token), Some((42, secret)));
    }

    #[test]
    fn token_secret_is_bare_url_safe_base64() {
        let secret = new_token();
        assert_eq!(secret.len(), 43);
        assert_eq!(URL_SAFE_NO_PAD.decode(&secret).unwrap().len(), 32);
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert_eq!(extract_token_parts("not base64!"), None);
        assert_eq!(extract_token_parts(&STANDARD.encode("abc.def")), None);
        assert_eq!(extract_token_parts(&STANDARD.encode("7.")), None);
        assert_eq!(extract_token_parts(&STANDARD.encode("7")), None);
    }

    #[test]
    fn hash_verifies_only_the_original_secret() {
        let hash = encrypt("ActualToday").unwrap();
        assert!(verify("ActualToday", &hash));
        assert!(!verify("SportToday", &hash));
    }

    #[test]
    fn foreign_hash_formats_never_verify() {
        assert!(!verify("password", "pbkdf2_sha256$600000$salt$hash"));
        assert!(!verify("password", ""));
    }

    #[test]
    fn tokens_and_codes_are_unique() {
        assert_ne!(new_token(), new_token());
        let code = new_reset_code();
        assert_eq!(code.len(), RESET_CODE_LEN);
        assert_ne!(code, new_reset_code());
    }
}
