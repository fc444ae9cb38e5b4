use super::{claims::Claims, email::Email, hashed_password::HashedPassword, password::Password};

/// Placeholder shown wherever a user record is handed back to a caller.
pub const MASKED_PASSWORD: &str = "**********";

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    email: Email,
    password_hash: HashedPassword,
    claims: Claims,
}

impl User {
    pub fn new(email: Email, password_hash: HashedPassword, claims: Claims) -> Self {
        Self {
            email,
            password_hash,
            claims,
        }
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn set_password_hash(&mut self, password_hash: HashedPassword) {
        self.password_hash = password_hash;
    }

    pub fn set_claims(&mut self, claims: Claims) {
        self.claims = claims;
    }

    pub fn into_details(self) -> UserDetails {
        UserDetails {
            email: self.email,
            password: MASKED_PASSWORD,
            claims: self.claims,
        }
    }
}

/// Outward view of a user. The password is always the masked placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDetails {
    email: Email,
    password: &'static str,
    claims: Claims,
}

impl UserDetails {
    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }
}

impl From<User> for UserDetails {
    fn from(user: User) -> Self {
        user.into_details()
    }
}

/// Partial update for an existing user. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub password: Option<Password>,
    pub claims: Option<Claims>,
}
