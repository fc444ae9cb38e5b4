/// Free-form per-user claims. Keys are claim names, values are arbitrary JSON.
pub type Claims = serde_json::Map<String, serde_json::Value>;

pub mod names {
    pub const AUDIENCE: &str = "aud";
    pub const ISSUER: &str = "iss";
    pub const SUBJECT: &str = "sub";
    pub const ISSUED_AT: &str = "iat";
    pub const NOT_BEFORE: &str = "nbf";
    pub const EXPIRES_AT: &str = "exp";
    /// Unique token id. Spelled `jit` on the wire for compatibility with
    /// tokens already in circulation.
    pub const TOKEN_ID: &str = "jit";
    pub const EMAIL: &str = "email";
}

/// Claim names the signer always sets itself, overriding caller values.
pub const RESERVED_CLAIMS: [&str; 8] = [
    names::AUDIENCE,
    names::ISSUER,
    names::SUBJECT,
    names::ISSUED_AT,
    names::NOT_BEFORE,
    names::EXPIRES_AT,
    names::TOKEN_ID,
    names::EMAIL,
];
