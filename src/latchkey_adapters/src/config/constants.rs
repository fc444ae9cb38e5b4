pub mod env {
    pub const ENV_PREFIX: &str = "LATCHKEY";
    pub const ENV_SEPARATOR: &str = "__";
}

pub const CONFIG_FILE: &str = "config/base";

/// Upper bound for every configured token lifetime, one hundred years.
pub const MAX_TTL_SECS: i64 = 100 * 365 * 24 * 60 * 60;

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:8080";
    pub const DATABASE_MAX_CONNECTIONS: u32 = 5;

    pub mod jwt {
        pub const AUDIENCE: &str = "latchkey-clients";
        pub const ISSUER: &str = "latchkey";
        pub const SUBJECT: &str = "access";
        pub const ACCESS_TOKEN_TTL_SECS: i64 = 4 * 60 * 60;
        pub const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;
    }

    pub mod password_reset {
        pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;
        pub const LINK_BASE_URL: &str = "http://localhost:8080/reset-password";
    }

    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const SENDER: &str = "no-reply@latchkey.local";
        pub const TIMEOUT_MILLIS: u64 = 10_000;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
