use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// User roles as the server reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Recruiter,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "candidate",
            Role::Recruiter => "recruiter",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("role must be 'candidate', 'recruiter' or 'admin'")]
pub struct InvalidRole;

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "candidate" => Ok(Role::Candidate),
            "recruiter" => Ok(Role::Recruiter),
            "admin" => Ok(Role::Admin),
            _ => Err(InvalidRole),
        }
    }
}

/// Persisted token + role pair proving authentication. Written only by the
/// session manager; everyone else reads it through the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub role: Role,
}

/// The current user as the rest of the client sees it: just a role.
/// The token itself never leaves the session layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub role: Role,
}

/// Wire response of the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub role: Role,
}

/// Wire request of the registration endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}
