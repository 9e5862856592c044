//! Membership roles and review lifecycle enumerations.
//!
//! Roles are a closed set; values that fall outside it are unrepresentable
//! past the parsing boundary. The application status only carries meaning
//! while an account still holds the applicant role.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when parsing free-form input into one of the closed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Membership role held by an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Awaiting review; no club privileges yet.
    Applicant,
    /// Accepted into the club.
    Member,
    /// Reviews applications and sees extended member detail.
    Officer,
    /// Runs the club; exactly one owner exists at any time.
    Owner,
}

impl Role {
    /// Canonical lowercase name, also used as the storage encoding.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Applicant => "applicant",
            Self::Member => "member",
            Self::Officer => "officer",
            Self::Owner => "owner",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applicant" => Ok(Self::Applicant),
            "member" => Ok(Self::Member),
            "officer" => Ok(Self::Officer),
            "owner" => Ok(Self::Owner),
            other => Err(ParseEnumError::new("role", other)),
        }
    }
}

/// Review outcome recorded against an applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Not yet reviewed.
    Pending,
    /// Application approved; the account was promoted to member.
    Accepted,
    /// Application declined; the account remains an applicant.
    Rejected,
}

impl ApplicationStatus {
    /// Canonical lowercase name, also used as the storage encoding.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(ParseEnumError::new("application status", other)),
        }
    }
}

/// Self-reported playing experience shown on profiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// New to the game.
    #[default]
    Beginner,
    /// Comfortable club player.
    Intermediate,
    /// Tournament strength.
    Advanced,
}

impl ExperienceLevel {
    /// Canonical lowercase name, also used as the storage encoding.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExperienceLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(ParseEnumError::new("experience level", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::applicant(Role::Applicant, "applicant")]
    #[case::member(Role::Member, "member")]
    #[case::officer(Role::Officer, "officer")]
    #[case::owner(Role::Owner, "owner")]
    fn role_names_round_trip(#[case] role: Role, #[case] name: &str) {
        assert_eq!(role.as_str(), name);
        assert_eq!(name.parse::<Role>(), Ok(role));
    }

    #[rstest]
    #[case::pending(ApplicationStatus::Pending, "pending")]
    #[case::accepted(ApplicationStatus::Accepted, "accepted")]
    #[case::rejected(ApplicationStatus::Rejected, "rejected")]
    fn status_names_round_trip(#[case] status: ApplicationStatus, #[case] name: &str) {
        assert_eq!(status.as_str(), name);
        assert_eq!(name.parse::<ApplicationStatus>(), Ok(status));
    }

    #[rstest]
    #[case::beginner(ExperienceLevel::Beginner, "beginner")]
    #[case::intermediate(ExperienceLevel::Intermediate, "intermediate")]
    #[case::advanced(ExperienceLevel::Advanced, "advanced")]
    fn experience_names_round_trip(#[case] level: ExperienceLevel, #[case] name: &str) {
        assert_eq!(level.as_str(), name);
        assert_eq!(name.parse::<ExperienceLevel>(), Ok(level));
    }

    #[rstest]
    fn unknown_role_is_rejected() {
        let error = "chairman".parse::<Role>().expect_err("must reject");
        assert_eq!(error.to_string(), "unknown role `chairman`");
    }

    #[rstest]
    fn beginner_is_the_default_experience() {
        assert_eq!(ExperienceLevel::default(), ExperienceLevel::Beginner);
    }

    #[rstest]
    fn roles_serialize_in_snake_case() {
        let encoded = serde_json::to_string(&Role::Officer).expect("serialize role");
        assert_eq!(encoded, "\"officer\"");
    }
}
