//! Account data model.
//!
//! All field newtypes validate on construction, so an assembled [`Account`]
//! is valid by definition. Character-set rules live in regexes; length
//! bounds are enforced separately so violations report precise limits.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::role::{ApplicationStatus, ExperienceLevel, Role};

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 30;
/// Minimum allowed length for a first or last name.
pub const PERSON_NAME_MIN: usize = 3;
/// Maximum allowed length for a first or last name.
pub const PERSON_NAME_MAX: usize = 50;
/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 50;
/// Maximum allowed length for a bio.
pub const BIO_MAX: usize = 300;
/// Maximum allowed length for a personal statement.
pub const PERSONAL_STATEMENT_MAX: usize = 500;

/// Gravatar rendering size used on full profile pages.
pub const GRAVATAR_SIZE_PROFILE: u32 = 120;
/// Gravatar rendering size used in roster rows.
pub const GRAVATAR_SIZE_MINI: u32 = 60;

/// Validation errors raised by the account field newtypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyId,
    InvalidId,
    UsernameTooShort { min: usize },
    UsernameTooLong { max: usize },
    UsernameInvalidCharacters,
    NameTooShort { min: usize },
    NameTooLong { max: usize },
    NameInvalidCharacters,
    EmailTooLong { max: usize },
    EmailInvalidFormat,
    BioTooLong { max: usize },
    PersonalStatementTooLong { max: usize },
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "account id must not be empty"),
            Self::InvalidId => write!(f, "account id must be a valid UUID"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, or underscores",
            ),
            Self::NameTooShort { min } => {
                write!(f, "name must be at least {min} characters")
            }
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::NameInvalidCharacters => write!(f, "name may only contain letters"),
            Self::EmailTooLong { max } => {
                write!(f, "email must be at most {max} characters")
            }
            Self::EmailInvalidFormat => write!(
                f,
                "email must be a local part followed by an @ and a dotted domain",
            ),
            Self::BioTooLong { max } => write!(f, "bio must be at most {max} characters"),
            Self::PersonalStatementTooLong { max } => {
                write!(f, "personal statement must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Stable account identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(Uuid, String);

impl AccountId {
    /// Validate and construct an [`AccountId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`AccountId`].
    #[must_use]
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    /// Construct an [`AccountId`] from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, AccountValidationError> {
        if id.is_empty() {
            return Err(AccountValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(AccountValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| AccountValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        let AccountId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new(r"^\w+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Unique login handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`] from owned input.
    pub fn new(username: impl Into<String>) -> Result<Self, AccountValidationError> {
        Self::from_owned(username.into())
    }

    fn from_owned(username: String) -> Result<Self, AccountValidationError> {
        let length = username.chars().count();
        if length < USERNAME_MIN {
            return Err(AccountValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(AccountValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(&username) {
            return Err(AccountValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

static PERSON_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn person_name_regex() -> &'static Regex {
    PERSON_NAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new("^[A-Za-z]+$")
            .unwrap_or_else(|error| panic!("person name regex failed to compile: {error}"))
    })
}

/// A first or last name; both share the same rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a [`PersonName`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, AccountValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, AccountValidationError> {
        let length = name.chars().count();
        if length < PERSON_NAME_MIN {
            return Err(AccountValidationError::NameTooShort {
                min: PERSON_NAME_MIN,
            });
        }
        if length > PERSON_NAME_MAX {
            return Err(AccountValidationError::NameTooLong {
                max: PERSON_NAME_MAX,
            });
        }
        if !person_name_regex().is_match(&name) {
            return Err(AccountValidationError::NameInvalidCharacters);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PersonName {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Deliberately loose: a local part, an @, and a dotted domain.
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Unique contact address; also the source of the gravatar digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`] from owned input.
    pub fn new(email: impl Into<String>) -> Result<Self, AccountValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, AccountValidationError> {
        if email.chars().count() > EMAIL_MAX {
            return Err(AccountValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&email) {
            return Err(AccountValidationError::EmailInvalidFormat);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Free-text bio shown on full-detail profiles. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bio(String);

impl Bio {
    /// Validate and construct a [`Bio`] from owned input.
    pub fn new(bio: impl Into<String>) -> Result<Self, AccountValidationError> {
        Self::from_owned(bio.into())
    }

    fn from_owned(bio: String) -> Result<Self, AccountValidationError> {
        if bio.chars().count() > BIO_MAX {
            return Err(AccountValidationError::BioTooLong { max: BIO_MAX });
        }
        Ok(Self(bio))
    }
}

impl AsRef<str> for Bio {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Bio> for String {
    fn from(value: Bio) -> Self {
        value.0
    }
}

impl TryFrom<String> for Bio {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Free-text statement applicants submit for review. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonalStatement(String);

impl PersonalStatement {
    /// Validate and construct a [`PersonalStatement`] from owned input.
    pub fn new(statement: impl Into<String>) -> Result<Self, AccountValidationError> {
        Self::from_owned(statement.into())
    }

    fn from_owned(statement: String) -> Result<Self, AccountValidationError> {
        if statement.chars().count() > PERSONAL_STATEMENT_MAX {
            return Err(AccountValidationError::PersonalStatementTooLong {
                max: PERSONAL_STATEMENT_MAX,
            });
        }
        Ok(Self(statement))
    }
}

impl AsRef<str> for PersonalStatement {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<PersonalStatement> for String {
    fn from(value: PersonalStatement) -> Self {
        value.0
    }
}

impl TryFrom<String> for PersonalStatement {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Identity fields shared by registration and profile edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountIdentity {
    /// Unique login handle.
    pub username: Username,
    /// Given name.
    pub first_name: PersonName,
    /// Family name.
    pub last_name: PersonName,
    /// Unique contact address.
    pub email: EmailAddress,
}

/// Profile fields an account holder may edit freely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountProfile {
    /// Self-reported playing strength.
    pub experience_level: ExperienceLevel,
    /// Statement submitted with the application.
    pub personal_statement: PersonalStatement,
    /// Short bio shown to reviewers.
    pub bio: Bio,
}

/// Validated replacement values for an account's editable fields.
///
/// The username is deliberately absent: handles are immutable once chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Given name.
    pub first_name: PersonName,
    /// Family name.
    pub last_name: PersonName,
    /// Unique contact address.
    pub email: EmailAddress,
    /// Self-reported playing strength.
    pub experience_level: ExperienceLevel,
    /// Statement submitted with the application.
    pub personal_statement: PersonalStatement,
    /// Short bio shown to reviewers.
    pub bio: Bio,
}

/// Fully-validated account fields, used to assemble an [`Account`] at the
/// persistence boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountParts {
    /// Stable identifier.
    pub id: AccountId,
    /// Identity fields.
    pub identity: AccountIdentity,
    /// Editable profile fields.
    pub profile: AccountProfile,
    /// Membership role.
    pub role: Role,
    /// Review outcome; meaningful only while the role is applicant.
    pub application_status: ApplicationStatus,
    /// Whether the account may authenticate. Accounts are deactivated, never
    /// deleted.
    pub is_active: bool,
}

/// A registered person.
///
/// ## Invariants
/// - Every field satisfies its newtype's validation rules.
/// - `application_status` only carries meaning while `role` is
///   [`Role::Applicant`].
/// - Accounts are created as pending applicants and only change standing
///   through the membership transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    username: Username,
    first_name: PersonName,
    last_name: PersonName,
    email: EmailAddress,
    experience_level: ExperienceLevel,
    personal_statement: PersonalStatement,
    bio: Bio,
    role: Role,
    application_status: ApplicationStatus,
    is_active: bool,
}

impl Account {
    /// Assemble an account from already-validated parts.
    #[must_use]
    pub fn from_parts(parts: AccountParts) -> Self {
        let AccountParts {
            id,
            identity,
            profile,
            role,
            application_status,
            is_active,
        } = parts;
        Self {
            id,
            username: identity.username,
            first_name: identity.first_name,
            last_name: identity.last_name,
            email: identity.email,
            experience_level: profile.experience_level,
            personal_statement: profile.personal_statement,
            bio: profile.bio,
            role,
            application_status,
            is_active,
        }
    }

    /// Create a freshly signed-up account: an active, pending applicant.
    #[must_use]
    pub fn applicant(id: AccountId, identity: AccountIdentity, profile: AccountProfile) -> Self {
        Self::from_parts(AccountParts {
            id,
            identity,
            profile,
            role: Role::Applicant,
            application_status: ApplicationStatus::Pending,
            is_active: true,
        })
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// Unique login handle.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Given name.
    #[must_use]
    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Family name.
    #[must_use]
    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// `First Last`, as rendered in rosters.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Unique contact address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Self-reported playing strength.
    #[must_use]
    pub fn experience_level(&self) -> ExperienceLevel {
        self.experience_level
    }

    /// Statement submitted with the application.
    #[must_use]
    pub fn personal_statement(&self) -> &PersonalStatement {
        &self.personal_statement
    }

    /// Short bio shown to reviewers.
    #[must_use]
    pub fn bio(&self) -> &Bio {
        &self.bio
    }

    /// Membership role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Review outcome recorded against the application.
    #[must_use]
    pub fn application_status(&self) -> ApplicationStatus {
        self.application_status
    }

    /// Whether the account may authenticate.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Explicitly set the membership role.
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Explicitly set the review outcome.
    pub fn set_application_status(&mut self, status: ApplicationStatus) {
        self.application_status = status;
    }

    /// Replace the editable profile fields.
    pub fn apply_update(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            first_name,
            last_name,
            email,
            experience_level,
            personal_statement,
            bio,
        } = update;
        self.first_name = first_name;
        self.last_name = last_name;
        self.email = email;
        self.experience_level = experience_level;
        self.personal_statement = personal_statement;
        self.bio = bio;
    }

    /// Mark the account unable to authenticate. There is no hard delete.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Gravatar URL for this account's email at the requested pixel size.
    ///
    /// The address digest follows the gravatar contract: SHA-256 of the
    /// trimmed, lowercased email, hex encoded. Unknown addresses fall back
    /// to the service's "mystery person" image.
    #[must_use]
    pub fn gravatar_url(&self, size: u32) -> String {
        let normalized = self.email.as_ref().trim().to_lowercase();
        let digest = hex::encode(Sha256::digest(normalized.as_bytes()));
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("s", &size.to_string())
            .append_pair("d", "mp")
            .finish();
        format!("https://www.gravatar.com/avatar/{digest}?{query}")
    }
}
