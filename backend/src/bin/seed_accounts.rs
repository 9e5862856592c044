//! Populate or deactivate the club roster's demo accounts.
//!
//! `seed` inserts three fixed personas plus a deterministically generated
//! cohort of applicants, members, and officers; every account logs in with
//! `Password123`. Generation is driven by a seeded RNG so the same flag
//! value reproduces the same roster, and usernames that already exist are
//! skipped rather than overwritten. `unseed` deactivates every account
//! except the current owner; accounts are never hard-deleted.

use std::env;

use backend::domain::ports::{AccountRepository, PasswordHasher};
use backend::domain::{
    Account, AccountId, AccountIdentity, AccountParts, AccountProfile, ApplicationStatus, Bio,
    EmailAddress, ExperienceLevel, PersonName, PersonalStatement, Role, Username,
};
use backend::outbound::password::Sha256PasswordHasher;
use backend::outbound::persistence::{DbPool, DieselAccountRepository, PoolConfig};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use fake::Fake;
use fake::faker::lorem::en::Word;
use fake::faker::name::en::{FirstName, LastName};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::runtime::Builder;

const APPLICANT_COUNT: usize = 20;
const MEMBER_COUNT: usize = 80;
const OFFICER_COUNT: usize = 20;
const DEFAULT_PASSWORD: &str = "Password123";

/// Attempts per account before giving up on the name generator.
const IDENTITY_RETRIES: usize = 64;

const LEVELS: [ExperienceLevel; 3] = [
    ExperienceLevel::Beginner,
    ExperienceLevel::Intermediate,
    ExperienceLevel::Advanced,
];

/// `seed-accounts` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "seed-accounts",
    about = "Populate or deactivate the club roster's demo accounts",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    #[command(subcommand)]
    command: SeedCommand,
}

#[derive(Debug, Subcommand)]
enum SeedCommand {
    /// Insert the demo roster, skipping usernames that already exist.
    Seed {
        /// RNG seed for reproducible rosters.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Deactivate every account except the current owner.
    Unseed,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let args = CliArgs::parse();
    let database_url = resolve_database_url(args.database_url)?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .wrap_err("create database pool")?;
    let repository = DieselAccountRepository::new(pool);

    match args.command {
        SeedCommand::Seed { seed } => {
            let report = RosterSeeder::new(&repository, seed).seed().await?;
            println!(
                "seeded {} accounts ({} already present)",
                report.inserted, report.skipped
            );
        }
        SeedCommand::Unseed => {
            let deactivated = unseed(&repository).await?;
            println!("deactivated {deactivated} accounts; the owner stays active");
        }
    }
    Ok(())
}

fn resolve_database_url(flag: Option<String>) -> Result<String> {
    flag.or_else(|| env::var("DATABASE_URL").ok())
        .ok_or_else(|| eyre!("no database URL; pass --database-url or set DATABASE_URL"))
}

/// Deactivate everything except the current owner and return the count.
async fn unseed<R: AccountRepository>(repository: &R) -> Result<usize> {
    let owner = repository
        .find_owner()
        .await
        .wrap_err("look up current owner")?
        .ok_or_else(|| eyre!("no owner on the roster; nothing to keep"))?;
    repository
        .deactivate_all_except(owner.id())
        .await
        .wrap_err("deactivate roster")
}

/// How a seeding run went.
struct SeedReport {
    inserted: usize,
    skipped: usize,
}

/// Fixed demo identities required alongside the generated cohorts.
struct Persona {
    username: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    role: Role,
}

const PERSONAS: [Persona; 3] = [
    Persona {
        username: "jebKerman",
        first_name: "Jebediah",
        last_name: "Kerman",
        email: "jeb@example.org",
        role: Role::Member,
    },
    Persona {
        username: "valKerman",
        first_name: "Valentina",
        last_name: "Kerman",
        email: "val@example.org",
        role: Role::Officer,
    },
    Persona {
        username: "bilKerman",
        first_name: "Billie",
        last_name: "Kerman",
        email: "billie@example.org",
        role: Role::Owner,
    },
];

/// Deterministic roster generator over any account repository.
struct RosterSeeder<'a, R> {
    repository: &'a R,
    hasher: Sha256PasswordHasher,
    rng: ChaCha8Rng,
    sequence: usize,
    inserted: usize,
    skipped: usize,
}

impl<'a, R: AccountRepository> RosterSeeder<'a, R> {
    fn new(repository: &'a R, seed: u64) -> Self {
        Self {
            repository,
            hasher: Sha256PasswordHasher::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            sequence: 0,
            inserted: 0,
            skipped: 0,
        }
    }

    async fn seed(mut self) -> Result<SeedReport> {
        for persona in &PERSONAS {
            let account = self.persona_account(persona)?;
            self.insert(account).await?;
        }
        self.cohort(Role::Applicant, APPLICANT_COUNT).await?;
        self.cohort(Role::Member, MEMBER_COUNT).await?;
        self.cohort(Role::Officer, OFFICER_COUNT).await?;
        Ok(SeedReport {
            inserted: self.inserted,
            skipped: self.skipped,
        })
    }

    async fn cohort(&mut self, role: Role, count: usize) -> Result<()> {
        for _ in 0..count {
            let account = self.generated_account(role)?;
            self.insert(account).await?;
        }
        Ok(())
    }

    /// Insert unless the username is already on the roster.
    async fn insert(&mut self, account: Account) -> Result<()> {
        let existing = self
            .repository
            .find_by_username(account.username().as_ref())
            .await
            .wrap_err("look up existing username")?;
        if existing.is_some() {
            self.skipped += 1;
            return Ok(());
        }
        let digest = self
            .hasher
            .hash(DEFAULT_PASSWORD)
            .map_err(|error| eyre!("hash seed password: {error}"))?;
        self.repository
            .insert(&account, &digest)
            .await
            .wrap_err_with(|| format!("insert account {}", account.username()))?;
        self.inserted += 1;
        Ok(())
    }

    fn persona_account(&mut self, persona: &Persona) -> Result<Account> {
        let identity = AccountIdentity {
            username: Username::new(persona.username).wrap_err("persona username")?,
            first_name: PersonName::new(persona.first_name).wrap_err("persona first name")?,
            last_name: PersonName::new(persona.last_name).wrap_err("persona last name")?,
            email: EmailAddress::new(persona.email).wrap_err("persona email")?,
        };
        let profile = AccountProfile {
            experience_level: ExperienceLevel::Advanced,
            personal_statement: self.fake_statement()?,
            bio: self.fake_bio()?,
        };
        Ok(assemble(identity, profile, persona.role))
    }

    fn generated_account(&mut self, role: Role) -> Result<Account> {
        let identity = self.next_identity()?;
        let profile = AccountProfile {
            experience_level: LEVELS[self.rng.random_range(0..LEVELS.len())],
            personal_statement: self.fake_statement()?,
            bio: self.fake_bio()?,
        };
        Ok(assemble(identity, profile, role))
    }

    /// Generate names until they satisfy the account field rules. The RNG
    /// sequence is identical across runs with the same seed, so retries do
    /// not disturb determinism.
    fn next_identity(&mut self) -> Result<AccountIdentity> {
        let sequence = self.sequence;
        self.sequence += 1;
        for _ in 0..IDENTITY_RETRIES {
            let first: String = FirstName().fake_with_rng(&mut self.rng);
            let last: String = LastName().fake_with_rng(&mut self.rng);
            let base: String = format!("{first}{last}")
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
                .to_lowercase()
                .chars()
                .take(26)
                .collect();
            let handle = format!("{base}{sequence:02}");
            let (Ok(first_name), Ok(last_name), Ok(username), Ok(email)) = (
                PersonName::new(&first),
                PersonName::new(&last),
                Username::new(&handle),
                EmailAddress::new(format!("{handle}@example.org")),
            ) else {
                continue;
            };
            return Ok(AccountIdentity {
                username,
                first_name,
                last_name,
                email,
            });
        }
        Err(eyre!(
            "could not generate a valid identity after {IDENTITY_RETRIES} attempts"
        ))
    }

    fn fake_bio(&mut self) -> Result<Bio> {
        let word: String = Word().fake_with_rng(&mut self.rng);
        Bio::new(word).map_err(|error| eyre!("generated bio rejected: {error}"))
    }

    fn fake_statement(&mut self) -> Result<PersonalStatement> {
        let word: String = Word().fake_with_rng(&mut self.rng);
        PersonalStatement::new(word).map_err(|error| eyre!("generated statement rejected: {error}"))
    }
}

/// Build an active account at its final standing. Applicants stay pending;
/// everyone else was implicitly accepted.
fn assemble(identity: AccountIdentity, profile: AccountProfile, role: Role) -> Account {
    let application_status = if role == Role::Applicant {
        ApplicationStatus::Pending
    } else {
        ApplicationStatus::Accepted
    };
    Account::from_parts(AccountParts {
        id: AccountId::random(),
        identity,
        profile,
        role,
        application_status,
        is_active: true,
    })
}
