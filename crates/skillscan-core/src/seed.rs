use crate::storage::Storage;
use crate::Result;

/// Starter dictionary installed on first run. Administrators curate from
/// here; seeding is skipped entirely once any skill exists.
const DEFAULT_SKILLS: &[(&str, Option<&str>)] = &[
    ("C#", None),
    (".NET", Some("dotnet, dot net")),
    ("ASP.NET Core", Some("aspnet, asp.net")),
    ("SQL", None),
    ("MS SQL Server", Some("mssql, sql server")),
    ("EF Core", None),
    ("React", None),
    ("TypeScript", None),
    ("Docker", None),
    ("Azure", None),
];

/// Seeds the default skill dictionary if the skills table is empty.
/// Returns how many skills were inserted (zero when already seeded).
pub async fn seed_default_skills(storage: &Storage) -> Result<usize> {
    if storage.has_skills().await? {
        return Ok(0);
    }

    for (name, aliases) in DEFAULT_SKILLS {
        storage.create_skill(name, *aliases).await?;
    }

    tracing::info!(count = DEFAULT_SKILLS.len(), "seeded default skill dictionary");
    Ok(DEFAULT_SKILLS.len())
}
