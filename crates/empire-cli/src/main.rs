//! Empire CLI - Twin progression from the terminal
//!
//! Thin client over the Empire HTTP API.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Input;
use std::fs;
use tracing_subscriber::EnvFilter;

use api::{CreateTwinRequest, EmpireClient, LevelingPolicy};
use config::{Config, Profile};

#[derive(Parser)]
#[command(name = "empire")]
#[command(about = "Empire CLI - Twin progression from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Log HTTP calls (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Twin selection shared by most commands
#[derive(clap::Args)]
struct TwinArgs {
    /// Twin ID (overrides profile)
    #[arg(long = "twin")]
    twin_id: Option<String>,
    /// Profile to use
    #[arg(short, long)]
    profile: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the API is reachable
    Health,

    /// Manage profiles (twin shortcuts)
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Twin registry
    Twin {
        #[command(subcommand)]
        action: TwinAction,
    },

    /// Daily quests
    Quest {
        #[command(subcommand)]
        action: QuestAction,
    },

    /// Memory shards
    Shard {
        #[command(subcommand)]
        action: ShardAction,
    },

    /// Grant XP through one of the leveling policies
    Xp {
        /// XP to grant
        amount: i32,
        /// Leveling handler
        #[arg(long, value_enum, default_value = "stats")]
        policy: LevelingPolicy,
        /// Source label recorded with the grant
        #[arg(long, default_value = "cli")]
        source: String,
        #[command(flatten)]
        twin: TwinArgs,
    },

    /// Twin-to-twin affinity
    Relation {
        #[command(subcommand)]
        action: RelationAction,
    },

    /// Seasonal events
    Season {
        #[command(subcommand)]
        action: SeasonAction,
    },

    /// Try to unlock a portal (Moonwell, Shadowgate, Dreamspire, Starforge)
    Portal {
        portal: String,
        /// User ID (overrides profile)
        #[arg(long = "user")]
        user_id: Option<String>,
        /// Profile to use
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Lore fragments
    Lore {
        #[command(subcommand)]
        action: LoreAction,
    },

    /// Imprint a memory on a twin
    Imprint {
        /// Memory content (or use -f for file)
        content: Option<String>,
        /// Read content from file
        #[arg(short, long)]
        file: Option<String>,
        #[command(flatten)]
        twin: TwinArgs,
    },

    /// Rewrite a twin's personality from its latest memories
    Train {
        #[command(flatten)]
        twin: TwinArgs,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Add a new profile
    Add {
        /// Profile name (e.g., "nova")
        name: String,
        /// Twin ID
        #[arg(long)]
        twin_id: String,
        /// Owner user ID, used for portals
        #[arg(long)]
        user_id: Option<String>,
    },
    /// List all profiles
    List,
    /// Set default profile
    Set { name: String },
    /// Remove a profile
    Remove { name: String },
}

#[derive(Subcommand)]
enum TwinAction {
    /// Create a twin for a user
    Create {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        username: String,
        /// radiant | shadow | neutral
        #[arg(long, default_value = "neutral")]
        alignment: String,
        #[arg(long, default_value = "calm")]
        tone: String,
        #[arg(long, default_value = "")]
        personality: String,
        /// Save as a profile under this name
        #[arg(long)]
        save_as: Option<String>,
    },
    /// Show a twin
    Show {
        #[command(flatten)]
        twin: TwinArgs,
    },
    /// Show attribute stats
    Stats {
        #[command(flatten)]
        twin: TwinArgs,
    },
    /// Set visibility (public, followers, private)
    Visibility {
        visibility: String,
        #[command(flatten)]
        twin: TwinArgs,
    },
}

#[derive(Subcommand)]
enum QuestAction {
    /// Assign today's quests
    Assign {
        #[command(flatten)]
        twin: TwinArgs,
    },
    /// List unexpired quests
    List {
        #[command(flatten)]
        twin: TwinArgs,
    },
    /// Complete a quest and collect its XP
    Complete { quest_id: String },
}

#[derive(Subcommand)]
enum ShardAction {
    /// Evolve all shards after an activity
    Evolve {
        /// Activity context (lore, quest, reflection, ...)
        #[arg(short, long, default_value = "")]
        context: String,
        #[command(flatten)]
        twin: TwinArgs,
    },
    /// List shards
    List {
        #[command(flatten)]
        twin: TwinArgs,
    },
}

#[derive(Subcommand)]
enum RelationAction {
    /// Score and store the relation towards another twin
    Compute {
        /// Target twin ID
        target: String,
        #[command(flatten)]
        twin: TwinArgs,
    },
    /// List outgoing relations
    List {
        #[command(flatten)]
        twin: TwinArgs,
    },
}

#[derive(Subcommand)]
enum SeasonAction {
    /// Run the rotation check now
    Rotate,
    /// Show the active event
    Current,
}

#[derive(Subcommand)]
enum LoreAction {
    /// Generate a lore fragment for a level
    Generate {
        /// Level the fragment celebrates (defaults to the twin's level)
        #[arg(long)]
        level: Option<i32>,
        #[command(flatten)]
        twin: TwinArgs,
    },
    /// List lore fragments
    List {
        #[command(flatten)]
        twin: TwinArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("empire=debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let mut config = Config::load()?;
    let client = EmpireClient::new(&config.base_url);

    match cli.command {
        Commands::Health => cmd_health(&client, &config).await,
        Commands::Profile { action } => cmd_profile(&mut config, action),
        Commands::Twin { action } => cmd_twin(&client, &mut config, action).await,
        Commands::Quest { action } => cmd_quest(&client, &config, action).await,
        Commands::Shard { action } => cmd_shard(&client, &config, action).await,
        Commands::Xp {
            amount,
            policy,
            source,
            twin,
        } => cmd_xp(&client, &config, amount, policy, &source, twin).await,
        Commands::Relation { action } => cmd_relation(&client, &config, action).await,
        Commands::Season { action } => cmd_season(&client, action).await,
        Commands::Portal {
            portal,
            user_id,
            profile,
        } => {
            let user_id = config.resolve_user_id(user_id.as_deref(), profile.as_deref())?;
            cmd_portal(&client, &user_id, &portal).await
        }
        Commands::Lore { action } => cmd_lore(&client, &config, action).await,
        Commands::Imprint {
            content,
            file,
            twin,
        } => cmd_imprint(&client, &config, content, file, twin).await,
        Commands::Train { twin } => cmd_train(&client, &config, twin).await,
        Commands::Config => cmd_config(&config),
    }
}

fn twin_id(config: &Config, args: &TwinArgs) -> Result<String> {
    config.resolve_twin_id(args.twin_id.as_deref(), args.profile.as_deref())
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_health(client: &EmpireClient, config: &Config) -> Result<()> {
    print!("Checking {}... ", config.base_url);
    match client.health().await {
        Ok(true) => {
            println!("{}", "OK".green());
            Ok(())
        }
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not reach the Empire API at {}", config.base_url);
        }
    }
}

fn cmd_profile(config: &mut Config, action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::Add {
            name,
            twin_id,
            user_id,
        } => {
            config.add_profile(
                name.clone(),
                Profile {
                    twin_id,
                    user_id,
                    name: None,
                },
            );
            config.save()?;
            println!("{} Profile '{}' added", "✓".green(), name);
        }

        ProfileAction::List => {
            if config.profiles.is_empty() {
                println!("No profiles configured.");
                println!("\n{}", "Add one with:".dimmed());
                println!("  empire profile add <name> --twin-id <TWIN_ID>");
                return Ok(());
            }

            println!("{}", "Profiles:".bold());
            for (name, profile) in &config.profiles {
                let is_default = config.default_profile.as_ref() == Some(name);
                let default_marker = if is_default {
                    " (default)".green().to_string()
                } else {
                    String::new()
                };
                println!(
                    "  {} {} {}{}",
                    name.cyan(),
                    profile.name.as_deref().unwrap_or("-").dimmed(),
                    short_id(&profile.twin_id),
                    default_marker
                );
            }
        }

        ProfileAction::Set { name } => {
            if config.set_default_profile(name.clone()) {
                config.save()?;
                println!("{} Default profile set to '{}'", "✓".green(), name);
            } else {
                bail!("Profile '{}' not found", name);
            }
        }

        ProfileAction::Remove { name } => {
            if config.remove_profile(&name) {
                config.save()?;
                println!("{} Profile '{}' removed", "✓".green(), name);
            } else {
                bail!("Profile '{}' not found", name);
            }
        }
    }

    Ok(())
}

async fn cmd_twin(client: &EmpireClient, config: &mut Config, action: TwinAction) -> Result<()> {
    match action {
        TwinAction::Create {
            user_id,
            username,
            alignment,
            tone,
            personality,
            save_as,
        } => {
            let twin = client
                .create_twin(&CreateTwinRequest {
                    user_id: &user_id,
                    username: &username,
                    alignment: &alignment,
                    tone: &tone,
                    personality: &personality,
                })
                .await?;

            println!(
                "{} Twin {} created ({})",
                "✓".green(),
                twin.username.cyan().bold(),
                twin.id.to_string().dimmed()
            );

            if let Some(name) = save_as {
                config.add_profile(
                    name.clone(),
                    Profile {
                        twin_id: twin.id.to_string(),
                        user_id: Some(twin.user_id.to_string()),
                        name: Some(twin.username.clone()),
                    },
                );
                if config.default_profile.is_none() {
                    config.set_default_profile(name.clone());
                }
                config.save()?;
                println!("{} Saved as profile '{}'", "✓".green(), name);
            }
        }

        TwinAction::Show { twin } => {
            let twin = client.get_twin(&twin_id(config, &twin)?).await?;
            println!(
                "{} {} [{} / {}] {}",
                twin.username.cyan().bold(),
                format!("Lv {} ({} xp)", twin.level, twin.xp).green(),
                twin.alignment,
                twin.tone,
                twin.visibility.dimmed()
            );
            if !twin.traits.is_empty() {
                println!("  Traits: {}", twin.traits.join(", "));
            }
            if !twin.personality.is_empty() {
                println!("  {}", twin.personality.dimmed());
            }
        }

        TwinAction::Stats { twin } => {
            let stats = client.get_stats(&twin_id(config, &twin)?).await?;
            println!("{} Lv {} ({} xp)", "Stats:".bold(), stats.level, stats.xp);
            for (name, value) in [
                ("wisdom", stats.wisdom),
                ("chaos", stats.chaos),
                ("clarity", stats.clarity),
                ("shadow", stats.shadow),
                ("harmony", stats.harmony),
            ] {
                println!("  {:<8} {}", name, value.to_string().cyan());
            }
        }

        TwinAction::Visibility { visibility, twin } => {
            let twin = client
                .set_visibility(&twin_id(config, &twin)?, &visibility)
                .await?;
            println!(
                "{} {} is now {}",
                "✓".green(),
                twin.username.cyan(),
                twin.visibility
            );
        }
    }

    Ok(())
}

async fn cmd_quest(client: &EmpireClient, config: &Config, action: QuestAction) -> Result<()> {
    match action {
        QuestAction::Assign { twin } => {
            let resp = client.assign_quests(&twin_id(config, &twin)?).await?;
            if resp.assigned {
                println!("{} {} new quests", "✓".green(), resp.quests.len());
            } else {
                println!("{}", "Quests already assigned for today".yellow());
            }
            print_quests(&resp.quests);
        }

        QuestAction::List { twin } => {
            let quests = client.list_quests(&twin_id(config, &twin)?).await?;
            if quests.is_empty() {
                println!("No active quests.");
            }
            print_quests(&quests);
        }

        QuestAction::Complete { quest_id } => {
            let resp = client.complete_quest(&quest_id).await?;
            println!(
                "{} {} (+{} xp)",
                "✓".green(),
                resp.quest.quest_text,
                resp.xp_pending.to_string().green()
            );
        }
    }

    Ok(())
}

fn print_quests(quests: &[api::QuestResponse]) {
    for quest in quests {
        let mark = if quest.completed {
            "✓".green()
        } else {
            "·".normal()
        };
        println!(
            "  {} {} {} {}",
            mark,
            quest.quest_text,
            format!("+{}xp", quest.xp_reward).green(),
            quest.id.to_string().dimmed()
        );
    }
}

async fn cmd_shard(client: &EmpireClient, config: &Config, action: ShardAction) -> Result<()> {
    match action {
        ShardAction::Evolve { context, twin } => {
            let resp = client
                .evolve_shards(&twin_id(config, &twin)?, &context)
                .await?;
            println!(
                "{} +{} xp to {} shards, {} promoted",
                "✓".green(),
                resp.xp_gained,
                resp.shards.len(),
                resp.promoted
            );
            if let Some(shard) = resp.new_shard {
                println!("  New shard: {} [{}]", shard.value.cyan(), shard.rarity);
            }
        }

        ShardAction::List { twin } => {
            let shards = client.list_shards(&twin_id(config, &twin)?).await?;
            if shards.is_empty() {
                println!("No shards yet.");
            }
            for shard in shards {
                println!(
                    "  {} {} {} {}",
                    format!("[{}]", shard.rarity).yellow(),
                    shard.value,
                    format!("{}xp", shard.xp).dimmed(),
                    shard.shard_type.dimmed()
                );
            }
        }
    }

    Ok(())
}

async fn cmd_xp(
    client: &EmpireClient,
    config: &Config,
    amount: i32,
    policy: LevelingPolicy,
    source: &str,
    twin: TwinArgs,
) -> Result<()> {
    let resp = client
        .grant_xp(policy, &twin_id(config, &twin)?, amount, source)
        .await?;

    if resp.leveled_up {
        println!(
            "{} Level {} → {} ({} xp)",
            "⬆".green(),
            resp.previous_level,
            resp.level.to_string().green().bold(),
            resp.xp
        );
    } else {
        println!("{} Level {} ({} xp)", "✓".green(), resp.level, resp.xp);
    }
    if !resp.new_traits.is_empty() {
        println!("  New traits: {}", resp.new_traits.join(", ").cyan());
    }
    if !resp.attributes_raised.is_empty() {
        println!("  Raised: {}", resp.attributes_raised.join(", ").cyan());
    }
    if let Some(shard) = resp.new_shard {
        println!("  New shard: {} [{}]", shard.value.cyan(), shard.rarity);
    }
    if let Some(personality) = resp.personality {
        println!("  {}", personality.dimmed());
    }

    Ok(())
}

async fn cmd_relation(
    client: &EmpireClient,
    config: &Config,
    action: RelationAction,
) -> Result<()> {
    match action {
        RelationAction::Compute { target, twin } => {
            let resp = client
                .compute_relation(&twin_id(config, &twin)?, &target)
                .await?;
            println!(
                "{} {} ({}) towards {}",
                "✓".green(),
                resp.relation.relation_type.cyan().bold(),
                resp.relation.strength,
                resp.relation.target_twin_id.to_string().dimmed()
            );
            println!(
                "  alignment {:.0} + tone {:.0} + traits {:.0} = {:.0}",
                resp.score.alignment_score,
                resp.score.tone_score,
                resp.score.trait_score,
                resp.score.total_score
            );
        }

        RelationAction::List { twin } => {
            let relations = client.list_relations(&twin_id(config, &twin)?).await?;
            if relations.is_empty() {
                println!("No relations yet.");
            }
            for relation in relations {
                println!(
                    "  {} {} {}",
                    relation.relation_type.cyan(),
                    relation.strength,
                    relation.target_twin_id.to_string().dimmed()
                );
            }
        }
    }

    Ok(())
}

async fn cmd_season(client: &EmpireClient, action: SeasonAction) -> Result<()> {
    match action {
        SeasonAction::Rotate => {
            let resp = client.rotate_season().await?;
            if let Some(ended) = resp.ended_event {
                println!("  {} has ended", ended.name.dimmed());
            }
            if resp.rotated {
                println!(
                    "{} {} begins, {} shards granted",
                    "✓".green(),
                    resp.event.name.cyan().bold(),
                    resp.shards_granted
                );
            } else {
                println!(
                    "{} still running until {}",
                    resp.event.name.cyan(),
                    resp.event.end_date
                );
            }
        }

        SeasonAction::Current => match client.current_season().await? {
            Some(event) => println!(
                "{} {} → {}{}",
                event.name.cyan().bold(),
                event.start_date,
                event.end_date,
                if event.is_active { "" } else { " (inactive)" }
            ),
            None => println!("No active season."),
        },
    }

    Ok(())
}

async fn cmd_portal(client: &EmpireClient, user_id: &str, portal: &str) -> Result<()> {
    let resp = client.unlock_portal(user_id, portal).await?;
    if resp.success {
        println!("{} {} unlocked", "✓".green(), resp.portal.cyan().bold());
    } else {
        println!(
            "{} {}: {}",
            "✗".red(),
            resp.portal,
            resp.reason.as_deref().unwrap_or("denied")
        );
    }
    Ok(())
}

async fn cmd_lore(client: &EmpireClient, config: &Config, action: LoreAction) -> Result<()> {
    match action {
        LoreAction::Generate { level, twin } => {
            let id = twin_id(config, &twin)?;
            let level = match level {
                Some(level) => level,
                None => client.get_twin(&id).await?.level,
            };
            let entry = client.generate_lore(&id, level).await?;
            println!("{} {}", format!("Lv {}", entry.level).green(), entry.entry);
        }

        LoreAction::List { twin } => {
            let entries = client.list_lore(&twin_id(config, &twin)?).await?;
            if entries.is_empty() {
                println!("No lore yet.");
            }
            for entry in entries {
                println!("  {} {}", format!("Lv {}", entry.level).green(), entry.entry);
            }
        }
    }

    Ok(())
}

async fn cmd_imprint(
    client: &EmpireClient,
    config: &Config,
    content: Option<String>,
    file: Option<String>,
    twin: TwinArgs,
) -> Result<()> {
    let id = twin_id(config, &twin)?;

    let memory = match (content, file) {
        (Some(c), None) => c,
        (None, Some(f)) => {
            fs::read_to_string(&f).with_context(|| format!("Failed to read file: {}", f))?
        }
        (Some(_), Some(_)) => bail!("Cannot specify both content and --file"),
        (None, None) => Input::new()
            .with_prompt("Memory")
            .interact_text()
            .context("Failed to read input")?,
    };

    let resp = client.imprint(&id, &memory).await?;
    println!(
        "{} Memory imprinted (+{} xp)",
        "✓".green(),
        resp.xp_pending
    );
    println!("  {}", truncate_string(&memory, 80).dimmed());

    Ok(())
}

async fn cmd_train(client: &EmpireClient, config: &Config, twin: TwinArgs) -> Result<()> {
    let resp = client.train(&twin_id(config, &twin)?).await?;
    println!(
        "{} {} retrained (+{} xp)",
        "✓".green(),
        resp.twin.username.cyan(),
        resp.xp_pending
    );
    println!("  {}", resp.twin.personality.dimmed());
    Ok(())
}

fn cmd_config(config: &Config) -> Result<()> {
    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!(
        "  Default Profile: {}",
        config.default_profile.as_deref().unwrap_or("None").cyan()
    );
    println!("  Profiles: {}", config.profiles.len());

    Ok(())
}

/// First 8 chars of an ID
fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_xp_defaults_to_stats_policy() {
        let cli = Cli::parse_from(["empire", "xp", "120", "--twin", "abc"]);
        match cli.command {
            Commands::Xp {
                amount,
                policy,
                source,
                twin,
            } => {
                assert_eq!(amount, 120);
                assert_eq!(policy, LevelingPolicy::Stats);
                assert_eq!(source, "cli");
                assert_eq!(twin.twin_id.as_deref(), Some("abc"));
            }
            _ => panic!("expected xp command"),
        }
    }

    #[test]
    fn test_truncate_is_char_based() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("ミラーツイン", 3), "ミラー...");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("5f0c4f3e-2b8a"), "5f0c4f3e");
        assert_eq!(short_id("abc"), "abc");
    }
}
