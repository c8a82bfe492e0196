//! URL Switch CLI
//!
//! CLI tool for testing rule files against URLs and deriving reverse rules.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use us_core::defaults::{default_rule_groups, default_settings};
use us_core::domain::simple_rule;
use us_core::edit::add_reverse_rule;
use us_core::io::normalize_groups;
use us_core::validate::validate_groups;
use us_core::{classify, invert_rule, plan_redirect, RuleKind, RuleMatch, Selector, Settings};

mod rules_file;

use rules_file::{read_rule_groups, write_rule_groups};

#[derive(Parser)]
#[command(name = "us-cli")]
#[command(about = "URL Switch rule tools")]
struct Cli {
    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the rules that apply to a URL
    Match {
        /// Rule file (JSON array of rule groups)
        #[arg(short, long)]
        rules: PathBuf,

        /// URL to test
        #[arg(short, long)]
        url: String,

        /// List every match instead of the first
        #[arg(short, long)]
        all: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show what the extension would do on a URL
    Plan {
        #[arg(short, long)]
        rules: PathBuf,

        #[arg(short, long)]
        url: String,

        /// Navigate automatically instead of offering the switch
        #[arg(long)]
        auto_redirect: bool,

        /// Delay before automatic navigation, in milliseconds
        #[arg(long)]
        delay: Option<u64>,

        /// Treat the extension as switched off
        #[arg(long)]
        disabled: bool,
    },

    /// Derive the reverse of a rule
    Reverse {
        #[arg(short, long)]
        rules: PathBuf,

        /// Id of the rule to reverse
        #[arg(long)]
        rule: String,

        /// Append the reverse rule to the owning group and rewrite the file
        #[arg(long)]
        apply: bool,
    },

    /// Classify a pattern pair as simple-domain or advanced
    Classify {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },

    /// Print a simple-domain rule for two domains
    Simple {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(short, long, default_value_t = 1)]
        priority: u32,
    },

    /// Check a rule file for problems
    Validate {
        #[arg(short, long)]
        rules: PathBuf,
    },

    /// Drop invalid and duplicate rules
    Normalize {
        #[arg(short, long)]
        rules: PathBuf,

        /// Output file (defaults to rewriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the default rule groups
    Init {
        #[arg(short, long, default_value = "rules.json")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Match { rules, url, all, json } => cmd_match(&rules, &url, all, json),
        Commands::Plan {
            rules,
            url,
            auto_redirect,
            delay,
            disabled,
        } => cmd_plan(&rules, &url, auto_redirect, delay, disabled),
        Commands::Reverse { rules, rule, apply } => cmd_reverse(&rules, &rule, apply),
        Commands::Classify { from, to } => cmd_classify(&from, &to),
        Commands::Simple { from, to, priority } => cmd_simple(&from, &to, priority),
        Commands::Validate { rules } => cmd_validate(&rules),
        Commands::Normalize { rules, output } => {
            cmd_normalize(&rules, output.as_ref().unwrap_or(&rules))
        }
        Commands::Init { output } => cmd_init(&output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize output: {}", e))
}

fn print_match(m: &RuleMatch) {
    println!("  [{}] {} (priority {})", m.rule.id, m.rule.name, m.rule.priority);
    println!("      -> {}", m.target_url);
}

fn cmd_match(rules: &Path, url: &str, all: bool, json: bool) -> Result<(), String> {
    let groups = read_rule_groups(rules)?;
    let selector = Selector::new(&groups);
    log::debug!("{} rules take part in matching", selector.len());

    let matches = if all {
        selector.all_matches(url)
    } else {
        selector.first_match(url).into_iter().collect()
    };

    if json {
        println!("{}", to_json(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No rule matches '{}'", url);
        return Ok(());
    }

    println!("Matches for '{}':", url);
    for m in &matches {
        print_match(m);
    }
    Ok(())
}

fn cmd_plan(
    rules: &Path,
    url: &str,
    auto_redirect: bool,
    delay: Option<u64>,
    disabled: bool,
) -> Result<(), String> {
    let groups = read_rule_groups(rules)?;
    let defaults = default_settings();
    let settings = Settings {
        enabled: !disabled,
        auto_redirect,
        redirect_delay: delay.unwrap_or(defaults.redirect_delay),
    };

    println!("{}", to_json(&plan_redirect(url, &groups, &settings))?);
    Ok(())
}

fn cmd_reverse(rules: &Path, rule_id: &str, apply: bool) -> Result<(), String> {
    let groups = read_rule_groups(rules)?;
    let (group, rule) = groups
        .iter()
        .find_map(|group| group.find_rule(rule_id).map(|rule| (group, rule)))
        .ok_or_else(|| format!("No rule with id '{}' in '{}'", rule_id, rules.display()))?;

    if let RuleKind::Advanced = classify(&rule.from_pattern, &rule.to_pattern) {
        log::warn!("'{}' is an advanced rule; review the reverse before using it", rule.name);
    }

    println!("{}", to_json(&invert_rule(rule))?);

    if apply {
        let updated = add_reverse_rule(&groups, &group.id, rule_id);
        write_rule_groups(rules, &updated)?;
        println!("Added reverse rule to group '{}' in '{}'", group.name, rules.display());
    }
    Ok(())
}

fn cmd_classify(from: &str, to: &str) -> Result<(), String> {
    match classify(from, to) {
        RuleKind::SimpleDomain { from_domain, to_domain } => {
            println!("simple-domain: {} -> {}", from_domain, to_domain);
        }
        RuleKind::Advanced => println!("advanced"),
    }
    Ok(())
}

fn cmd_simple(from: &str, to: &str, priority: u32) -> Result<(), String> {
    let draft = simple_rule(from, to, priority).map_err(|e| e.to_string())?;
    println!("{}", to_json(&draft)?);
    Ok(())
}

fn cmd_validate(rules: &Path) -> Result<(), String> {
    let groups = read_rule_groups(rules)?;
    let issues = validate_groups(&groups);
    let rule_count: usize = groups.iter().map(|group| group.rules.len()).sum();

    if issues.is_empty() {
        println!("'{}' is valid", rules.display());
        println!("  Groups:  {}", groups.len());
        println!("  Rules:   {}", rule_count);
        return Ok(());
    }

    for issue in &issues {
        println!("  {}", issue);
    }
    Err(format!("{} issue(s) found in '{}'", issues.len(), rules.display()))
}

fn cmd_normalize(rules: &Path, output: &Path) -> Result<(), String> {
    let mut groups = read_rule_groups(rules)?;
    let stats = normalize_groups(&mut groups);
    write_rule_groups(output, &groups)?;

    println!("Normalized '{}' to '{}'", rules.display(), output.display());
    println!(
        "  Rules:   {} -> {} (invalid {}, duplicates {})",
        stats.before, stats.after, stats.invalid, stats.deduped
    );
    Ok(())
}

fn cmd_init(output: &Path) -> Result<(), String> {
    if output.exists() {
        return Err(format!("'{}' already exists", output.display()));
    }
    write_rule_groups(output, &default_rule_groups())?;
    println!("Wrote default rule groups to '{}'", output.display());
    Ok(())
}
