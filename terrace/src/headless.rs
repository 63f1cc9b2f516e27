//! Headless mode for the stack browser.
//!
//! Prints the stacks of every context as plain text (or JSON) instead of
//! drawing the TUI. Suitable for scripting and automated checks.

use std::path::PathBuf;

use terrace_core::persist::PersistError;
use terrace_core::testing::sample_store;
use terrace_core::{
    ContextStacks, FactContext, FactSnapshot, FactStack, RelationSource, StackBuilder,
    StackConfig, StackSummary,
};

/// Name given to the built-in sample corpus.
const SAMPLE_CORPUS: &str = "Boiling point (sample)";

/// Options parsed from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Snapshot file to load.
    pub path: Option<PathBuf>,
    /// Use the built-in sample corpus instead of a file.
    pub demo: bool,
    /// Print stacks instead of drawing the TUI.
    pub headless: bool,
    /// Print JSON instead of text (headless only).
    pub json: bool,
    /// List every member of every stack (headless only).
    pub expand: bool,
    /// Only show this context.
    pub context: Option<FactContext>,
    /// Override the relation source.
    pub source: Option<RelationSource>,
    /// Show usage and exit.
    pub help: bool,
}

impl CliArgs {
    /// Apply command line overrides to a config read from the environment.
    pub fn apply(&self, mut config: StackConfig) -> StackConfig {
        if let Some(source) = self.source {
            config = config.with_relation_source(source);
        }
        if let Some(context) = self.context {
            config = config.with_context(context);
        }
        config
    }
}

/// Parse command line arguments (the first element is the program name).
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => parsed.help = true,
            "--headless" => parsed.headless = true,
            "--demo" => parsed.demo = true,
            "--json" => parsed.json = true,
            "--expand" => parsed.expand = true,
            "--context" => {
                let value = args.get(i + 1).ok_or("--context needs a value")?;
                parsed.context = Some(value.parse().map_err(|e| format!("{e}"))?);
                i += 1;
            }
            "--source" => {
                let value = args.get(i + 1).ok_or("--source needs a value")?;
                parsed.source = Some(value.parse().map_err(|e| format!("{e}"))?);
                i += 1;
            }
            flag if flag.starts_with('-') => return Err(format!("Unknown option: {flag}")),
            path => {
                if parsed.path.is_some() {
                    return Err(format!("Unexpected argument: {path}"));
                }
                parsed.path = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    if !parsed.help && !parsed.demo && parsed.path.is_none() {
        return Err("No snapshot file given (use --demo for the sample corpus)".to_string());
    }

    Ok(parsed)
}

/// Load the snapshot named on the command line, or the sample corpus.
pub async fn load_snapshot(args: &CliArgs) -> Result<FactSnapshot, PersistError> {
    match (&args.path, args.demo) {
        (Some(path), false) => FactSnapshot::load_json(path).await,
        _ => Ok(FactSnapshot::from_store(SAMPLE_CORPUS, &sample_store())),
    }
}

/// Run in headless mode: print the stacks and exit.
pub async fn run_headless(args: CliArgs, config: StackConfig) -> Result<(), PersistError> {
    let snapshot = load_snapshot(&args).await?;
    let builder = StackBuilder::new(config);
    let regions = builder.compute_regions(&snapshot.facts);

    tracing::info!(
        facts = snapshot.facts.len(),
        regions = regions.len(),
        source = %builder.relation_source(),
        "computed stacks"
    );

    if args.json {
        let output = render_json(&snapshot.metadata.corpus_name, &builder, &regions);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!(
            "{}",
            render_text(&snapshot.metadata.corpus_name, &builder, &regions, args.expand)
        );
    }

    Ok(())
}

/// Format regions as indented text.
pub fn render_text(
    corpus_name: &str,
    builder: &StackBuilder,
    regions: &[ContextStacks],
    expand: bool,
) -> String {
    let mut out = String::new();
    let corpus = if corpus_name.is_empty() {
        "untitled corpus"
    } else {
        corpus_name
    };
    out.push_str(&format!(
        "=== Terrace: {corpus} (source: {}) ===\n",
        builder.relation_source()
    ));

    if regions.is_empty() {
        out.push_str("\nNo facts.\n");
    }

    for region in regions {
        let facts: usize = region.stacks.iter().map(|s| s.members().len()).sum();
        out.push_str(&format!(
            "\n--- {}: {} stacks, {} facts ---\n",
            region.context.title(),
            region.stacks.len(),
            facts
        ));
        for stack in &region.stacks {
            out.push_str(&stack_line(stack));
            if expand {
                let last = stack.related_count();
                for (i, member) in stack.related().iter().enumerate() {
                    let branch = if i + 1 == last { "└─" } else { "├─" };
                    out.push_str(&format!("    {branch} {}\n", fact_label(member)));
                }
            }
        }
    }

    out
}

/// Format regions as a JSON value.
pub fn render_json(
    corpus_name: &str,
    builder: &StackBuilder,
    regions: &[ContextStacks],
) -> serde_json::Value {
    let regions: Vec<serde_json::Value> = regions
        .iter()
        .map(|region| {
            let stacks: Vec<StackSummary> = region.stacks.iter().map(FactStack::summary).collect();
            serde_json::json!({
                "context": region.context,
                "stacks": stacks,
            })
        })
        .collect();

    serde_json::json!({
        "corpus": corpus_name,
        "relationSource": builder.relation_source(),
        "regions": regions,
    })
}

fn stack_line(stack: &FactStack) -> String {
    let primary = fact_label(stack.primary());
    if stack.is_single() {
        format!("[ ] {primary}\n")
    } else {
        format!("[=] {primary}  (+{})\n", stack.related_count())
    }
}

fn fact_label(fact: &terrace_core::Fact) -> String {
    match fact.statement.as_deref() {
        Some(statement) if !statement.is_empty() => format!("{statement} <{}>", fact.id),
        _ => format!("<{}>", fact.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("terrace")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_headless_args() {
        let parsed = parse_args(&args(&[
            "--headless",
            "facts.json",
            "--context",
            "builder",
            "--source",
            "support-pair",
            "--json",
        ]))
        .unwrap();

        assert!(parsed.headless && parsed.json);
        assert_eq!(parsed.path, Some(PathBuf::from("facts.json")));
        assert_eq!(parsed.context, Some(FactContext::Builder));
        assert_eq!(parsed.source, Some(RelationSource::SupportPair));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["--context"])).is_err());
        assert!(parse_args(&args(&["--demo", "--context", "chat"])).is_err());
        assert!(parse_args(&args(&["--demo", "--verbose"])).is_err());
        assert!(parse_args(&args(&["a.json", "b.json"])).is_err());
        assert!(parse_args(&args(&["--help"])).unwrap().help);
    }

    #[test]
    fn test_cli_overrides_config() {
        let parsed = parse_args(&args(&["--demo", "--source", "linked"])).unwrap();
        let config = parsed.apply(StackConfig::new().with_context(FactContext::Global));

        assert_eq!(config.relation_source, RelationSource::Linked);
        assert_eq!(config.context, Some(FactContext::Global));
    }

    #[test]
    fn test_render_text_sample() {
        let snapshot = FactSnapshot::from_store(SAMPLE_CORPUS, &sample_store());
        let builder = StackBuilder::new(StackConfig::new().with_context(FactContext::Knowledge));
        let regions = builder.compute_regions(&snapshot.facts);

        let text = render_text(SAMPLE_CORPUS, &builder, &regions, true);
        assert!(text.contains("--- Knowledge: 3 stacks, 5 facts ---"));
        assert!(text.contains("(+2)"));
        assert!(text.contains("└─ Salt raises the boiling point <k-salt>"));
        assert!(!text.contains("Builder"));
    }

    #[test]
    fn test_render_json_sample() {
        let snapshot = FactSnapshot::from_store(SAMPLE_CORPUS, &sample_store());
        let builder = StackBuilder::default();
        let regions = builder.compute_regions(&snapshot.facts);

        let json = render_json(SAMPLE_CORPUS, &builder, &regions);
        assert_eq!(json["relationSource"], "combined");
        assert_eq!(json["regions"][1]["stacks"][0]["relatedCount"], 1);
        assert_eq!(json["regions"][2]["context"], "knowledge");
        assert_eq!(json["regions"][2]["stacks"][0]["relatedCount"], 2);
    }

    #[tokio::test]
    async fn test_demo_snapshot_loads() {
        let parsed = parse_args(&args(&["--demo"])).unwrap();
        let snapshot = load_snapshot(&parsed).await.unwrap();
        assert_eq!(snapshot.metadata.corpus_name, SAMPLE_CORPUS);
        assert_eq!(snapshot.facts.len(), 8);
    }
}
