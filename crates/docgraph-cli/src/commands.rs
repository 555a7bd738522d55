use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context as _;
use colored::Colorize;
use docgraph_content::{
    hash_groups, render_groups, Content, ContentGroup, ContentGroups, CONTENT_GROUP_LABEL,
};
use docgraph_core::{Document, DocumentContent, DocumentGraph};
use docgraph_store::InMemoryDocumentTable;
use docgraph_types::TimePoint;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::cli::*;
use crate::config::CliConfig;

/// Content file shapes: a group list, a single group, or a single content.
#[derive(Deserialize)]
#[serde(untagged)]
enum ContentFile {
    Groups(ContentGroups),
    Group(ContentGroup),
    Item(Content),
}

impl From<ContentFile> for DocumentContent {
    fn from(file: ContentFile) -> Self {
        match file {
            ContentFile::Groups(groups) => Self::Groups(groups),
            ContentFile::Group(group) => Self::Group(group),
            ContentFile::Item(content) => Self::Item(content),
        }
    }
}

struct Context {
    config: CliConfig,
    format: OutputFormat,
}

type Graph = DocumentGraph<InMemoryDocumentTable>;

impl Context {
    fn open_graph(&self) -> anyhow::Result<Graph> {
        let path = &self.config.store_path;
        let table = InMemoryDocumentTable::load(path)
            .with_context(|| format!("loading store {}", path.display()))?;
        Ok(DocumentGraph::with_config(table, self.config.graph.clone()))
    }

    fn save(&self, graph: &Graph) -> anyhow::Result<()> {
        let path = &self.config.store_path;
        graph
            .table()
            .save(path)
            .with_context(|| format!("saving store {}", path.display()))
    }

    fn print_json(&self, value: &impl serde::Serialize) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn print_document(&self, status: &str, doc: &Document) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return self.print_json(doc);
        }
        let id = doc.id().map_or_else(|| "-".to_string(), |id| id.to_string());
        println!("{} {} document {}", "✓".green().bold(), status, id.bold());
        println!("  hash:    {}", doc.hash().to_hex().yellow());
        println!("  creator: {}", doc.creator().to_string().cyan());
        if let Some(created) = doc.created_date() {
            println!("  created: {created}");
        }
        for (i, group) in doc.content_groups().iter().enumerate() {
            println!("  [{}]", group_title(i, group).bold());
            for content in group {
                println!("    {content}");
            }
        }
        Ok(())
    }
}

fn group_title(index: usize, group: &ContentGroup) -> String {
    group
        .iter()
        .find(|c| c.label == CONTENT_GROUP_LABEL)
        .and_then(|c| c.value.as_str().ok())
        .map_or_else(|| format!("group {index}"), str::to_string)
}

fn read_content(path: &Path) -> anyhow::Result<DocumentContent> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("reading content from stdin")?;
        text
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };
    let file: ContentFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing content groups from {}", path.display()))?;
    Ok(file.into())
}

pub fn run_command(cli: Cli, config: CliConfig) -> anyhow::Result<()> {
    let ctx = Context {
        config,
        format: cli.format,
    };
    match cli.command {
        Command::Create(args) => cmd_create(&ctx, args),
        Command::GetOrCreate(args) => cmd_get_or_create(&ctx, args),
        Command::Get(args) => cmd_get(&ctx, args),
        Command::List(args) => cmd_list(&ctx, args),
        Command::Verify => cmd_verify(&ctx),
        Command::Hash(args) => cmd_hash(&ctx, args),
        Command::Config => cmd_config(&ctx),
    }
}

fn cmd_create(ctx: &Context, args: ContentArgs) -> anyhow::Result<()> {
    let content = read_content(&args.file)?;
    let graph = ctx.open_graph()?;
    let doc = graph.create_document(args.creator, content)?;
    ctx.save(&graph)?;
    ctx.print_document("created", &doc)
}

fn cmd_get_or_create(ctx: &Context, args: ContentArgs) -> anyhow::Result<()> {
    let content = read_content(&args.file)?;
    let graph = ctx.open_graph()?;
    let before = graph.len()?;
    let doc = graph.get_or_create(args.creator, content)?;
    if graph.len()? == before {
        debug!(hash = %doc.hash().short_hex(), "content already stored; snapshot unchanged");
        return ctx.print_document("found", &doc);
    }
    ctx.save(&graph)?;
    ctx.print_document("created", &doc)
}

fn cmd_get(ctx: &Context, args: GetArgs) -> anyhow::Result<()> {
    let graph = ctx.open_graph()?;
    let doc = match (args.hash, args.id) {
        (Some(hash), _) => graph.load_by_hash(&hash)?,
        (None, Some(id)) => graph
            .get_by_id(id)?
            .with_context(|| format!("no document with id {id}"))?,
        (None, None) => anyhow::bail!("a hash or --id is required"),
    };
    ctx.print_document("loaded", &doc)
}

fn cmd_list(ctx: &Context, args: ListArgs) -> anyhow::Result<()> {
    let graph = ctx.open_graph()?;
    let from = args.since.unwrap_or(TimePoint::from_micros(i64::MIN));
    let to = args.until.unwrap_or(TimePoint::from_micros(i64::MAX));

    let docs: Vec<Document> = match args.creator {
        Some(creator) => {
            let (lo, hi) = (from.sec_since_epoch(), to.sec_since_epoch());
            graph
                .documents_by_creator(creator)?
                .into_iter()
                .filter(|d| {
                    d.created_date()
                        .is_some_and(|t| (lo..=hi).contains(&t.sec_since_epoch()))
                })
                .collect()
        }
        None => graph.documents_created_between(from, to)?,
    };

    if ctx.format == OutputFormat::Json {
        return ctx.print_json(&docs);
    }
    if docs.is_empty() {
        println!("No documents.");
        return Ok(());
    }
    for doc in &docs {
        let id = doc.id().map_or_else(|| "-".to_string(), |id| id.to_string());
        let created = doc
            .created_date()
            .map_or_else(String::new, |t| t.to_string());
        let title = doc
            .content_groups()
            .first()
            .map(|g| group_title(0, g))
            .unwrap_or_default();
        println!(
            "{:>6}  {}  {:<13}  {}  {}",
            id.bold(),
            doc.hash().short_hex().yellow(),
            doc.creator().to_string().cyan(),
            created.dimmed(),
            title
        );
    }
    Ok(())
}

fn cmd_verify(ctx: &Context) -> anyhow::Result<()> {
    let graph = ctx.open_graph()?;
    let count = graph.verify_all().context("store failed verification")?;
    if ctx.format == OutputFormat::Json {
        return ctx.print_json(&json!({ "verified": count }));
    }
    println!("{} {} documents verified", "✓".green().bold(), count);
    Ok(())
}

fn cmd_hash(ctx: &Context, args: HashArgs) -> anyhow::Result<()> {
    let groups = read_content(&args.file)?.into_groups();
    ctx.config.graph.limits.check(&groups)?;
    let canonical = render_groups(&groups);
    let hash = hash_groups(&groups);
    if ctx.format == OutputFormat::Json {
        return ctx.print_json(&json!({ "canonical": canonical, "hash": hash }));
    }
    println!("{canonical}");
    println!("{}", hash.to_hex().yellow());
    Ok(())
}

fn cmd_config(ctx: &Context) -> anyhow::Result<()> {
    if ctx.format == OutputFormat::Json {
        return ctx.print_json(&ctx.config);
    }
    print!("{}", toml::to_string_pretty(&ctx.config)?);
    Ok(())
}
