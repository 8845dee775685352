use aligator::{MemoryTree, NodeId, NodeSource, RenderConfig, RenderOptions, Selector, TreeRenderer};
use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("aligator")
        .about("Render nested list markup from a JSON page tree")
        .arg(
            Arg::new("input")
                .help("Tree JSON file")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .help("Render the children of this node (default: the tree root)")
                .value_parser(clap::value_parser!(u64))
                .conflicts_with("roots"),
        )
        .arg(
            Arg::new("roots")
                .long("roots")
                .help("Render these nodes as the first level")
                .value_delimiter(',')
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("active")
                .long("active")
                .help("Node currently being viewed")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("depth-limit")
                .long("depth-limit")
                .help("Maximum depth to render")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("collapsed")
                .long("collapsed")
                .help("Only expand the branch containing the active node")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("states")
                .long("states")
                .help("Pass state labels (parent, current, ...) to templates")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("filter")
                .long("filter")
                .help("Default child selector, e.g. 'hidden!=1'"),
        )
        .arg(
            Arg::new("options")
                .long("options")
                .help("JSON file with default and per-level options")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Append a diagnostic comment after every item")
                .action(ArgAction::SetTrue),
        )
}

fn root_source(tree: &MemoryTree, matches: &ArgMatches) -> Result<NodeSource> {
    if let Some(ids) = matches.get_many::<u64>("roots") {
        let nodes = ids
            .map(|id| tree.get(NodeId(*id)).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(NodeSource::Set(nodes));
    }

    let root = match matches.get_one::<u64>("root") {
        Some(id) => tree.get(NodeId(*id))?.clone(),
        None => tree.root().clone(),
    };
    Ok(NodeSource::Single(root))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    let input = matches
        .get_one::<PathBuf>("input")
        .context("missing input file")?;
    let mut tree = MemoryTree::from_path(input)
        .with_context(|| format!("Failed to load tree from {}", input.display()))?;
    info!(nodes = tree.len(), "loaded tree");

    if let Some(active) = matches.get_one::<u64>("active") {
        tree.set_active(NodeId(*active))?;
    }
    if matches.get_flag("debug") {
        tree.set_debug(true);
    }

    let mut config = RenderConfig::new();
    let mut levels = Vec::new();
    if let Some(path) = matches.get_one::<PathBuf>("options") {
        let options = RenderOptions::from_path(path)
            .with_context(|| format!("Failed to read options from {}", path.display()))?;
        options.apply_defaults(&mut config)?;
        levels = options.level_options()?;
    }
    if let Some(filter) = matches.get_one::<String>("filter") {
        config.default_filter = Selector::parse(filter)?;
    }
    config.set_depth_limit(matches.get_one::<usize>("depth-limit").copied());
    config.set_collapsed(matches.get_flag("collapsed"));
    if matches.get_flag("states") {
        config.set_default_states(true);
    }

    let source = root_source(&tree, &matches)?;
    let renderer = TreeRenderer::with_config(&tree, config);

    match renderer.render(&source, &levels) {
        Some(markup) => println!("{}", markup),
        None => warn!("nothing to render"),
    }

    Ok(())
}
