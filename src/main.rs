use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use threadtree::{
    format_labels, Side, ThreadedTree, TraversalOrder, TreeConfig, DEFAULT_MAX_HEIGHT,
};

#[derive(Parser, Debug)]
#[command(name = "threadtree", about = "Build, thread and walk complete binary trees")]
struct Cli {
    /// Largest accepted tree height (never more than 31).
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_HEIGHT)]
    max_height: u32,

    /// Log build/threading/removal events (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print pre/in/post-order sequences and the leaf count.
    Traverse {
        /// Tree height (<= 0 gives the empty tree).
        #[arg(long, allow_hyphen_values = true)]
        height: i32,
    },
    /// Thread the tree and walk it along the threads.
    Thread {
        /// Tree height (<= 0 gives the empty tree).
        #[arg(long, allow_hyphen_values = true)]
        height: i32,
        /// Threading order: pre, in or post.
        #[arg(long, default_value = "in")]
        order: TraversalOrder,
    },
    /// Remove a leaf by label and show the result.
    Remove {
        /// Tree height.
        #[arg(long)]
        height: i32,
        /// Label of the leaf to remove.
        #[arg(long)]
        label: u32,
        /// Thread the tree with this order before removing.
        #[arg(long)]
        thread: Option<TraversalOrder>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = TreeConfig::with_max_height(cli.max_height);

    match cli.command {
        Commands::Traverse { height } => run_traverse(config, height)?,
        Commands::Thread { height, order } => run_thread(config, height, order)?,
        Commands::Remove {
            height,
            label,
            thread,
        } => run_remove(config, height, label, thread)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build(config: TreeConfig, height: i32) -> Result<ThreadedTree> {
    let mut tree = ThreadedTree::with_config(config);
    tree.build_complete(height)
        .with_context(|| format!("failed to build tree of height {}", height))?;
    Ok(tree)
}

fn run_traverse(config: TreeConfig, height: i32) -> Result<()> {
    let tree = build(config, height)?;
    print_traversals(&tree);
    Ok(())
}

fn run_thread(config: TreeConfig, height: i32, order: TraversalOrder) -> Result<()> {
    let mut tree = build(config, height)?;
    tree.thread(order);

    print!("{}", tree.render_ascii());
    for edge in tree.threads() {
        let (source, target) = (tree.node(edge.source)?, tree.node(edge.target)?);
        let relation = match edge.side {
            Side::Left => "pred",
            Side::Right => "succ",
        };
        println!("{}\t{}\t{}", source.value(), relation, target.value());
    }

    match tree.threaded_walk(order) {
        Ok(walk) => println!(
            "{}-order threaded walk: {}",
            order,
            format_labels(&tree.labels(&walk))
        ),
        Err(err) => println!(
            "{} (recursive {}-order: {})",
            err,
            order,
            format_labels(&tree.traverse(order))
        ),
    }
    Ok(())
}

fn run_remove(
    config: TreeConfig,
    height: i32,
    label: u32,
    thread: Option<TraversalOrder>,
) -> Result<()> {
    let mut tree = build(config, height)?;
    if let Some(order) = thread {
        tree.thread(order);
    }

    let id = tree
        .find(label)
        .ok_or_else(|| anyhow::anyhow!("no node labelled {} in tree of height {}", label, height))?;
    tree.remove_leaf(id)
        .with_context(|| format!("failed to remove node {}", label))?;

    println!("removed {}", label);
    print_traversals(&tree);
    if let Some(order) = tree.thread_state().order() {
        println!(
            "thread state: {:?} ({}-order threads need re-threading)",
            tree.thread_state(),
            order
        );
    }
    Ok(())
}

fn print_traversals(tree: &ThreadedTree) {
    println!("preorder:  {}", format_labels(&tree.preorder()));
    println!("inorder:   {}", format_labels(&tree.inorder()));
    println!("postorder: {}", format_labels(&tree.postorder()));
    println!("leaves:    {}", tree.leaf_count());
}
