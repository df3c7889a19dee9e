//! Command line surface of the `kubeware` binary.

use std::ffi::OsStr;

use clap::{Parser, Subcommand, builder::StyledStr};
use clap_complete::engine::{ArgValueCompleter, CompletionCandidate};
use kube::config::Kubeconfig;

/// Inspect kubeware groups deployed to a Kubernetes cluster
#[derive(Debug, Parser)]
#[command(name = "kubeware", version, about, long_about = None)]
pub struct Cli {
    /// Override the Kubernetes context to target
    #[arg(long, global = true, env = "KUBEWARE_CONTEXT", add = context_value_completer())]
    pub context: Option<String>,

    /// Namespace to query (defaults to the context's namespace)
    #[arg(short, long, global = true, env = "KUBEWARE_NAMESPACE")]
    pub namespace: Option<String>,

    /// Query resources across all namespaces
    #[arg(short = 'A', long, global = true, conflicts_with = "namespace")]
    pub all_namespaces: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List services and controllers grouped by their kubeware label
    List,
}

/// Create an `ArgValueCompleter` that lists contexts from the active kubeconfig,
/// putting the current context first.
pub fn context_value_completer() -> ArgValueCompleter {
    ArgValueCompleter::new(|input: &OsStr| -> Vec<CompletionCandidate> {
        match Kubeconfig::read() {
            Ok(kubeconfig) => context_candidates(&kubeconfig, input.to_string_lossy().trim()),
            Err(_) => Vec::new(),
        }
    })
}

fn context_candidates(kubeconfig: &Kubeconfig, prefix: &str) -> Vec<CompletionCandidate> {
    let current = kubeconfig.current_context.as_deref();
    let mut candidates = Vec::new();

    for named in kubeconfig
        .contexts
        .iter()
        .filter(|named| named.name.starts_with(prefix))
    {
        let is_current = current == Some(named.name.as_str());
        let mut candidate = CompletionCandidate::new(named.name.as_str());
        if let Some(ctx) = &named.context {
            let mut help = format!("cluster={}", ctx.cluster);
            if let Some(namespace) = &ctx.namespace {
                help.push_str(&format!(" namespace={namespace}"));
            }
            if is_current {
                help.insert_str(0, "[current] ");
            }
            candidate = candidate.help(Some(StyledStr::from(help)));
        }

        if is_current {
            candidates.insert(0, candidate.display_order(Some(0)));
        } else {
            candidates.push(candidate);
        }
    }

    candidates
}
