#![cfg_attr(not(doctest), doc = include_str!("../README.md"))]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use k8s_openapi;
pub use kube;

pub mod aggregate;
pub mod cli;
pub mod client;
pub mod decode;
pub mod error;
pub mod list;
pub mod present;

pub use aggregate::{Kube, aggregate};
pub use client::{ClusterApi, KubeClusterApi};
pub use error::{Error, Result};
pub use list::run_list;

use kube::config::Kubeconfig;

/// Kubeconfig context and namespace the cluster client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterTarget {
    pub context: String,
    /// `None` targets all namespaces.
    pub namespace: Option<String>,
}

impl ClusterTarget {
    /// Resolve the target from optional overrides, reading the kubeconfig
    /// for whatever is not given.
    pub fn resolve(
        context: Option<String>,
        namespace: Option<String>,
        all_namespaces: bool,
    ) -> Result<Self> {
        let context = determine_context(context)?;
        let namespace = if all_namespaces {
            None
        } else {
            Some(determine_namespace(namespace, &context))
        };
        Ok(Self { context, namespace })
    }
}

/// Detects the Kubernetes context based on the provided `context` argument.
///
/// Context determination follows this priority:
/// 1. Uses the context if explicitly specified.
/// 2. Retrieves the current context from the kubeconfig file.
///
/// # Errors
/// Returns an error if the kubeconfig file cannot be read or if no current context is set in the kubeconfig.
pub fn determine_context(context: Option<String>) -> Result<String> {
    match context {
        Some(context) => Ok(context),
        None => Kubeconfig::read()?.current_context.ok_or(Error::Context),
    }
}

/// Determines the Kubernetes namespace based on the provided `namespace` and `context`.
///
/// Namespace determination follows this priority:
/// 1. Uses the namespace if explicitly specified.
/// 2. Retrieves the default namespace associated with `context` from kubeconfig.
/// 3. Uses "default".
pub fn determine_namespace(namespace: Option<String>, context: &str) -> String {
    if let Some(ns) = namespace {
        return ns;
    }

    match Kubeconfig::read() {
        Ok(kubeconfig) => context_namespace(&kubeconfig, context),
        Err(_) => String::from("default"),
    }
}

fn context_namespace(kubeconfig: &Kubeconfig, context: &str) -> String {
    kubeconfig
        .contexts
        .iter()
        .find(|named| named.name == context)
        .and_then(|named| named.context.as_ref())
        .and_then(|ctx| ctx.namespace.clone())
        .unwrap_or_else(|| String::from("default"))
}
