use thiserror::Error;

/// Errors raised while listing kubeware groups.
///
/// Every variant is fatal for the `list` command.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("failed to load kubeconfig")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    #[error("current_context is not set")]
    Context,

    #[error("failed to create kubernetes client")]
    Client(#[source] kube::Error),

    #[error("failed to fetch {kind}")]
    Fetch {
        kind: &'static str,
        #[source]
        source: kube::Error,
    },

    #[error("failed to decode {kind}")]
    Decode {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to render YAML")]
    Render(#[from] serde_yaml::Error),

    #[error("failed to write output")]
    Write(#[from] std::io::Error),
}

impl Error {
    pub fn fetch(kind: &'static str, source: kube::Error) -> Self {
        Self::Fetch { kind, source }
    }

    pub fn decode(kind: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { kind, source }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_names_the_resource_kind() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::decode("services", source);
        assert_eq!(err.to_string(), "failed to decode services");
    }

    #[test]
    fn cause_is_reported_once_in_the_chain() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let cause = source.to_string();
        let err = anyhow::Error::from(Error::decode("controllers", source));

        let chain = format!("{err:#}");
        assert_eq!(chain, format!("failed to decode controllers: {cause}"));
        assert_eq!(chain.matches(&cause).count(), 1);
    }

    #[test]
    fn missing_context_message() {
        assert_eq!(Error::Context.to_string(), "current_context is not set");
    }
}
