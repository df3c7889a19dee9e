//! Access to the Service and ReplicationController collections of a cluster.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{ReplicationController, Service};
use kube::{
    Client, Config, Resource,
    api::ListParams,
    config::KubeConfigOptions,
    core::Request,
};
#[cfg(test)]
use mockall::automock;
use tracing::debug;

use crate::{
    ClusterTarget,
    error::{Error, Result},
};

/// Cluster API operations used by the `list` command.
///
/// Both operations return the raw JSON body of the list response.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// Fetch the `ServiceList` body.
    async fn get_services(&self, filter: &ListParams) -> Result<String>;

    /// Fetch the `ReplicationControllerList` body.
    async fn get_controllers(&self, filter: &ListParams) -> Result<String>;
}

/// [`ClusterApi`] backed by a [`kube::Client`].
#[derive(Clone)]
pub struct KubeClusterApi {
    client: Client,
    /// `None` lists across all namespaces.
    namespace: Option<String>,
}

impl KubeClusterApi {
    pub fn new(client: Client, namespace: Option<String>) -> Self {
        Self { client, namespace }
    }

    /// Build a client for the context and namespace in `target`.
    pub async fn connect(target: &ClusterTarget) -> Result<Self> {
        let options = KubeConfigOptions {
            context: Some(target.context.clone()),
            ..Default::default()
        };
        let config = Config::from_kubeconfig(&options).await?;
        let client = Client::try_from(config).map_err(Error::Client)?;
        debug!(context = %target.context, namespace = ?target.namespace, "connected to cluster");
        Ok(Self::new(client, target.namespace.clone()))
    }

    async fn list_text<K>(&self, filter: &ListParams, kind: &'static str) -> Result<String>
    where
        K: Resource<DynamicType = ()>,
    {
        let path = collection_path::<K>(self.namespace.as_deref());
        debug!(%path, "fetching {kind}");
        let request = Request::new(path)
            .list(filter)
            .map_err(|source| Error::fetch(kind, kube::Error::BuildRequest(source)))?;
        self.client
            .request_text(request)
            .await
            .map_err(|source| Error::fetch(kind, source))
    }
}

#[async_trait]
impl ClusterApi for KubeClusterApi {
    async fn get_services(&self, filter: &ListParams) -> Result<String> {
        self.list_text::<Service>(filter, "services").await
    }

    async fn get_controllers(&self, filter: &ListParams) -> Result<String> {
        self.list_text::<ReplicationController>(filter, "controllers").await
    }
}

/// URL path of the collection of `K`, namespaced unless `namespace` is `None`.
pub fn collection_path<K>(namespace: Option<&str>) -> String
where
    K: Resource<DynamicType = ()>,
{
    K::url_path(&(), namespace)
}
