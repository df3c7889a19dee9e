use std::io::Write;

use kube::api::ListParams;

use crate::{
    aggregate::aggregate,
    client::ClusterApi,
    decode::{decode_controllers, decode_services},
    error::Result,
    present,
};

/// Run the `list` command: fetch services and controllers, group them by
/// their `kubeware` label and write the groups to `out` as YAML.
///
/// Services are fetched and decoded before controllers are requested; any
/// failure stops the command before anything is written.
pub async fn run_list<C, W>(api: &C, out: &mut W) -> Result<()>
where
    C: ClusterApi + ?Sized,
    W: Write,
{
    let filter = ListParams::default();

    let services = decode_services(&api.get_services(&filter).await?)?;
    let controllers = decode_controllers(&api.get_controllers(&filter).await?)?;

    let kubes = aggregate(&services.items, &controllers.items);
    present::print(&kubes, out)
}
