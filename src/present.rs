use std::{collections::BTreeMap, io::Write};

use crate::{aggregate::Kube, error::Result};

/// Render kubeware groups as a YAML document.
pub fn render(kubes: &BTreeMap<String, Kube>) -> Result<String> {
    Ok(serde_yaml::to_string(kubes)?)
}

/// Render kubeware groups and write them to `out`.
pub fn print<W: Write>(kubes: &BTreeMap<String, Kube>, out: &mut W) -> Result<()> {
    let yaml = render(kubes)?;
    out.write_all(yaml.as_bytes())?;
    out.flush()?;
    Ok(())
}
