use clap::{CommandFactory, Parser};
use clap_complete::CompleteEnv;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use kubeware::{
    ClusterTarget, KubeClusterApi,
    cli::{Cli, Command},
    run_list,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    CompleteEnv::with_factory(Cli::command).complete();

    // stdout carries the YAML document, so logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let target = ClusterTarget::resolve(cli.context, cli.namespace, cli.all_namespaces)?;

    match cli.command {
        Command::List => {
            let api = KubeClusterApi::connect(&target).await?;
            run_list(&api, &mut std::io::stdout().lock()).await?;
        }
    }

    Ok(())
}
