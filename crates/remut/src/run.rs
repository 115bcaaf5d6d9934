use std::io::Write;

use anyhow::{Context, bail};
use remut_mutate::{Error, Mutation, ReqwestTransport, Response, Transport};
use tracing::info;

use crate::{Cli, Config};

/// Send the mutation described by `cli` and print the response body.
///
/// # Errors
///
/// Returns an error if the arguments do not fit the verb, the request cannot
/// be sent, or the server answers with a non-2xx status.
pub async fn execute(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let transport = ReqwestTransport::new().context("Failed to create HTTP client")?;
    let response = send(transport, cli, config).await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&response.body)?;
    if !response.body.ends_with(b"\n") {
        writeln!(stdout)?;
    }
    Ok(())
}

/// Run one mutation over `transport`, reporting the published state.
pub async fn send<T: Transport>(transport: T, cli: &Cli, config: &Config) -> anyhow::Result<Response> {
    let payload = cli.payload()?;
    let scope = config.scope(cli.root.as_deref());
    if scope.base.is_empty() && !cli.absolute {
        bail!("no base URL configured, set `base` in the config file, REMUT_BASE or --root");
    }

    let mutation = Mutation::new(transport, scope, cli.mutation_config());
    info!(verb = %cli.verb, url = %mutation.meta().absolute_path, "sending mutation");

    match mutation.mutate(payload, None).await {
        Ok(response) => {
            info!(status = response.status, "mutation succeeded");
            Ok(response)
        }
        Err(Error::Status(response)) => {
            let states = mutation.states();
            let Some(error) = states.error else {
                bail!("request failed with status {}", response.status);
            };
            bail!("{}\n{:#}", error.message, error.data)
        }
        Err(err) => Err(err).context("Failed to send mutation"),
    }
}
