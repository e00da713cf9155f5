//! `hashgate resolve` — walk a PID through both reference hops and
//! print every derived location as JSON.

use anyhow::Context;
use clap::Args;

use hashgate_core::StoreLayout;
use hashgate_store::Resolver;

/// Arguments for the `resolve` subcommand.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// The persistent identifier to resolve.
    pub pid: String,
}

/// Resolve a PID and print the full resolution as JSON.
pub async fn run_resolve(args: &ResolveArgs, layout: &StoreLayout) -> anyhow::Result<u8> {
    let resolver = Resolver::new(layout.clone());
    let resolution = resolver
        .resolve(&args.pid)
        .await
        .with_context(|| format!("resolving {}", args.pid))?;

    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(0)
}
