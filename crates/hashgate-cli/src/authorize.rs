//! `hashgate authorize` — run the full read-authorization check for a
//! PID and print the decision.
//!
//! Touches the network only when the object is not publicly readable;
//! a public or metadata-less PID is decided entirely offline.

use clap::Args;

use hashgate_authz::{AuthzEngine, CnClient, CnConfig};
use hashgate_core::StoreLayout;
use hashgate_store::MetadataStore;

/// Arguments for the `authorize` subcommand.
#[derive(Args, Debug)]
pub struct AuthorizeArgs {
    /// The persistent identifier to check.
    pub pid: String,

    /// Authorization header value to forward to the coordinating node
    /// (e.g. "Bearer <jwt>"). Empty means anonymous.
    #[arg(long, default_value = "")]
    pub token: String,

    /// Base URL of the coordinating node.
    #[arg(long, default_value = "https://cn.dataone.org/cn/v2")]
    pub cn_base: String,

    /// Remote request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

/// Evaluate the read decision for a PID and print it as JSON.
///
/// Exit code 0 when the read is authorized, 1 when denied.
pub async fn run_authorize(args: &AuthorizeArgs, layout: &StoreLayout) -> anyhow::Result<u8> {
    let cn = CnClient::new(CnConfig {
        base_url: args.cn_base.parse()?,
        timeout_secs: args.timeout_secs,
    })?;
    let engine = AuthzEngine::new(MetadataStore::new(layout.clone()), cn);

    let decision = engine.authorize(&args.token, &args.pid).await;
    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(if decision.authorized { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pid: &str, cn_base: &str) -> AuthorizeArgs {
        AuthorizeArgs {
            pid: pid.to_string(),
            token: String::new(),
            cn_base: cn_base.to_string(),
            timeout_secs: 1,
        }
    }

    #[tokio::test]
    async fn authorize_without_metadata_is_default_open() {
        // No metadata and a dead CN port: still authorized, offline.
        let dir = tempfile::tempdir().unwrap();
        let layout = StoreLayout::new(dir.path());
        let code = run_authorize(&args("doi:any", "http://127.0.0.1:1"), &layout)
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn authorize_private_pid_with_dead_authority_is_denied() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StoreLayout::new(dir.path());
        let pid = "doi:10.5072/FK2/PRIV";
        let path = layout.metadata_path(pid);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"<systemMetadata>
                 <accessPolicy>
                   <allow><subject>uid=owner</subject><permission>read</permission></allow>
                 </accessPolicy>
               </systemMetadata>"#,
        )
        .unwrap();

        let code = run_authorize(&args(pid, "http://127.0.0.1:1"), &layout)
            .await
            .unwrap();
        assert_eq!(code, 1);
    }
}
