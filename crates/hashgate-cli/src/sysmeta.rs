//! `hashgate sysmeta` — print the raw system metadata document, or the
//! parsed allow rules with `--rules`.

use anyhow::bail;
use clap::Args;

use hashgate_authz::is_public;
use hashgate_core::StoreLayout;
use hashgate_store::MetadataStore;

/// Arguments for the `sysmeta` subcommand.
#[derive(Args, Debug)]
pub struct SysmetaArgs {
    /// The persistent identifier to look up.
    pub pid: String,

    /// Print the parsed allow rules as JSON instead of the raw XML.
    #[arg(long)]
    pub rules: bool,
}

/// Print the system metadata document (or its parsed policy) for a PID.
pub async fn run_sysmeta(args: &SysmetaArgs, layout: &StoreLayout) -> anyhow::Result<u8> {
    let store = MetadataStore::new(layout.clone());

    if args.rules {
        let doc = store.read_parsed(&args.pid).await;
        let report = serde_json::json!({
            "pid": args.pid,
            "public": is_public(doc.as_ref()),
            "rules": doc.map(|d| d.allow_rules().to_vec()).unwrap_or_default(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(0);
    }

    match store.read_sysmeta(&args.pid).await {
        Some(bytes) => {
            print!("{}", String::from_utf8_lossy(&bytes));
            Ok(0)
        }
        None => bail!("no system metadata for {}", args.pid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const XML: &str = r#"<systemMetadata>
        <accessPolicy>
          <allow><subject>public</subject><permission>read</permission></allow>
        </accessPolicy>
      </systemMetadata>"#;

    #[tokio::test]
    async fn sysmeta_prints_document() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StoreLayout::new(dir.path());
        let pid = "doi:10.5072/FK2/ABC";
        let path = layout.metadata_path(pid);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, XML).unwrap();

        let args = SysmetaArgs {
            pid: pid.to_string(),
            rules: false,
        };
        assert_eq!(run_sysmeta(&args, &layout).await.unwrap(), 0);

        let args = SysmetaArgs {
            pid: pid.to_string(),
            rules: true,
        };
        assert_eq!(run_sysmeta(&args, &layout).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn sysmeta_absent_errors() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StoreLayout::new(dir.path());
        let args = SysmetaArgs {
            pid: "doi:missing".to_string(),
            rules: false,
        };
        assert!(run_sysmeta(&args, &layout).await.is_err());
    }

    #[tokio::test]
    async fn sysmeta_rules_for_absent_metadata_reports_default_open() {
        // --rules never fails: absent metadata is the default-open policy.
        let dir = tempfile::tempdir().unwrap();
        let layout = StoreLayout::new(dir.path());
        let args = SysmetaArgs {
            pid: "doi:missing".to_string(),
            rules: true,
        };
        assert_eq!(run_sysmeta(&args, &layout).await.unwrap(), 0);
    }
}
