//! `psd run` – open the credential dialog, submit, and save the download.
//!
//! Drives the full flow: prompt for credentials, send the one POST to the
//! server's /run endpoint on a blocking task, then print the resulting
//! status line. Every outcome is terminal; rerun the command to retry.

use anyhow::{Context, Result};
use psd_core::config::PsdConfig;
use psd_core::credentials::Credentials;
use psd_core::request_id::RequestId;
use psd_core::response::Outcome;
use psd_core::session::{Disposition, Session};
use psd_core::storage;
use psd_core::submit;
use std::path::PathBuf;

use crate::cli::prompt;

pub async fn run_submit(
    cfg: &PsdConfig,
    server: Option<String>,
    output_dir: Option<PathBuf>,
    username: Option<String>,
    overwrite: bool,
) -> Result<()> {
    let server_url = server.unwrap_or_else(|| cfg.server_url.clone());
    let endpoint = submit::run_endpoint(&server_url)?;
    let download_dir = match output_dir.or_else(|| cfg.download_dir.clone()) {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    let mut session = Session::new();
    session.open();

    let username_input = match username {
        Some(u) => u,
        None => match prompt::prompt_line("Username: ")? {
            Some(u) => u,
            None => {
                session.cancel();
                return Ok(());
            }
        },
    };
    let password_input = match prompt::prompt_line("Password: ")? {
        Some(p) => p,
        None => {
            session.cancel();
            return Ok(());
        }
    };

    // Empty field after trimming: silent no-op, no request goes out.
    let Some(credentials) = Credentials::from_input(&username_input, &password_input) else {
        session.cancel();
        return Ok(());
    };

    let rid = RequestId::generate();
    tracing::debug!(rid = %rid, user = credentials.username(), "starting run");

    session.begin_submission();
    println!("{}", session.status());

    let timeouts = cfg.timeouts();
    let task_endpoint = endpoint.clone();
    let task_rid = rid.clone();
    // Credentials move into the task and are dropped (and wiped) with it.
    let result = tokio::task::spawn_blocking(move || {
        submit::submit(&task_endpoint, &credentials, &task_rid, timeouts)
    })
    .await
    .context("submission task failed")?;

    match result {
        Ok(raw) => {
            let display_rid = rid.or_echoed(raw.echoed_request_id());
            match raw.into_outcome() {
                Outcome::Success { filename, body } => {
                    let path = storage::save_download(&download_dir, &filename, &body, overwrite)?;
                    session.finish(Disposition::DownloadStarted);
                    println!("{}", session.status());
                    println!("Saved {}", path.display());
                }
                outcome => {
                    session.finish(Disposition::of(&outcome, &display_rid));
                    println!("{}", session.status());
                }
            }
        }
        Err(err) => {
            tracing::error!(rid = %rid, error = %err, "network error");
            session.finish(Disposition::NetworkError);
            println!("{}", session.status());
        }
    }

    Ok(())
}
