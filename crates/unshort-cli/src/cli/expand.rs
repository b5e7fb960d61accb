//! `unshort` main flow: load input, validate proxy, dispatch, report.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufWriter};
use std::sync::Arc;

use unshort_core::config::UnshortConfig;
use unshort_core::dispatch::{self, BatchResult};
use unshort_core::input::{self, InputError};
use unshort_core::proxy::ProxyConfig;
use unshort_core::report::{self, RenderOptions, Reporter, TextStyler};
use unshort_core::resolve::{CurlResolver, ResolveOptions};

use super::progress::ProgressTracker;
use super::Cli;

/// URLs from `--url` or `--file`, trimmed and without blanks.
pub(crate) fn load_urls(cli: &Cli) -> Result<Vec<String>, InputError> {
    match &cli.file {
        Some(path) => input::read_url_file(path),
        None => Ok(input::normalize_urls(&cli.url)),
    }
}

/// Warning for a `--file` that exists but holds no URLs.
pub(crate) fn empty_input_warning(cli: &Cli, urls: &[String]) -> Option<&'static str> {
    (cli.file.is_some() && urls.is_empty()).then_some("Warning: File is empty.")
}

fn report_input_error(diag: &dyn TextStyler, err: &InputError) {
    tracing::warn!("input error: {}", err);
    eprintln!("{}", diag.error(&format!("Error: {}", err)));
}

/// Runs one expansion. Returns `Ok(true)` when every URL resolved (or there
/// was nothing to do) and `Ok(false)` after an input error or a failed URL.
/// Input errors stop the run before any request is made.
pub async fn run_expand(cli: &Cli, cfg: &UnshortConfig) -> Result<bool> {
    let diag = report::diagnostics_styler(cli.no_color);
    let mut input_ok = true;

    let urls = match load_urls(cli) {
        Ok(urls) => urls,
        Err(e) => {
            report_input_error(diag.as_ref(), &e);
            input_ok = false;
            Vec::new()
        }
    };
    if input_ok {
        if let Some(warning) = empty_input_warning(cli, &urls) {
            eprintln!("{}", diag.warning(warning));
        }
    }

    let proxy = match cli.proxy.as_deref().or(cfg.proxy.as_deref()) {
        Some(raw) => match ProxyConfig::parse(raw) {
            Ok(p) => Some(p),
            Err(e) => {
                report_input_error(diag.as_ref(), &e);
                input_ok = false;
                None
            }
        },
        None => None,
    };

    if !input_ok {
        return Ok(false);
    }
    if urls.is_empty() {
        return Ok(true);
    }

    let workers = cli
        .workers
        .map(|n| n.get())
        .or(cfg.workers)
        .unwrap_or_else(dispatch::default_workers)
        .max(1);
    let render = RenderOptions::detect(
        cli.no_color,
        cli.no_progress,
        cli.output.is_some(),
        urls.len(),
    );
    if let Some(p) = &proxy {
        tracing::info!(proxy = p.url(), socks = p.is_socks(), "using proxy");
    }
    // Must exist before the first request is sent.
    let output = match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create output file {}", path.display()))?;
            Some((file, path))
        }
        None => None,
    };
    let resolver = Arc::new(CurlResolver::new(ResolveOptions::from_config(cfg, proxy)));

    let batch = run_batch(urls, workers, resolver, render.progress).await?;

    let lines = match output {
        Some((file, path)) => {
            let mut reporter = Reporter::new(BufWriter::new(file), render.styler());
            reporter
                .write_batch(&batch)
                .with_context(|| format!("write {}", path.display()))?
        }
        None => {
            let mut reporter = Reporter::new(io::stdout().lock(), render.styler());
            reporter.write_batch(&batch).context("write stdout")?
        }
    };
    tracing::info!(
        lines,
        resolved = batch.succeeded(),
        failed = batch.failed(),
        "expansion finished"
    );

    Ok(batch.all_succeeded())
}

/// Dispatch on the blocking pool; the progress bar ticks as URLs complete.
async fn run_batch(
    urls: Vec<String>,
    workers: usize,
    resolver: Arc<CurlResolver>,
    show_progress: bool,
) -> Result<BatchResult> {
    tokio::task::spawn_blocking(move || {
        let distinct = urls.iter().collect::<HashSet<_>>().len() as u64;
        let mut progress = show_progress.then(|| ProgressTracker::new(distinct));
        let batch = dispatch::dispatch_with_progress(&urls, workers, resolver, |_, outcome| {
            if let Some(p) = progress.as_mut() {
                p.step(outcome.is_ok());
            }
        });
        if let Some(p) = progress {
            p.finish();
        }
        batch
    })
    .await
    .context("dispatch task join")
}
