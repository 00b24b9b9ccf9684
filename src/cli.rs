// src/cli.rs
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;

use crate::config::AppOptions;
use crate::progress::LogProgress;
use crate::{file, output, scrape};

/// Scrape the fishing exam appointment listing and enrich every row with its detail page.
#[derive(Parser, Debug, Default)]
#[command(name = "fpr_scrape", version, about)]
pub struct Args {
    /// TOML file with option overrides (flow, scrape, export, vocab sections)
    #[arg(long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Output file or directory; stdout when omitted
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Simultaneous detail conversations
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Per-request timeout in seconds (0 disables)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Session seeding page, visited best-effort by every conversation
    #[arg(long, value_name = "URL")]
    pub entry_url: Option<String>,

    #[arg(long, value_name = "URL")]
    pub list_url: Option<String>,

    /// Base for resolving the form action
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Stop after the listing; no detail pages
    #[arg(long)]
    pub summary_only: bool,

    /// Print the listing's forms against the configured selectors, then exit
    #[arg(long)]
    pub inspect_forms: bool,

    /// Single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Debug logging (RUST_LOG still wins when set)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Flags win over the config file, which wins over defaults.
    pub fn apply(&self, opts: &mut AppOptions) {
        if let Some(p) = &self.out { opts.export.out = Some(p.clone()); }
        if let Some(w) = self.workers { opts.scrape.workers = w; }
        if let Some(t) = self.timeout { opts.flow.timeout_secs = t; }
        if let Some(u) = &self.entry_url { opts.flow.entry_url = u.clone(); }
        if let Some(u) = &self.list_url { opts.flow.list_url = u.clone(); }
        if let Some(u) = &self.base_url { opts.flow.base_url = u.clone(); }
        if self.summary_only { opts.scrape.enrich = false; }
        if self.compact { opts.export.pretty = false; }
    }

    pub fn options(&self) -> color_eyre::Result<AppOptions> {
        let mut opts = match &self.config {
            Some(path) => AppOptions::load(path)
                .wrap_err_with(|| format!("loading config {}", path.display()))?,
            None => AppOptions::default(),
        };
        self.apply(&mut opts);
        Ok(opts)
    }
}

pub fn run() -> color_eyre::Result<()> {
    let args = Args::parse();
    crate::log::init(args.verbose);

    let opts = args.options()?;
    if args.inspect_forms {
        return inspect_forms(&opts);
    }

    let mut progress = LogProgress::default();
    let out = scrape::run(&opts, Some(&mut progress)).wrap_err("scrape failed")?;

    let degraded = out.exam_appointments.iter().filter(|r| r.is_degraded()).count();
    if opts.scrape.enrich && degraded > 0 {
        logw!("{degraded} of {} appointments have no details", out.total_count);
    }

    let json = output::to_json(&out, opts.export.pretty)?;
    if let Some(path) = file::write_output(opts.export.out.as_deref(), &json)? {
        logf!("Wrote {} appointments to {}", out.total_count, path.display());
    }
    Ok(())
}

fn inspect_forms(opts: &AppOptions) -> color_eyre::Result<()> {
    let forms = scrape::inspect_forms(opts).wrap_err("fetching listing")?;
    if forms.is_empty() {
        logw!("no forms on {}", opts.flow.list_url);
    }
    for (i, info) in forms.iter().enumerate() {
        println!("\n=== Form {i} ===\n{info}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "fpr_scrape", "-w", "3", "--timeout", "0", "--summary-only", "--compact", "-o", "out/",
        ])
        .unwrap();
        let opts = args.options().unwrap();

        assert_eq!(opts.scrape.workers, 3);
        assert_eq!(opts.flow.timeout(), None);
        assert!(!opts.scrape.enrich);
        assert!(!opts.export.pretty);
        assert_eq!(opts.export.out, Some(PathBuf::from("out/")));
    }

    #[test]
    fn no_flags_keep_defaults() {
        let args = Args::try_parse_from(["fpr_scrape"]).unwrap();
        assert_eq!(args.options().unwrap(), AppOptions::default());
    }

    #[test]
    fn flags_win_over_config_values() {
        let mut opts = AppOptions::from_toml("[scrape]\nworkers = 2\n[flow]\nlist_url = \"http://a/list\"\n").unwrap();
        let args = Args::try_parse_from(["fpr_scrape", "--list-url", "http://b/list"]).unwrap();
        args.apply(&mut opts);

        assert_eq!(opts.scrape.workers, 2);
        assert_eq!(opts.flow.list_url, "http://b/list");
    }

    #[test]
    fn every_flow_url_can_be_redirected() {
        let args = Args::try_parse_from([
            "fpr_scrape",
            "--entry-url", "http://mirror/fprApp/",
            "--list-url", "http://mirror/list",
            "--base-url", "http://mirror",
        ])
        .unwrap();
        let opts = args.options().unwrap();

        assert_eq!(opts.flow.entry_url, "http://mirror/fprApp/");
        assert_eq!(opts.flow.list_url, "http://mirror/list");
        assert_eq!(opts.flow.base_url, "http://mirror");
    }

    #[test]
    fn inspect_forms_is_a_plain_switch() {
        let args = Args::try_parse_from(["fpr_scrape", "--inspect-forms"]).unwrap();
        assert!(args.inspect_forms);
        assert_eq!(args.options().unwrap(), AppOptions::default());
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Args::try_parse_from(["fpr_scrape", "--team", "3"]).is_err());
    }
}
