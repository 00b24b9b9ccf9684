// src/scrape.rs
use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::{mpsc, atomic::{AtomicUsize, Ordering}},
    thread,
};

use scraper::Selector;

use crate::{
    config::AppOptions,
    core::{Conversation, form::{self, FormInfo}, html},
    data::{DetailAttributes, EnrichedRecord, Output, SummaryRecord},
    error::{Error, Result},
    output,
    progress::Progress,
    specs::{detail, listing},
};

/// One enrichment attempt for one record.
///
/// Every call must run its own isolated conversation; nothing obtained in one
/// call may be used in another.
pub trait Enricher: Sync {
    fn enrich(&self, record: &SummaryRecord) -> Result<DetailAttributes>;
}

/// The remote protocol: fresh conversation → re-match → submit → parse.
pub struct FlowEnricher<'a> {
    opts: &'a AppOptions,
    control: Selector,
}

impl<'a> FlowEnricher<'a> {
    /// Fails early on a control selector that does not compile.
    pub fn new(opts: &'a AppOptions) -> Result<Self> {
        Ok(Self { opts, control: html::selector(&opts.flow.control_selector)? })
    }
}

impl Enricher for FlowEnricher<'_> {
    fn enrich(&self, record: &SummaryRecord) -> Result<DetailAttributes> {
        let (conversation, listing, target) = Conversation::open(&self.opts.flow)?;
        let control = listing::find_control(
            record,
            &listing,
            &self.opts.vocab,
            self.opts.scrape.min_table_text,
            &self.control,
        )?;
        let page = conversation.submit(&listing, &target, &control)?;
        Ok(detail::parse_detail(&page, &self.opts.vocab, &self.opts.scrape.detail))
    }
}

/// Top-level: listing, per-record details, ordered output.
/// Only a failed *initial* listing is an error; per-record failures degrade.
pub fn run(opts: &AppOptions, mut progress: Option<&mut dyn Progress>) -> Result<Output> {
    let enricher = FlowEnricher::new(opts)?;

    let summaries = collect_summaries(opts)?;
    let found = format!("Found {} appointments", summaries.len());
    match progress.as_deref_mut() {
        Some(p) => p.log(&found),
        None => logf!("{found}"),
    }

    let records = if opts.scrape.enrich {
        enrich_all(&enricher, &summaries, opts.scrape.workers, progress)
    } else {
        summaries.into_iter().map(EnrichedRecord::degraded).collect()
    };

    Ok(output::assemble(records))
}

/// Summary records from one throwaway conversation's listing.
pub fn collect_summaries(opts: &AppOptions) -> Result<Vec<SummaryRecord>> {
    let (_conversation, listing, _target) = Conversation::open(&opts.flow)?;
    Ok(listing::extract_summaries(&listing, &opts.vocab, opts.scrape.min_table_text))
}

/// Fetch a listing and describe its forms against the configured selectors.
/// Unlike [`run`], a listing without a usable form is not an error here.
pub fn inspect_forms(opts: &AppOptions) -> Result<Vec<FormInfo>> {
    let form_sel = html::selector(&opts.flow.form_selector)?;
    let control_sel = html::selector(&opts.flow.control_selector)?;
    let (_conversation, listing) = Conversation::start(&opts.flow)?;
    Ok(form::describe_forms(&listing, &form_sel, &control_sel))
}

/// Enrich every record with at most `workers` conversations in flight.
///
/// The result has one entry per input, at the input's position. A failed or
/// panicking task yields its summary unchanged; no task is retried.
pub fn enrich_all<E: Enricher>(
    enricher: &E,
    records: &[SummaryRecord],
    workers: usize,
    mut progress: Option<&mut dyn Progress>,
) -> Vec<EnrichedRecord> {
    let total = records.len();
    if let Some(p) = progress.as_deref_mut() {
        p.begin(total);
    }

    let mut slots: Vec<Option<EnrichedRecord>> = vec![None; total];
    let next = AtomicUsize::new(0);
    let workers = workers.clamp(1, total.max(1));

    thread::scope(|scope| {
        let (res_tx, res_rx) = mpsc::channel::<(usize, Result<DetailAttributes>)>();

        for _ in 0..workers {
            let tx = res_tx.clone();
            let next = &next;
            scope.spawn(move || loop {
                let i = next.fetch_add(1, Ordering::Relaxed);
                if i >= total {
                    break;
                }
                let outcome = attempt(enricher, &records[i]);
                if tx.send((i, outcome)).is_err() {
                    break;
                }
            });
        }
        drop(res_tx); // collector is sole receiver now

        for (i, outcome) in res_rx {
            let record = &records[i];
            let label = describe(record);
            let enriched = match outcome {
                Ok(details) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(i, &label);
                    }
                    EnrichedRecord::enriched(record.clone(), details)
                }
                Err(e) => {
                    logw!(index = i + 1, total, "{label}: summary only: {e}");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(i, &label, &e.to_string());
                    }
                    EnrichedRecord::degraded(record.clone())
                }
            };
            slots[i] = Some(enriched);
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    slots
        .into_iter()
        .zip(records)
        .map(|(slot, record)| slot.unwrap_or_else(|| EnrichedRecord::degraded(record.clone())))
        .collect()
}

/* ---------- helpers ---------- */

fn attempt<E: Enricher>(enricher: &E, record: &SummaryRecord) -> Result<DetailAttributes> {
    panic::catch_unwind(AssertUnwindSafe(|| enricher.enrich(record)))
        .unwrap_or_else(|payload| Err(Error::TaskPanicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|m| s!(*m))
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| s!("unknown panic"))
}

fn describe(record: &SummaryRecord) -> String {
    format!("{} at {}", record.date_time, record.location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{thread, time::Duration};

    /// Succeeds with a room named after the location, except for scripted ones.
    #[derive(Default)]
    struct Scripted {
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        pause: Option<Duration>,
    }

    impl Enricher for Scripted {
        fn enrich(&self, record: &SummaryRecord) -> Result<DetailAttributes> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            if let Some(d) = self.pause {
                thread::sleep(d);
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match record.location.as_str() {
                "fails" => Err(Error::Submission { url: s!("http://test/submit"), reason: s!("status 500") }),
                "nomatch" => Err(Error::NoMatch { date_time: record.date_time.clone(), location: s!("nomatch") }),
                "panics" => panic!("parser blew up"),
                loc => Ok(DetailAttributes { room: Some(format!("room {loc}")), ..Default::default() }),
            }
        }
    }

    #[derive(Default)]
    struct Counting {
        begun: usize,
        done: Vec<usize>,
        failed: Vec<usize>,
        finished: bool,
    }

    impl Progress for Counting {
        fn begin(&mut self, total: usize) { self.begun = total; }
        fn item_done(&mut self, index: usize, _label: &str) { self.done.push(index); }
        fn item_failed(&mut self, index: usize, _label: &str, _reason: &str) { self.failed.push(index); }
        fn finish(&mut self) { self.finished = true; }
    }

    fn records(locations: &[&str]) -> Vec<SummaryRecord> {
        locations
            .iter()
            .enumerate()
            .map(|(i, loc)| SummaryRecord {
                date_time: format!("{:02}.10.2025, 08:00", i + 1),
                location: s!(*loc),
                city: s!("Augsburg"),
                region: s!("Schwaben"),
                status: s!("frei"),
            })
            .collect()
    }

    #[test]
    fn one_failure_degrades_only_its_own_record() {
        let input = records(&["a", "fails", "c", "d", "e"]);
        let out = enrich_all(&Scripted::default(), &input, 3, None);

        assert_eq!(out.len(), 5);
        for (i, (got, src)) in out.iter().zip(&input).enumerate() {
            assert_eq!(&got.summary, src, "slot {i} kept its own summary");
        }
        assert!(out[1].is_degraded());
        for i in [0, 2, 3, 4] {
            assert_eq!(out[i].details.room, Some(format!("room {}", input[i].location)));
        }
    }

    #[test]
    fn every_failure_kind_keeps_the_record() {
        let input = records(&["nomatch", "panics", "fails"]);
        let out = enrich_all(&Scripted::default(), &input, 2, None);

        assert_eq!(out.len(), input.len());
        assert!(out.iter().all(EnrichedRecord::is_degraded));
        assert_eq!(out.iter().map(|r| &r.summary).collect::<Vec<_>>(), input.iter().collect::<Vec<_>>());
    }

    #[test]
    fn each_record_is_attempted_exactly_once() {
        let input = records(&["a", "fails", "c", "panics", "e", "f", "g"]);
        let enricher = Scripted::default();
        enrich_all(&enricher, &input, 4, None);
        assert_eq!(enricher.calls.load(Ordering::SeqCst), input.len());
    }

    #[test]
    fn concurrency_never_exceeds_the_pool() {
        let input = records(&["a"; 12]);
        let enricher = Scripted { pause: Some(Duration::from_millis(20)), ..Default::default() };
        let out = enrich_all(&enricher, &input, 3, None);

        assert_eq!(out.len(), 12);
        let peak = enricher.peak.load(Ordering::SeqCst);
        assert!((1..=3).contains(&peak), "peak {peak}");
    }

    #[test]
    fn odd_pool_sizes_are_clamped() {
        let input = records(&["a", "b"]);
        assert_eq!(enrich_all(&Scripted::default(), &input, 0, None).len(), 2);
        assert_eq!(enrich_all(&Scripted::default(), &input, 64, None).len(), 2);
        assert!(enrich_all(&Scripted::default(), &[], 10, None).is_empty());
    }

    #[test]
    fn progress_sees_every_outcome() {
        let input = records(&["a", "fails", "c"]);
        let mut progress = Counting::default();
        enrich_all(&Scripted::default(), &input, 2, Some(&mut progress));

        progress.done.sort_unstable();
        assert_eq!(progress.begun, 3);
        assert_eq!(progress.done, vec![0, 2]);
        assert_eq!(progress.failed, vec![1]);
        assert!(progress.finished);
    }
}
