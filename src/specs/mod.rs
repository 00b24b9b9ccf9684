// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific knowledge of the exam appointment flow: *where the ground
//! truth lives in the HTML* and *how to read it*.
//!
//! ## What lives here
//! - `listing` – row classification, summary extraction, and re-matching a
//!   record inside a fresh conversation's listing.
//! - `detail` – label/value extraction from the detail page.
//!
//! ## What does **not** live here
//! - **Network and session handling** (`core::net::Conversation`).
//! - **Generic form mechanics** (`core::form`: submission target, payload).
//! - **Scheduling and failure policy** (`scrape`).
//! - **Ordering and serialization** (`output`).
//!
//! ## Typical call chain
//! ```text
//! scrape::run → Conversation::open → listing::extract_summaries
//!            ↘ per record: Conversation::open → listing::find_control
//!                          → Conversation::submit → detail::parse_detail
//! ```
//!
//! ## Conventions & invariants
//! - Specs never fetch. They take a parsed `Document` and return data.
//! - Every lexical token comes from `config::Vocabulary`; nothing is matched
//!   against hardcoded page wording.
//! - Specs are testable **offline** against the fixtures in `tests/fixtures/`.
pub mod detail;
pub mod listing;
