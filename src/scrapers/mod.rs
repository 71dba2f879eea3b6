//! News source scrapers.
//!
//! Each source module turns one site's markup into [`NewsRecord`](crate::models::NewsRecord)s
//! in two steps:
//!
//! 1. **Scanning**: find the list items on the listing page and keep the ones
//!    published on the requested date
//! 2. **Assembling**: resolve each kept item's content and build the record
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Oleoscope | [`oleoscope`] | HTML scraping | Listing at `/news`, dates as `dd.mm.yyyy` |
//!
//! Failed items are logged and skipped; they never abort the page.

pub mod oleoscope;
