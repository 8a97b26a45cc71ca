// src/scrape/sources/mod.rs
//! One adapter per comic site. Each adapter knows its front-page URL and the
//! selectors that locate the latest strip; parsing is a pure function over the
//! fetched HTML so it can be exercised against saved pages.

pub mod octopuns;
pub mod oglaf;
pub mod pbf;
pub mod poorlydrawnlines;
pub mod smbc;
pub mod xkcd;
