pub(crate) mod config;
pub(crate) mod job;
pub(crate) mod ledger;
pub(crate) mod runner;
pub(crate) mod select;
