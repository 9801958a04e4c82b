#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unnecessary_cast)]
#![allow(clippy::ptr_as_ptr)]

pub mod bar;
pub mod bar_kind;
pub mod bridge;
pub mod calculator;
pub mod catalog;
pub mod config;
pub mod convert;
pub mod ledger;
pub mod loadout;
pub mod logging;
pub mod plate;
pub mod session;
pub mod session_error;
pub mod snapshot;
pub mod store;
pub mod store_error;
pub mod unit;
