//! Live tracking of the running Czech trains:
//! the train list with delays, the search over it
//! and the position of a single train converted from the S-JTSK grid to WGS84.

// The list was generated with the command
//   $ rustc -W help | grep ' allow ' | awk '{print $1}' | tr - _ | sort | xargs -I{} echo '#![warn({})]'
#![warn(absolute_paths_not_starting_with_crate)]
#![warn(anonymous_parameters)]
#![warn(deprecated_in_future)]
#![warn(elided_lifetimes_in_paths)]
#![warn(explicit_outlives_requirements)]
#![warn(keyword_idents)]
#![warn(macro_use_extern_crate)]
#![warn(meta_variable_misuse)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(non_ascii_idents)]
#![warn(single_use_lifetimes)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unstable_features)]
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]
#![warn(unused_labels)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]
#![warn(variant_size_differences)]
// recommendations
#![forbid(unsafe_code)]
#![deny(clippy::mem_forget)]
// suppress some pedantic warnings
#![allow(clippy::non_ascii_literal)]
#![allow(clippy::must_use_candidate)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub use train_radar_types as types;

pub use config::Config;
pub use convert::{extract_dms_pair, Projection, RemoteConverter, DEFAULT_MODE};
pub use detail::{osm_url, DetailView, RefreshOutcome};
pub use error::{ConfigError, ConversionError, FeedError};
pub use feed::{Envelope, FeedClient, TrainSource};
pub use poll::Refresher;
pub use train::{filter_trains, parse_delay, DelayClass, Geometry, Train, TrainProperties};

pub mod config;
pub mod convert;
pub mod detail;
pub mod error;
pub mod feed;
pub mod poll;
pub mod train;
