//! hanzi-engine
//!
//! Ties the scheme crates together behind one facade.
//!
//! - `ImeEngine`: initialize from TOML, query the current scheme, select,
//!   learn, switch scheme and charset, convert text
//! - `SchemeFactory`: build an `InputScheme` by name (`pinyin`, `bopomofo`,
//!   `cangjie`)
//! - `CangjieScheme`: registered placeholder that never yields candidates

pub mod engine;
pub mod factory;

pub use engine::ImeEngine;
pub use factory::{CangjieScheme, SchemeFactory};

pub use hanzi_core::{Candidate, Charset, Config, ImeError, InputScheme, SchemeKind};
