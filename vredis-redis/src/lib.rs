#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod connector;
pub mod error;

#[doc(inline)]
pub use crate::connector::{RedisConnection, RedisConnector, reply_from_value};
#[doc(inline)]
pub use crate::error::Error;
