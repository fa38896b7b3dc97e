//! # wirecompat
//!
//! CLI front end for [`wirecompat_core`]: decode hex-encoded wire
//! payloads under a chosen schema version, dump raw wire structure, and
//! print schema-pair compatibility matrices.

pub mod cli;
