/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Namespaced logging for the flif crates
//!
//! The codec crates log through this module so that they share one
//! logging path and downstream users choose the logger implementation
//! by depending on any `log` compatible backend.

pub use log::{debug, error, info, log_enabled, trace, warn};
