/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the flif compression crates
//!
//! This crate provides the plumbing the codec crates build on
//!
//! It currently contains
//!
//! - Byte source and sink traits with in-memory and `std::io` backed
//!   implementations, consumed one byte at a time by the arithmetic coder
//! - A namespaced log facade
//!
//! This library is `#[no_std]` with `alloc` needed for `Vec` based sinks.
//!
//! # Features
//!  - `std`: Enabled by default, adds `std::io` backed sources and sinks
//!    and `std::error::Error` impls.
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub mod bytestream;
pub mod log;
