// SPDX-License-Identifier: MIT OR Apache-2.0

//! Headless driver for the Go rules core: configuration, move parsing and
//! terminal rendering.

pub mod config;
pub mod input;
pub mod render;
