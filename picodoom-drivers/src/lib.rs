//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in picodoom-core:
//!
//! - Panel drivers (ST7789 over 4-wire SPI)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod panel;
