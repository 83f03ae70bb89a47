#![cfg_attr(not(test), no_std)]

//! Board adapters for the recovery core: button pad, flash-backed device
//! storage and the dialog renderer.

pub mod input;
pub mod render;
pub mod storage;

#[cfg(test)]
mod tests;
