//! End-to-end catalog scenarios against the in-memory store

mod common;

mod addressing;
mod collections;
mod config;
mod items;
mod search;
