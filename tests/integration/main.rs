//! Integration tests driving the public client against local mock servers

mod common;
mod document_tests;
mod listing_tests;
mod politeness_tests;
