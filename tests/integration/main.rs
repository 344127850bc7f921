//! Integration tests for Dead-Seeker
//!
//! These tests run whole crawls against wiremock servers.

mod crawl_tests;
mod site_tests;
mod support;
