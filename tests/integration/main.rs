//! Integration test harness
//!
//! The tests use wiremock to stand in for the store's search and detail
//! endpoints and exercise the crawl engine end-to-end.

mod crawl_tests;
