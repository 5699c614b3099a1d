// src/checker/mod.rs
// =============================================================================
// This module contains the pieces that look at a single URL.
//
// Submodules:
// - http: HEAD/GET probes behind the HttpClient trait
// - html: Extracts links from HTML pages
// =============================================================================

mod html;
mod http;

pub use html::{extract_links, extract_page_links, PageLinks};
pub use http::{ClientConfig, HttpClient, Page, Probe, ReqwestClient};
