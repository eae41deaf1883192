#![forbid(unsafe_code)]

mod context;
mod renewal;
mod repository;
mod service;
mod snippet;

pub use context::RequestContext;
pub use renewal::{RenewalStats, Renewer};
pub use repository::SnippetRepository;
pub use service::{ServiceConfig, SnippetService};
pub use snippet::{Deadline, NewSnippet, Snippet};
