use super::*;

mod fixtures;
pub(crate) use fixtures::*;

mod browser_actions;
mod dom_queries;
mod html_parsing;
mod url_encoding;
