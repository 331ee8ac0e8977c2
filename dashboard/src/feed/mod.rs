//! Feed module
//!
//! Card presentation and LLM-readable rendering of the dashboard widgets.

pub mod content;
pub mod renderer;

pub use content::{format_count, render, Presentation};
pub use renderer::{
    render_bubbles, render_cowswap, render_header, render_market, render_nft, render_portfolio,
    render_token_search, render_updates, render_widgets,
};
