//! # booktidy
//!
//! Makes converter-generated e-book HTML readable in a browser.
//!
//! ## Features
//!
//! - Runs the converter output through `tidy`, tolerating its warning exit codes
//! - Injects a UI library and a reflow script into `<head>` and hides `<body>`
//!   until the reflow has run
//! - Native reflow engine: unwraps redundant wrappers, classes code blocks and
//!   tip/note/warning callouts, moves the cover image to the top
//! - Optional prerendering, for a static page with no scripts at all
//!
//! ## Quick Start
//!
//! ```no_run
//! use booktidy::{Config, Mode};
//!
//! let config = Config::load("booktidy.toml".as_ref()).unwrap();
//! let page = booktidy::run(&config, Mode::Scripted).unwrap();
//! println!("wrote {}", page.display());
//! ```
//!
//! ## Reflowing a document in memory
//!
//! ```
//! use booktidy::{ReflowConfig, parse_html, prerender};
//!
//! let mut dom = parse_html(
//!     "<body><div><h3>Tip</h3><p>Read slowly.</p></div><img src=cover.jpg></body>",
//! );
//! prerender(&mut dom, &ReflowConfig::default()).unwrap();
//!
//! let html = dom.to_html().unwrap();
//! assert!(html.contains(r#"<div class="tip">"#));
//! assert!(html.contains(r#"<div id="content"><img src="cover.jpg">"#));
//! ```

pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod preprocess;
pub mod reflow;
pub(crate) mod util;

pub use config::{Config, ReflowConfig, TidyConfig, Tier};
pub use dom::{ArenaDom, NodeId, Selector, parse_html};
pub use engine::{Engine, EngineState, Host, NoopHost, prerender};
pub use error::{Error, Result};
pub use preprocess::{Mode, run};
pub use reflow::{Pass, Pipeline};
