//! Script injection into the tidied page.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{Config, ReflowConfig};
use crate::dom::{ArenaDom, parse_html_bytes};
use crate::engine::prerender;
use crate::error::{Error, Result};

use super::tidy::same_file;

/// Browser-side reflow engine, written next to the page.
pub const ENGINE_SCRIPT: &str = include_str!("../../assets/fixup.js");

/// Copy the UI library and write the engine script into the page's asset
/// directory. Returns that directory.
pub fn provision_assets(page: &Path, config: &Config) -> Result<PathBuf> {
    let base = page.parent().unwrap_or(Path::new("."));
    let dir = base.join(&config.script_dir);
    fs::create_dir_all(&dir).map_err(|source| Error::Asset {
        path: dir.clone(),
        source,
    })?;

    let library = dir.join(config.library_name());
    if same_file(&config.library, &library) {
        debug!(path = %library.display(), "library already in place");
    } else {
        fs::copy(&config.library, &library).map_err(|source| Error::Asset {
            path: config.library.clone(),
            source,
        })?;
    }

    let engine = dir.join(&config.engine_script);
    fs::write(&engine, ENGINE_SCRIPT).map_err(|source| Error::Asset {
        path: engine.clone(),
        source,
    })?;

    debug!(dir = %dir.display(), "provisioned script assets");
    Ok(dir)
}

/// Reference the library and the engine from `<head>` and hide `<body>`.
///
/// The engine script carries the configured tier in `data-tier` and the
/// table border limit in `data-table-border-limit`.
pub fn inject_scripts(dom: &mut ArenaDom, config: &Config) -> Result<()> {
    let head = dom.head().ok_or(Error::MissingElement("head"))?;
    let body = dom.body().ok_or(Error::MissingElement("body"))?;

    let [library_src, engine_src] = config.script_srcs();
    let border_limit = config.reflow.table_border_limit.to_string();
    let library = dom.create_html_element(
        "script",
        &[("type", "text/javascript"), ("src", library_src.as_str())],
    );
    let engine = dom.create_html_element(
        "script",
        &[
            ("type", "text/javascript"),
            ("src", engine_src.as_str()),
            ("data-tier", config.tier.as_str()),
            ("data-table-border-limit", border_limit.as_str()),
        ],
    );
    dom.append(head, library);
    dom.append(head, engine);

    dom.set_attr(body, "style", "display:none");
    Ok(())
}

/// Rewrite the page on disk so it loads the engine in the browser.
pub fn inject_file(page: &Path, config: &Config) -> Result<()> {
    provision_assets(page, config)?;

    let mut dom = parse_html_bytes(&fs::read(page)?);
    inject_scripts(&mut dom, config)?;
    fs::write(page, dom.to_html()?)?;

    info!(page = %page.display(), tier = %config.tier, "injected reflow scripts");
    Ok(())
}

/// Rewrite the page on disk with the reflow already applied.
pub fn prerender_file(page: &Path, config: &ReflowConfig) -> Result<()> {
    let mut dom = parse_html_bytes(&fs::read(page)?);
    prerender(&mut dom, config)?;
    fs::write(page, dom.to_html()?)?;

    info!(page = %page.display(), "wrote prerendered page");
    Ok(())
}
